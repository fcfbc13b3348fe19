//! Host inspection

use crate::tool::Arch;

/// Architecture of the host this binary was built for
pub fn host_arch() -> Arch {
    arch_from_machine(std::env::consts::ARCH).unwrap_or(if cfg!(target_pointer_width = "64") {
        Arch::X64
    } else {
        Arch::X86
    })
}

/// Map a machine or target architecture name to its word size
pub fn arch_from_machine(machine: &str) -> Option<Arch> {
    match machine {
        "x86_64" | "AMD64" | "amd64" | "IA64" | "ia64" | "aarch64" | "arm64" | "powerpc64"
        | "riscv64" | "s390x" | "loongarch64" | "sparc64" | "mips64" => Some(Arch::X64),
        "x86" | "i386" | "i586" | "i686" | "arm" | "powerpc" | "riscv32" | "mips" => {
            Some(Arch::X86)
        }
        _ => None,
    }
}

pub fn is_windows() -> bool {
    cfg!(windows)
}
