use msbuild_finder::filter::compile_tool_filter;
use msbuild_finder::tool::{Arch, Edition, MSBUILD, ToolEntry, XBUILD};
use rstest::{fixture, rstest};

#[fixture]
fn installs() -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(XBUILD, [14, 0], Arch::X86, None, "/usr/bin/xbuild"),
        ToolEntry::new(MSBUILD, [12, 0], Arch::X86, None, "/opt/msbuild12/x86/MSBuild.exe"),
        ToolEntry::new(MSBUILD, [12, 0], Arch::X64, None, "/opt/msbuild12/x64/MSBuild.exe"),
        ToolEntry::new(
            MSBUILD,
            [16, 11, 2],
            Arch::X86,
            Some(Edition::Enterprise),
            "/vs/2019/Enterprise/MSBuild.exe",
        ),
        ToolEntry::new(
            MSBUILD,
            [16, 11, 2],
            Arch::X86,
            Some(Edition::Community),
            "/vs/2019/Community/MSBuild.exe",
        ),
        ToolEntry::new(XBUILD, [13, 0], Arch::X86, None, "/usr/lib/mono/xbuild13"),
    ]
}

fn paths(entries: &[ToolEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.path.display().to_string())
        .collect()
}

#[test]
fn or_chain_returns_entries_in_clause_order() {
    let a = ToolEntry::new(MSBUILD, [12, 0], Arch::X64, None, "/a");
    let b = ToolEntry::new(XBUILD, [13, 0], Arch::X86, None, "/b");

    let filter = compile_tool_filter("msbuild 12.* | xbuild 13.*").unwrap();

    assert_eq!(filter.apply([&b, &a]), vec![a, b]);
}

#[test]
fn arch_breaks_ties_in_favour_of_64bit() {
    let x86 = ToolEntry::new(MSBUILD, [12, 0], Arch::X86, None, "/msbuild");
    let x64 = ToolEntry::new(MSBUILD, [12, 0], Arch::X64, None, "/msbuild");

    let filter = compile_tool_filter("msbuild").unwrap();

    assert_eq!(filter.apply([&x86, &x64]), vec![x64, x86]);
}

#[rstest]
fn full_ordering_over_mixed_installs(installs: Vec<ToolEntry>) {
    let filter = compile_tool_filter("msbuild | xbuild").unwrap();

    assert_eq!(
        paths(&filter.apply(&installs)),
        vec![
            "/vs/2019/Community/MSBuild.exe",
            "/vs/2019/Enterprise/MSBuild.exe",
            "/opt/msbuild12/x64/MSBuild.exe",
            "/opt/msbuild12/x86/MSBuild.exe",
            "/usr/bin/xbuild",
            "/usr/lib/mono/xbuild13",
        ]
    );
}

#[rstest]
#[case("xbuild 13", vec!["/usr/lib/mono/xbuild13"])]
#[case("msbuild 12 64bit", vec!["/opt/msbuild12/x64/MSBuild.exe"])]
#[case("msbuild * enterprise", vec!["/vs/2019/Enterprise/MSBuild.exe"])]
#[case("msbuild >=16 | xbuild >13", vec![
    "/vs/2019/Community/MSBuild.exe",
    "/vs/2019/Enterprise/MSBuild.exe",
    "/usr/bin/xbuild",
])]
#[case("dotnet build", vec![])]
fn clauses_select_entries(
    installs: Vec<ToolEntry>,
    #[case] filter: &str,
    #[case] expected: Vec<&str>,
) {
    let filter = compile_tool_filter(filter).unwrap();

    assert_eq!(paths(&filter.apply(&installs)), expected);
}

#[rstest]
fn recompiling_a_filter_gives_identical_output(installs: Vec<ToolEntry>) {
    let source = "xbuild * 32bit | msbuild >=12 | xbuild 13";

    let first = compile_tool_filter(source).unwrap().apply(&installs);
    let second = compile_tool_filter(source).unwrap().apply(&installs);

    assert_eq!(first, second);
}

#[rstest]
#[case("msbuild | | xbuild")]
#[case("msbuild 12.>*")]
#[case("12.0")]
#[case("msbuild 12 128bit!")]
fn malformed_filters_are_rejected(#[case] filter: &str) {
    assert!(compile_tool_filter(filter).is_err());
}
