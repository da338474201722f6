use std::path::PathBuf;
use std::process::{Command, Output};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nuxsec"))
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

#[test]
fn warping_writes_named_svg() {
    let input = fixture_path("warping_bundle.json");
    assert!(input.exists(), "missing fixture: {}", input.display());

    let dir = tempfile::tempdir().unwrap();
    let out = run(&[
        "warping",
        "--input",
        input.to_string_lossy().as_ref(),
        "--out-dir",
        dir.path().to_string_lossy().as_ref(),
        "--variable",
        "mixtpi",
        "--warp",
        "NOMINAL",
        "--plist",
        "ALL",
        "--date",
        "20240101",
    ]);
    assert!(
        out.status.success(),
        "warping should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let svg_path = dir.path().join("Warping_ALL_20240101_mixtpi_NOMINAL.svg");
    assert!(svg_path.exists(), "missing output: {}", svg_path.display());

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    // Title combines the variable and warp display titles.
    assert!(svg.contains("T_\u{03c0} Closure test"));
    assert!(svg.contains("Average"));
    assert!(svg.contains("ndf = 36"));
}

#[test]
fn warping_unknown_keys_fall_back_to_raw_names() {
    let input = fixture_path("warping_bundle.json");
    let dir = tempfile::tempdir().unwrap();
    let out = run(&[
        "warping",
        "--input",
        input.to_string_lossy().as_ref(),
        "--out-dir",
        dir.path().to_string_lossy().as_ref(),
        "--variable",
        "mysteryvar",
        "--warp",
        "WARP9",
        "--plist",
        "P1",
        "--date",
        "20240102",
    ]);
    assert!(out.status.success());

    let svg = std::fs::read_to_string(dir.path().join("Warping_P1_20240102_mysteryvar_WARP9.svg"))
        .unwrap();
    assert!(svg.contains("mysteryvar WARP9"));
}

#[cfg(not(feature = "png"))]
#[test]
fn warping_png_requires_feature() {
    let input = fixture_path("warping_bundle.json");
    let dir = tempfile::tempdir().unwrap();
    let out = run(&[
        "warping",
        "--input",
        input.to_string_lossy().as_ref(),
        "--out-dir",
        dir.path().to_string_lossy().as_ref(),
        "--variable",
        "mixtpi",
        "--warp",
        "NOMINAL",
        "--plist",
        "ALL",
        "--date",
        "20240101",
        "--png",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("png"), "stderr={stderr}");
}

#[cfg(feature = "png")]
#[test]
fn warping_png_written_alongside_svg() {
    let input = fixture_path("warping_bundle.json");
    let dir = tempfile::tempdir().unwrap();
    let out = run(&[
        "warping",
        "--input",
        input.to_string_lossy().as_ref(),
        "--out-dir",
        dir.path().to_string_lossy().as_ref(),
        "--variable",
        "mixtpi",
        "--warp",
        "NOMINAL",
        "--plist",
        "ALL",
        "--date",
        "20240101",
        "--png",
        "--dpi",
        "150",
    ]);
    assert!(
        out.status.success(),
        "warping --png should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let png = std::fs::read(dir.path().join("Warping_ALL_20240101_mixtpi_NOMINAL.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
