use std::{fs, process::Command};

fn keystrike() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_keystrike"));
    let _ = command.env_remove("RUST_LOG");
    command
}

#[test]
fn headless_run_prints_a_summary() {
    let output = keystrike()
        .args(["--ticks", "240", "--seed", "9", "--keys", "QWE"])
        .output()
        .expect("failed to launch keystrike binary");

    assert!(output.status.success(), "keystrike should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== RUN SUMMARY ==="));
    assert!(stdout.contains("(240 ticks)"));
}

#[test]
fn identical_arguments_print_identical_summaries() {
    let run = || {
        keystrike()
            .args(["--ticks", "600", "--seed", "21"])
            .output()
            .expect("failed to launch keystrike binary")
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn malformed_catalog_fails_with_context() {
    let path = std::env::temp_dir().join(format!("keystrike-bad-{}.toml", std::process::id()));
    fs::write(&path, "[[weapon]]\nid = 4\n").expect("temp file is writable");

    let output = keystrike()
        .arg("--weapons")
        .arg(&path)
        .output()
        .expect("failed to launch keystrike binary");
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid weapon catalog"), "stderr: {stderr}");
}
