use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn rawline(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawline"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run rawline")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is valid UTF-8")
}

/// 600 lines where 569-574 hold the awkward cases.
fn debug_window_file(dir: &TempDir) -> std::path::PathBuf {
    let mut content = String::new();
    for i in 1..=568 {
        content.push_str(&format!("line {}\n", i));
    }
    for line in ["abc\n", "def\r\n", "\n", "  trailing  \n", "tab\there\n", "end"] {
        content.push_str(line);
    }

    let path = dir.path().join("MobileCart.tsx");
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

#[test]
fn test_default_window() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    let output = rawline(&[path_str(&file)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let expected = concat!(
        "Line 569:\n  Raw: 'abc\\n'\n  Visible: abc\n\n",
        "Line 570:\n  Raw: 'def\\r\\n'\n  Visible: def\n\n",
        "Line 571:\n  Raw: '\\n'\n  Visible: \n\n",
        "Line 572:\n  Raw: '  trailing  \\n'\n  Visible:   trailing\n\n",
        "Line 573:\n  Raw: 'tab\\there\\n'\n  Visible: tab\there\n\n",
        "Line 574:\n  Raw: 'end'\n  Visible: end\n\n",
    );
    assert_eq!(String::from_utf8(output.stdout).unwrap(), expected);
}

#[test]
fn test_output_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    let first = rawline(&[path_str(&file), "--lines", "560-580"]);
    let second = rawline(&[path_str(&file), "--lines", "560-580"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_explicit_bounds() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("small.txt");
    fs::write(&file, "one\ntwo\nthree\nfour\n").unwrap();

    let output = rawline(&[path_str(&file), "--start", "2", "--end", "3"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Line 2:\n  Raw: 'two\\n'\n  Visible: two\n\nLine 3:\n  Raw: 'three\\n'\n  Visible: three\n\n"
    );
}

#[test]
fn test_range_past_end_truncates() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("small.txt");
    fs::write(&file, "one\ntwo\nthree").unwrap();

    let output = rawline(&[path_str(&file), "-l", "2:10"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Line ").count(), 2);
    assert!(stdout.starts_with("Line 2:\n"));
    assert!(stdout.contains("Line 3:\n  Raw: 'three'\n"));
}

#[test]
fn test_range_beyond_file_is_empty_success() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("short.txt");
    fs::write(&file, "only\n").unwrap();

    let output = rawline(&[path_str(&file)]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_file_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    let output = rawline(&[path_str(&missing)]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(path_str(&missing)), "stderr: {}", stderr);
}

#[test]
fn test_invalid_range_fails() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    for args in [
        vec!["--start", "0"],
        vec!["--start", "10", "--end", "3"],
        vec!["--end", "0"],
        vec!["--lines", "9-3"],
    ] {
        let mut argv = vec![path_str(&file)];
        argv.extend(&args);
        let output = rawline(&argv);
        assert!(!output.status.success(), "{:?} should fail", args);
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_start_alone_shows_six_line_window() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    let output = rawline(&[path_str(&file), "--start", "571"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Line ").count(), 4);
    assert!(stdout.starts_with("Line 571:\n"));

    // start beyond the default end no longer collides with it
    let output = rawline(&[path_str(&file), "--start", "600"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn test_reads_piped_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rawline"))
        .args(["/dev/stdin", "-l", "1-2"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run rawline");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"one\ntwo\n")
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for rawline");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Line 1:\n  Raw: 'one\\n'\n  Visible: one\n\nLine 2:\n  Raw: 'two\\n'\n  Visible: two\n\n"
    );
}

#[test]
fn test_lines_conflicts_with_start() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    let output = rawline(&[path_str(&file), "--lines", "1-2", "--start", "1"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_hidden_characters_are_escaped() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bidi.txt");
    fs::write(&file, "let a = \u{2066}b\u{2069};\n\u{e000}\n").unwrap();

    let output = rawline(&[path_str(&file), "-l", "1-2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("  Raw: 'let a = \\u2066b\\u2069;\\n'\n"), "{}", stdout);
    assert!(stdout.contains("  Raw: '\\ue000\\n'\n"), "{}", stdout);
}

#[test]
fn test_decode_failure() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("binary.txt");
    fs::write(&file, b"fine\nbad \xFF byte\n").unwrap();

    let output = rawline(&[path_str(&file), "-l", "1-2"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("offset 9"), "stderr: {}", stderr);
    assert!(stderr.contains("line 2"), "stderr: {}", stderr);

    let output = rawline(&[path_str(&file), "-l", "1-2", "--encoding", "latin-1"]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("  Raw: 'bad \u{ff} byte\\n'\n"));
}

#[test]
fn test_bom_handling() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("bom.txt");
    fs::write(&file, b"\xEF\xBB\xBFfirst\n").unwrap();

    let output = rawline(&[path_str(&file), "-l", "1"]);
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("  Raw: '\\ufefffirst\\n'\n"));

    let output = rawline(&[path_str(&file), "-l", "1", "-e", "utf-8-sig"]);
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("  Raw: 'first\\n'\n"));
}

#[test]
fn test_unknown_encoding_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let file = debug_window_file(&dir);

    let output = rawline(&[path_str(&file), "--encoding", "klingon"]);
    assert_eq!(output.status.code(), Some(2));
}
