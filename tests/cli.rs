use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn inline_css(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_inline-css"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("stdin should accept input");
    child.wait_with_output().expect("binary should exit")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    let path = dir.join(name);
    fs::write(&path, contents).expect("scratch file should be writable");
    path
}

#[test]
fn parse_reads_stdin() {
    let out = inline_css(&["parse"], r#"<div style={{ color: 'red', fontSize: 12 }}>"#);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "color: red;\nfont-size: 12;\n"
    );
}

#[test]
fn parse_json_keeps_order() {
    let out = inline_css(&["parse", "--json"], r#"style="z-index: 1; color: red""#);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["z-index"], "1");
    assert_eq!(value["color"], "red");
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.find("z-index").unwrap() < text.find("color").unwrap());
}

#[test]
fn parse_warns_on_malformed_object() {
    let out = inline_css(&["parse"], "style={{ width: size }}");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ignoring malformed style object"));
    assert!(stderr.contains('^'));
}

#[test]
fn extract_class_rewrites_file() {
    let input = scratch_file(
        "cli-extract-class.jsx",
        "<div>\n  <p className=\"old\" style={{ marginTop: 4 }}>hi</p>\n</div>\n",
    );
    let css = scratch_file("cli-extract-class.css", "");
    let input_arg = input.to_string_lossy().to_string();
    let css_arg = css.to_string_lossy().to_string();

    let out = inline_css(
        &[
            "extract", &input_arg, "--line", "2", "--mode", "class", "--class", "note",
            "--in-place", "--clipboard", &css_arg,
        ],
        "",
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        "<div>\n <p className=\"note\" >hi</p>\n</div>\n"
    );
    assert_eq!(fs::read_to_string(&css).unwrap(), ".note {\nmargin-top: 4;\n}");
}

#[test]
fn extract_class_prompts_with_existing_default() {
    let input = scratch_file(
        "cli-extract-prompt.html",
        "<a class=\"btn big\" style=\"color: red\">go</a>\n",
    );
    let input_arg = input.to_string_lossy().to_string();

    let out = inline_css(
        &["extract", &input_arg, "--line", "1", "--mode", "class"],
        "\n",
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), ".btn {\ncolor: red;\n}\n");
    assert!(String::from_utf8_lossy(&out.stderr).contains("[btn]"));
}

#[test]
fn actions_lists_titles() {
    let input = scratch_file("cli-actions.html", "<div style=\"color: red\">\n</div>\n");
    let input_arg = input.to_string_lossy().to_string();

    let out = inline_css(&["actions", &input_arg, "--line", "1"], "");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Copy Inline Styles as CSS\nCopy Inline Styles as CSS Class\n"
    );
}
