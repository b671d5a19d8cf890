#![expect(missing_docs)]

mod common;

use core::fmt::Write;

use common::{ENCODINGS, Scratch};
use textfile::TextFile;

fn hex(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{b:02X}").unwrap();
    }
    out
}

fn render_saved(text: &str) -> String {
    let mut out = String::new();
    for encoding in ENCODINGS {
        let scratch = Scratch::empty();
        let mut file = TextFile::default();
        file.save(&scratch.path, encoding).unwrap();
        file.write_str(text).unwrap();
        file.close();
        writeln!(out, "{encoding}: {}", hex(&scratch.bytes())).unwrap();
    }
    out
}

#[test]
fn snapshot_saved_layout() {
    insta::assert_snapshot!(render_saved("a\u{E9}\n"), @r"
    system-text: 61 C3 A9 0A
    identity-8bit: 61 E9 0D 0A
    utf-8: EF BB BF 61 C3 A9 0D 0A
    utf-16le: FF FE 61 00 E9 00 0D 00 0A 00
    utf-16be: FE FF 00 61 00 E9 00 0D 00 0A
    ");
}

#[test]
fn snapshot_reopened_handle() {
    let scratch = Scratch::with_bytes(b"\xFF\xFEx\0\n\0");
    let mut file = TextFile::default();
    file.open(&scratch.path).unwrap();
    file.read_line_wide().unwrap();
    let state = format!(
        "encoding={} bom_offset={} position={} length={} unicode={}",
        file.encoding(),
        file.bom_offset(),
        file.position(),
        file.length(),
        file.is_unicode()
    );
    insta::assert_snapshot!(
        state,
        @"encoding=utf-16le bom_offset=2 position=4 length=4 unicode=true"
    );
}

fn render_lines(bytes: &[u8]) -> String {
    let scratch = Scratch::with_bytes(bytes);
    let mut file = TextFile::default();
    file.open(&scratch.path).unwrap();
    let mut out = String::new();
    let encoding = file.encoding();
    for (i, line) in file.lines_wide().enumerate() {
        writeln!(out, "{i}: {:?}", line.unwrap()).unwrap();
    }
    let now = file.encoding();
    writeln!(out, "encoding after read: {now} (opened as {encoding})").unwrap();
    out
}

#[test]
fn snapshot_decoded_lines_with_fallback() {
    insta::assert_snapshot!(render_lines(b"\xEF\xBB\xBFok\r\n\xC3\x28 bad\nl\xC3\xA9st"), @r#"
    0: "ok"
    1: "�( bad"
    2: "lést"
    encoding after read: system-text (opened as utf-8)
    "#);
}
