/*!
 * Tests for dialogue file parsing and payload extraction
 */

use msgwai::msg_processor::{MsgFile, extract_payloads, last_payload, leading_field};

/// Test the basic extraction round trip
#[test]
fn test_extract_payloads_withSimpleRecord_shouldYieldText() {
    assert_eq!(extract_payloads("{1}{2}{Hello}"), "Hello");
}

/// Test that lines without a brace pair are dropped entirely
#[test]
fn test_extract_payloads_withBracelessLine_shouldOmitLine() {
    let text = "{1}{2}{Hello}\nplain line without braces\n{3}{4}{World}";
    assert_eq!(extract_payloads(text), "Hello\nWorld");
}

/// Test that extraction keeps one payload per record line
#[test]
fn test_extract_payloads_withMultipleRecords_shouldJoinWithNewlines() {
    let text = "{100}{}{Привет, путник.}\n{101}{}{Что тебе нужно?}\n\n{102}{}{Прощай.}";
    assert_eq!(
        extract_payloads(text),
        "Привет, путник.\nЧто тебе нужно?\nПрощай."
    );
}

/// Test that the rightmost open brace wins
#[test]
fn test_last_payload_withBracesInText_shouldUseRightmostOpenBrace() {
    // The rightmost '{' sits inside the free-text field; extraction is
    // positional, not semantic.
    assert_eq!(last_payload("{1}{2}{He said {hi}}"), Some("hi"));
}

/// Test that a line without a closing brace after the last open brace yields nothing
#[test]
fn test_last_payload_withUnclosedBrace_shouldReturnNone() {
    assert_eq!(last_payload("{1}{2}{Hello"), None);
    assert_eq!(last_payload("no braces at all"), None);
}

/// Test leading field extraction
#[test]
fn test_leading_field_withRecordLine_shouldReturnId() {
    assert_eq!(leading_field("{100}{}{Привет.}"), Some("100"));
    assert_eq!(leading_field("not a record"), None);
    assert_eq!(leading_field("{100 no close"), None);
}

/// Test record parsing from a file
#[test]
fn test_records_withMixedContent_shouldParseRecordLinesOnly() {
    let content = "{100}{}{Привет.}\n# comment\n\n{101}{42}{Пока.}";
    let file = MsgFile::new("test.msg", content.to_string());

    let records = file.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "100");
    assert_eq!(records[0].text, "Привет.");
    assert_eq!(records[0].raw, "{100}{}{Привет.}");
    assert_eq!(records[1].id, "101");
    assert_eq!(records[1].text, "Пока.");
}

/// Test that MsgFile payload extraction matches the free function
#[test]
fn test_extract_payloads_onMsgFile_shouldMatchFreeFunction() {
    let content = "{1}{2}{Hello}\n{3}{4}{World}";
    let file = MsgFile::new("test.msg", content.to_string());
    assert_eq!(file.extract_payloads(), extract_payloads(content));
}
