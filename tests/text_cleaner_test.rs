use sibu::application::services::clean_text;

#[test]
fn given_noisy_ticket_text_when_cleaning_then_strips_urls_ids_and_punctuation() {
    let result = clean_text("Visit http://x.co NOW re: device D12345!!");
    assert_eq!(result, "visit now re device");
}

#[test]
fn given_empty_input_when_cleaning_then_returns_empty() {
    assert_eq!(clean_text(""), "");
}

#[test]
fn given_whitespace_only_input_when_cleaning_then_returns_empty() {
    assert_eq!(clean_text("  \r\n\t  "), "");
}

#[test]
fn given_line_breaks_and_tabs_when_cleaning_then_collapses_to_single_spaces() {
    let result = clean_text("printer\r\noffline\tagain");
    assert_eq!(result, "printer offline again");
}

#[test]
fn given_digit_bearing_tokens_when_cleaning_then_drops_them_entirely() {
    let result = clean_text("error code err42x on host web01 after reboot");
    assert_eq!(result, "error code on host after reboot");
}

#[test]
fn given_any_input_when_cleaning_then_output_contains_only_lowercase_letters_and_spaces() {
    let inputs = [
        "UPPER case Mixed!",
        "symbols #$%^& everywhere",
        "unicode caf\u{e9} na\u{ef}ve",
        "https://example.com/path?q=1 trailing",
    ];
    for input in inputs {
        let result = clean_text(input);
        assert!(
            result.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
            "unexpected character in {:?}",
            result
        );
        assert!(!result.starts_with(' '));
        assert!(!result.ends_with(' '));
    }
}

#[test]
fn given_already_cleaned_text_when_cleaning_again_then_returns_same_text() {
    let once = clean_text("Server DOWN since 9am, please help!!");
    let twice = clean_text(&once);
    assert_eq!(once, twice);
}
