//! Card ID parsing tests
//!
//! Exercises the public parsing API the way callers use it: strings in,
//! validated slots or a single parse error kind out.

use readout_card_id::{parse_card_id, parse_card_id_list, CardId, ReadoutError, CARD_SLOT_COUNT};

fn expect_parse_error(input: &str) -> String {
    match parse_card_id(input) {
        Err(ReadoutError::ParseError(msg)) => msg,
        other => panic!("Expected ParseError for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_every_slot_with_and_without_marker() {
    for n in 0..CARD_SLOT_COUNT {
        let plain = parse_card_id(&n.to_string()).unwrap();
        let marked = parse_card_id(&format!("#{n}")).unwrap();
        assert_eq!(plain.index(), n);
        assert_eq!(plain, marked);
    }
}

#[test]
fn test_trailing_and_repeated_markers() {
    assert_eq!(parse_card_id("#3#").unwrap().value(), 3);
    assert_eq!(parse_card_id("#0##").unwrap(), CardId::MIN);
}

#[test]
fn test_range_failures_share_the_parse_error_kind() {
    assert_eq!(expect_parse_error("8"), "Card ID out of range");
    assert_eq!(expect_parse_error("-1"), "Card ID out of range");

    // Malformed input is the same kind, with its own message
    assert!(expect_parse_error("abc").starts_with("Malformed card ID"));
    assert!(expect_parse_error("").starts_with("Malformed card ID"));
    assert!(parse_card_id("abc").unwrap_err().is_parse_error());
}

#[test]
fn test_error_display() {
    let err = parse_card_id("8").unwrap_err();
    assert_eq!(err.to_string(), "Parse error: Card ID out of range");
}

#[test]
fn test_try_from_integer() {
    assert_eq!(CardId::try_from(7i64).unwrap(), CardId::MAX);
    assert!(CardId::try_from(8i64).is_err());
    assert!(CardId::try_from(-3i64).is_err());
    assert!(CardId::try_from(i64::MAX).is_err());
}

#[test]
fn test_list_parsing() {
    let ids = parse_card_id_list(" #1 ,#2,, 6 ").unwrap();
    assert_eq!(ids.iter().map(|id| id.value()).collect::<Vec<_>>(), vec![1, 2, 6]);

    let err = parse_card_id_list("#1,#8,#2").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_serde_from_integer_and_string() {
    let from_int: CardId = serde_json::from_str("5").unwrap();
    let from_str: CardId = serde_json::from_str(r##""#5""##).unwrap();
    assert_eq!(from_int, from_str);
    assert_eq!(serde_json::to_string(&from_int).unwrap(), "5");

    let list: Vec<CardId> = serde_json::from_str(r##"[0, "#1", "2#"]"##).unwrap();
    assert_eq!(list, vec![CardId::MIN, CardId::new(1).unwrap(), CardId::new(2).unwrap()]);
}

#[test]
fn test_serde_rejects_invalid() {
    assert!(serde_json::from_str::<CardId>("8").is_err());
    assert!(serde_json::from_str::<CardId>(r#""slot""#).is_err());
    assert!(serde_json::from_str::<CardId>("true").is_err());
}

#[test]
fn test_parse_is_reentrant_across_threads() {
    let handles: Vec<_> = (0..CARD_SLOT_COUNT)
        .map(|n| std::thread::spawn(move || parse_card_id(&format!("#{n}")).map(|id| id.index())))
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), n);
    }
}
