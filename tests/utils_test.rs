use std::{sync::atomic::AtomicBool, time::Duration};

use musicard::types::{CatalogEntry, Category};
use musicard::utils::*;

#[test]
fn test_extract_identifier_trailing_digits() {
    assert_eq!(extract_identifier("abc123"), Some(123));
    assert_eq!(extract_identifier("https://www.hitstergame.com/nl/00042"), Some(42));
    assert_eq!(extract_identifier("7"), Some(7));

    // The trailing run wins over digits earlier in the string
    assert_eq!(
        extract_identifier("https://hitstergame.com/nl/aaaa0037/00012"),
        Some(12)
    );
}

#[test]
fn test_extract_identifier_fallback_to_last_digit_run() {
    assert_eq!(extract_identifier("abc123def"), Some(123));
    assert_eq!(extract_identifier("card-12-of-40/x"), Some(40));
    assert_eq!(extract_identifier("https://example.com/song/315?"), Some(315));
}

#[test]
fn test_extract_identifier_rejects_unusable_input() {
    // No digits at all
    assert_eq!(extract_identifier(""), None);
    assert_eq!(extract_identifier("hello world"), None);
    assert_eq!(extract_identifier("äöü-🎵"), None);

    // Zero is not a card number
    assert_eq!(extract_identifier("card 0"), None);
    assert_eq!(extract_identifier("000"), None);

    // Too large to be an identifier
    assert_eq!(extract_identifier("id99999999999999999999"), None);
}

#[test]
fn test_category_for_code() {
    assert_eq!(
        category_for_code("https://hitstergame.com/nl/aaaa0037/00012"),
        Category::Xmas
    );
    assert_eq!(category_for_code("aaaa0027/5"), Category::Movies);
    assert_eq!(category_for_code("x/aaaa0007/5"), Category::Schlager);
    assert_eq!(category_for_code("aaaa0006-9"), Category::GuiltyPleasure);

    // Digits without markers fall back to the standard list
    assert_eq!(category_for_code("00012"), Category::Standard);
    assert_eq!(category_for_code("garbage"), Category::Standard);
}

#[test]
fn test_parse_card() {
    assert_eq!(
        parse_card("https://hitstergame.com/nl/aaaa0027/00003"),
        Some((Category::Movies, 3))
    );
    assert_eq!(parse_card("https://hitstergame.com/nl/00150"), Some((Category::Standard, 150)));
    assert_eq!(parse_card("no digits here"), None);
}

#[test]
fn test_start_offset() {
    assert_eq!(
        start_offset(Duration::from_secs(360), 0.4),
        Duration::from_secs(144)
    );
    assert_eq!(start_offset(Duration::from_secs(200), 0.0), Duration::ZERO);

    // Ratios are clamped to the track
    assert_eq!(
        start_offset(Duration::from_secs(100), 3.0),
        Duration::from_secs(100)
    );

    // Non-finite ratios start at the beginning instead of panicking
    assert_eq!(start_offset(Duration::from_secs(100), f64::NAN), Duration::ZERO);
    assert_eq!(
        start_offset(Duration::from_secs(100), f64::INFINITY),
        Duration::ZERO
    );
}

#[test]
fn test_format_time() {
    assert_eq!(format_time(Duration::ZERO), "0:00");
    assert_eq!(format_time(Duration::from_secs(65)), "1:05");
    assert_eq!(format_time(Duration::from_millis(359_900)), "5:59");
    assert_eq!(format_time(Duration::from_secs(3600)), "60:00");
}

#[test]
fn test_generate_state_nonce() {
    let nonce = generate_state_nonce();
    assert_eq!(nonce.len(), 32);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(nonce, generate_state_nonce());
}

#[test]
fn test_busy_guard() {
    let flag = AtomicBool::new(false);

    let guard = BusyGuard::acquire(&flag);
    assert!(guard.is_some());
    assert!(BusyGuard::acquire(&flag).is_none());

    drop(guard);
    assert!(BusyGuard::acquire(&flag).is_some());
}

#[test]
fn test_catalog_entry_from_line() {
    let entry = CatalogEntry::from_line(1, Category::Standard, "  Queen -  Bohemian Rhapsody ");
    assert_eq!(entry.artist, "Queen");
    assert_eq!(entry.title, "Bohemian Rhapsody");

    // Only the first hyphen separates artist from title
    let entry = CatalogEntry::from_line(2, Category::Standard, "a-ha - Take On Me");
    assert_eq!(entry.artist, "a");
    assert_eq!(entry.title, "ha - Take On Me");

    // Without separator both sides are the whole line
    let entry = CatalogEntry::from_line(3, Category::Standard, " Instrumental ");
    assert_eq!(entry.artist, "Instrumental");
    assert_eq!(entry.title, "Instrumental");

    // A single piece is the artist, the whole line the title
    let entry = CatalogEntry::from_line(4, Category::Standard, "Prince -");
    assert_eq!(entry.artist, "Prince");
    assert_eq!(entry.title, "Prince -");

    let entry = CatalogEntry::from_line(5, Category::Standard, "-Title");
    assert_eq!(entry.artist, "Title");
    assert_eq!(entry.title, "-Title");

    let entry = CatalogEntry::from_line(6, Category::Standard, "--Artist - Title");
    assert_eq!(entry.artist, "Artist");
    assert_eq!(entry.title, "Title");

    // A side that is blank after trimming falls back to the whole line
    let entry = CatalogEntry::from_line(7, Category::Standard, " - Title");
    assert_eq!(entry.artist, "- Title");
    assert_eq!(entry.title, "Title");
}

#[test]
fn test_catalog_entry_identity() {
    let a = CatalogEntry::from_line(5, Category::Standard, "Queen - Bohemian Rhapsody");
    let b = CatalogEntry::from_line(5, Category::Standard, "Someone - Else");
    let c = CatalogEntry::from_line(5, Category::Xmas, "Queen - Bohemian Rhapsody");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.search_term(), "Queen Bohemian Rhapsody");
}

#[test]
fn test_category_from_str() {
    assert_eq!("xmas".parse::<Category>(), Ok(Category::Xmas));
    assert_eq!("guilty-pleasure".parse::<Category>(), Ok(Category::GuiltyPleasure));
    assert_eq!("GUPL".parse::<Category>(), Ok(Category::GuiltyPleasure));
    assert!("jazz".parse::<Category>().is_err());
}
