use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use rand::{Rng, distr::Alphanumeric};

use crate::types::Category;

/// Random value tying an authorization callback to the request that opened it.
pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Extracts the card number from a scanned code.
///
/// A trailing run of digits wins. Without one, the last non-empty digit run
/// anywhere in the string is used. Zero and numbers that do not fit are
/// rejected.
pub fn extract_identifier(code: &str) -> Option<u32> {
    let trailing_start = code
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    let digits = match trailing_start {
        Some(start) => &code[start..],
        None => code
            .split(|c: char| !c.is_ascii_digit())
            .rfind(|part| !part.is_empty())?,
    };

    digits.parse::<u32>().ok().filter(|id| *id > 0)
}

/// Picks the song list from marker substrings; no marker means the standard list.
pub fn category_for_code(code: &str) -> Category {
    Category::ALL
        .into_iter()
        .find(|category| category.marker().is_some_and(|marker| code.contains(marker)))
        .unwrap_or_default()
}

pub fn parse_card(code: &str) -> Option<(Category, u32)> {
    let id = extract_identifier(code)?;
    Some((category_for_code(code), id))
}

/// Position at which playback starts, skipping the intro.
pub fn start_offset(duration: Duration, ratio: f64) -> Duration {
    if !ratio.is_finite() {
        return Duration::ZERO;
    }
    duration.mul_f64(ratio.clamp(0.0, 1.0))
}

/// Formats a playback position as `m:ss`.
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

/// Holds a busy flag for the lifetime of the guard.
///
/// Acquiring fails while the flag is already set. The flag is cleared on drop,
/// so early returns and cancelled futures release it as well.
pub struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
