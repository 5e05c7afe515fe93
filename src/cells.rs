//! Visible width of printed text.
//!
//! Lines produced by a printer carry zero-width control sequences around
//! styled segments. Indentation has to be computed from what the terminal
//! actually shows, so every measurement here strips those sequences first
//! and then sums Unicode cell widths.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

static VISIBLE_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// CSI sequences (`ESC [ ... final`) and OSC sequences terminated by BEL or ST.
static CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("valid regex")
});

/// Remove terminal control sequences from `text`.
///
/// Returns the input unchanged (borrowed) when it contains none.
#[must_use]
pub fn strip_control_codes(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    CONTROL_RE.replace_all(text, "")
}

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, CJK characters and some emoji are 2.
/// Control characters have 0 width.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_visible_width(text: &str) -> usize {
    strip_control_codes(text)
        .chars()
        .map(get_character_cell_size)
        .sum()
}

/// Visible cell width of `text`, ignoring control sequences.
///
/// Results for strings of 8+ bytes are kept in an LRU cache; printers
/// measure the same framed prefix on every multi-line call.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_visible_width(text);
    }

    if let Ok(mut cache) = VISIBLE_LEN_CACHE.lock() {
        if let Some(&cached) = cache.get(text) {
            return cached;
        }
    }

    let width = compute_visible_width(text);

    if let Ok(mut cache) = VISIBLE_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Visible cell width without touching the cache.
#[must_use]
pub fn visible_len_uncached(text: &str) -> usize {
    compute_visible_width(text)
}
