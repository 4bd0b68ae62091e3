//! Word-boundary editing operations.
//!
//! These operate purely on a `(text, cursor)` snapshot and return a
//! `Replacement` for the caller to apply, so they compose with the undo stack
//! without touching buffer state themselves. Offsets are char offsets.
//!
//! Delimiter handling mirrors the erase semantics of the widget: scanning
//! backward from the cursor stops at the first delimiter, except that a run of
//! delimiters is collapsed so at most one survives. With delimiters `/` and
//! `.` (`|` marks the cursor):
//!
//! ```text
//! foo/bar.baz|  ->  foo/bar.
//! foo/...bar|   ->  foo/
//! ```

use tracing::trace;

/// A pure text transformation: the full new text plus the new cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub cursor: usize,
}

/// The word under the cursor, as an inclusive char-offset span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
    pub word: String,
}

/// Erase the word before the cursor using the plain delimiter set.
pub fn erase_word(text: &str, cursor: usize, delimiters: &[char]) -> Option<Replacement> {
    erase_delimited(text, cursor, delimiters, false)
}

/// Erase the big-word before the cursor: same backward scan, but an
/// uppercase-to-non-uppercase transition also counts as a boundary, so a
/// camelCase tail erases one hump at a time.
pub fn erase_big_word(text: &str, cursor: usize, delimiters: &[char]) -> Option<Replacement> {
    erase_delimited(text, cursor, delimiters, true)
}

fn erase_delimited(
    text: &str,
    cursor: usize,
    delimiters: &[char],
    caps_boundary: bool,
) -> Option<Replacement> {
    if cursor == 0 {
        return None;
    }
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    if cursor == 0 {
        return None;
    }
    let end = cursor - 1;

    let mut start = end;
    while start > 0 {
        let next = chars[start - 1];
        if caps_boundary && chars[start].is_uppercase() && !next.is_uppercase() {
            break;
        }
        if delimiters.contains(&next) {
            if start == 1 {
                break;
            }
            // Collapse a delimiter run: only stop once the run is about to
            // end, so erasing through `foo/...bar` leaves `foo/`.
            if !delimiters.contains(&chars[start - 2]) {
                break;
            }
        }
        start -= 1;
    }

    trace!(
        target: "text.boundary",
        start,
        end,
        erased = end - start + 1,
        "erase_span"
    );
    Some(splice(&chars, start, end, ""))
}

/// Find the word under the cursor: scan backward to the nearest delimiter,
/// then forward from there to the next one. Both bounds are inclusive.
pub fn word_under_cursor(text: &str, cursor: usize, delimiters: &[char]) -> WordSpan {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let start = scan(&chars, cursor, -1, delimiters);
    let end = scan(&chars, start, 1, delimiters);
    let word = if start < chars.len() {
        chars[start..=end.min(chars.len() - 1)].iter().collect()
    } else {
        String::new()
    };
    WordSpan { start, end, word }
}

/// Cyclic prefix toggle over the word under the cursor (single-space
/// delimiter). With patterns `[p0, p1, …, pn]` the word cycles through
/// `word -> p0 word -> p1 word -> … -> pn word -> word`. Returns `None` when
/// no patterns are configured.
pub fn alternate_pattern(
    text: &str,
    cursor: usize,
    pattern_types: &[String],
) -> Option<Replacement> {
    if pattern_types.is_empty() {
        return None;
    }
    let span = word_under_cursor(text, cursor, &[' ']);
    let matched = pattern_types
        .iter()
        .position(|p| !p.is_empty() && span.word.starts_with(p.as_str()));
    let (current, next) = match matched {
        Some(i) => (
            pattern_types[i].as_str(),
            pattern_types.get(i + 1).map(String::as_str).unwrap_or(""),
        ),
        None => ("", pattern_types[0].as_str()),
    };
    let new_word = format!("{next}{}", &span.word[current.len()..]);
    let chars: Vec<char> = text.chars().collect();
    Some(splice(&chars, span.start, span.end, &new_word))
}

/// Walk from `index` in `step` direction (+1/-1) while the next char is not a
/// delimiter; returns the last non-delimited index reached.
fn scan(chars: &[char], index: usize, step: isize, delimiters: &[char]) -> usize {
    let mut index = index as isize;
    loop {
        let probe = index + step;
        if probe < 0 || probe >= chars.len() as isize {
            break;
        }
        if delimiters.contains(&chars[probe as usize]) {
            break;
        }
        index = probe;
    }
    index as usize
}

/// Replace the inclusive char range `start..=end` with `replacement`,
/// positioning the cursor just after the replacement.
fn splice(chars: &[char], start: usize, end: usize, replacement: &str) -> Replacement {
    let mut text: String = chars[..start.min(chars.len())].iter().collect();
    text.push_str(replacement);
    if end + 1 < chars.len() {
        text.extend(&chars[end + 1..]);
    }
    Replacement {
        text,
        cursor: start + replacement.chars().count(),
    }
}
