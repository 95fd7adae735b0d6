//! Greedy word wrapping for paragraph layout.
//!
//! Words are whitespace-separated tokens; newlines and the literal `<br>`
//! token force a line flush. A word wider than the line is hard-split into
//! line-width chunks, which guarantees termination regardless of content.
//! All widths are visible widths: embedded escape sequences never consume
//! layout width, and splitting never lands inside an escape sequence.

use unicode_segmentation::UnicodeSegmentation;

use super::measure::{escape_end, grapheme_width, visible_width};

/// Forces a line flush without contributing content.
const LINE_BREAK_TOKEN: &str = "<br>";

/// Wrap `text` into lines of visible width at most `max_width`.
///
/// Greedy fill: each word goes on the current line if it fits (with one
/// joining space when the line is non-empty), otherwise the line is flushed
/// and the word starts the next one. Oversized words are hard-split into
/// chunks of exactly `max_width` (the final remainder may be narrower).
///
/// `max_width < 1` returns the whitespace-normalized text as a single line;
/// there is no width to enforce.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_width == 0 {
        return vec![text.split_whitespace().collect::<Vec<_>>().join(" ")];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    let flush = |current: &mut String, current_width: &mut usize, lines: &mut Vec<String>| {
        lines.push(std::mem::take(current));
        *current_width = 0;
    };

    for raw_line in text.split('\n') {
        for word in raw_line.split_whitespace() {
            if word == LINE_BREAK_TOKEN {
                flush(&mut current, &mut current_width, &mut lines);
                continue;
            }

            let word_width = visible_width(word);

            if word_width > max_width {
                // Hard split. Whatever is on the current line is flushed
                // first so chunks start at column zero.
                if !current.is_empty() {
                    flush(&mut current, &mut current_width, &mut lines);
                }
                hard_split(word, max_width, &mut lines, &mut current, &mut current_width);
                continue;
            }

            let joined = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if joined > max_width {
                flush(&mut current, &mut current_width, &mut lines);
                current.push_str(word);
                current_width = word_width;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
            }
        }

        flush(&mut current, &mut current_width, &mut lines);
    }

    lines
}

/// Split an oversized word into `max_width`-wide chunks. The remainder stays
/// in `current` as the new current line.
fn hard_split(
    word: &str,
    max_width: usize,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for seg in segments(word) {
        match seg {
            Segment::Escape(esc) => current.push_str(esc),
            Segment::Grapheme(g, w) => {
                if *current_width + w > max_width && *current_width > 0 {
                    lines.push(std::mem::take(current));
                    *current_width = 0;
                }
                current.push_str(g);
                *current_width += w;
            }
        }
    }
}

enum Segment<'a> {
    /// A complete escape sequence; zero visible width, never split.
    Escape(&'a str),
    Grapheme(&'a str, usize),
}

/// Decompose a word into escape sequences and grapheme clusters.
fn segments(word: &str) -> Vec<Segment<'_>> {
    let bytes = word.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == 0x1B {
            let end = escape_end(bytes, i);
            out.push(Segment::Escape(&word[i..end]));
            i = end;
        } else {
            let start = i;
            while i < bytes.len() && bytes[i] != 0x1B {
                i += 1;
            }
            for g in word[start..i].graphemes(true) {
                out.push(Segment::Grapheme(g, grapheme_width(g)));
            }
        }
    }

    out
}

/// Number of lines `text` occupies when wrapped to `max_width`.
pub fn measure_height(text: &str, max_width: usize) -> usize {
    wrap_text(text, max_width).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_no_lines() {
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn greedy_fill_breaks_between_words() {
        assert_eq!(wrap_text("one two three four", 9), vec!["one two", "three", "four"]);
    }

    #[test]
    fn oversized_word_hard_splits_at_exact_width() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn br_token_forces_flush() {
        assert_eq!(wrap_text("a <br> b", 20), vec!["a", "b"]);
        // A <br> at the start yields an empty leading line.
        assert_eq!(wrap_text("<br> x", 20), vec!["", "x"]);
    }

    #[test]
    fn newline_forces_flush() {
        assert_eq!(wrap_text("a\nb", 20), vec!["a", "b"]);
    }

    #[test]
    fn escape_sequences_take_no_width() {
        let lines = wrap_text("\x1b[31mred\x1b[0m and blue", 8);
        for line in &lines {
            assert!(visible_width(line) <= 8, "line too wide: {line:?}");
        }
        assert_eq!(lines.len(), 2);
        assert_eq!(visible_width(&lines[0]), 7); // "red and"
    }

    #[test]
    fn width_bound_holds_for_all_lines() {
        let text = "the quick brown fox incomprehensibilities jumps over the lazy dog";
        for max in 1..=20 {
            for line in wrap_text(text, max) {
                assert!(
                    visible_width(&line) <= max,
                    "width {max}: line {line:?} too wide"
                );
            }
        }
    }

    #[test]
    fn rewrapping_wrapped_text_is_identity() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for max in [8, 12, 25] {
            let once = wrap_text(text, max);
            let again = wrap_text(&once.join("\n"), max);
            assert_eq!(once, again, "width {max}");
        }
    }

    #[test]
    fn wide_chars_count_double() {
        assert_eq!(wrap_text("你好 世界", 4), vec!["你好", "世界"]);
    }

    #[test]
    fn measure_matches_wrap() {
        let text = "alpha beta gamma delta";
        assert_eq!(measure_height(text, 11), wrap_text(text, 11).len());
    }
}
