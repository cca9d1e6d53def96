/*!
 * Markup-aware phrase tokenizer.
 *
 * Splits a formatted message into translatable phrases while leaving every
 * structural character (emphasis markers, code fences, bracketed references,
 * escape wrappers) exactly where it is. A single left-to-right pass drives
 * an explicit frame stack; marker recognition is data-driven through the
 * catalog in [`crate::markup`].
 *
 * The output spans are byte offsets into the original string, suitable for
 * back-substitution with [`crate::assemble::reassemble`].
 */

use crate::markup::{self, MarkerSpec};

/// A translatable phrase cut from a source string.
///
/// `phrase` equals `source[start..end]` at creation time; the dispatcher
/// replaces it with translated text while keeping the span untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the first phrase character in the source
    pub start: usize,
    /// Byte offset one past the last phrase character
    pub end: usize,
    /// The extracted phrase text
    pub phrase: String,
}

impl Token {
    /// Create a token over an explicit span.
    pub fn new(start: usize, end: usize, phrase: impl Into<String>) -> Self {
        Self {
            start,
            end,
            phrase: phrase.into(),
        }
    }
}

/// One unclosed opening construct during the scan.
enum Frame {
    /// Implicit run of plain text. Only ever the sole stack entry.
    Phrase { start: usize },
    /// An unclosed marker and the position just past its opener.
    Markup {
        spec: &'static MarkerSpec,
        start: usize,
    },
}

/// Split `source` into translatable phrases.
///
/// Pure function of the marker catalog and the input: no side effects,
/// deterministic, O(n) in the input length. Tokens come out in source
/// order, strictly ascending and non-overlapping. Malformed markup is never
/// an error: unmatched openers flush at end of input, and an unterminated
/// opaque marker swallows the rest of the string.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut tokens: Vec<Token> = Vec::new();
    // Emitted spans never reach back across this boundary; it advances with
    // every emission so spans from nested frames cannot overlap.
    let mut floor = 0usize;

    let emit = |tokens: &mut Vec<Token>, floor: &mut usize, start: usize, end: usize| {
        let start = start.max(*floor);
        if start >= end {
            return;
        }
        let (ts, te) = trim_span(source, start, end);
        if ts >= te {
            return;
        }
        tokens.push(Token::new(ts, te, &source[ts..te]));
        *floor = end;
    };

    let mut i = 0usize;
    while i < source.len() {
        // Inside an opaque frame only the matching closer matters.
        if let Some(Frame::Markup { spec, .. }) = stack.last() {
            if spec.opaque {
                match source[i..].find(spec.closer) {
                    Some(off) => {
                        i += off + spec.closer.len();
                        stack.pop();
                        continue;
                    }
                    None => {
                        // Unterminated escape swallows the remainder.
                        return tokens;
                    }
                }
            }
        }

        let c = match source[i..].chars().next() {
            Some(c) => c,
            None => break,
        };

        // A line break ends a running bare phrase.
        if c == '\n' {
            if let Some(Frame::Phrase { start }) = stack.last() {
                let start = *start;
                stack.pop();
                emit(&mut tokens, &mut floor, start, i);
            }
            i += 1;
            continue;
        }

        if let Some(m) = markup::match_marker(source, i) {
            // The marker interrupts a running phrase.
            if let Some(Frame::Phrase { start }) = stack.last() {
                let start = *start;
                stack.pop();
                emit(&mut tokens, &mut floor, start, i);
            }

            let text = &source[i..i + m.len];
            let closes = matches!(
                stack.last(),
                Some(Frame::Markup { spec, .. }) if spec.closer == text
            );
            if closes {
                if let Some(Frame::Markup { spec, start }) = stack.pop() {
                    if !spec.opaque {
                        emit(&mut tokens, &mut floor, start, i);
                    }
                }
            } else {
                stack.push(Frame::Markup {
                    spec: m.spec,
                    start: i + m.len,
                });
            }
            i += m.len;
            continue;
        }

        if stack.is_empty() && !c.is_whitespace() {
            stack.push(Frame::Phrase { start: i });
        }
        i += c.len_utf8();
    }

    // Lenient end of input: the visible frame flushes without its closer.
    match stack.pop() {
        Some(Frame::Phrase { start }) => emit(&mut tokens, &mut floor, start, source.len()),
        Some(Frame::Markup { spec, start }) if !spec.opaque => {
            emit(&mut tokens, &mut floor, start, source.len());
        }
        _ => {}
    }

    tokens
}

/// Shrink a span so the phrase neither starts nor ends with punctuation or
/// whitespace. A trailing question mark is kept: it carries meaning the
/// translation needs.
fn trim_span(source: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end {
        match source[start..end].chars().next() {
            Some(c) if is_trimmable(c) => start += c.len_utf8(),
            _ => break,
        }
    }
    while end > start {
        match source[start..end].chars().next_back() {
            Some(c) if c != '?' && is_trimmable(c) => end -= c.len_utf8(),
            _ => break,
        }
    }
    (start, end)
}

fn is_trimmable(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_whitespace()
}
