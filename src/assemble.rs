/*!
 * Reassembly of translated phrases into the original string layout.
 *
 * Every non-phrase character of the source survives untouched; token spans
 * are replaced in ascending order while a running shift accounts for the
 * length difference between each phrase and its replacement.
 */

use crate::errors::AssembleError;
use crate::tokenizer::Token;

/// Splice the (possibly translated) phrase of each token back over its
/// source span.
///
/// Tokens must be supplied in ascending, non-overlapping source order, as
/// produced by [`crate::tokenizer::tokenize`]; anything else is a contract
/// violation and fails loudly. With identity phrases this reproduces
/// `source` exactly.
pub fn reassemble(source: &str, tokens: &[Token]) -> Result<String, AssembleError> {
    let mut out = String::with_capacity(source.len());
    out.push_str(source);

    // Running correction for the length drift of earlier substitutions.
    let mut shift: isize = 0;
    let mut prev_end = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        if token.start > token.end || token.end > source.len() {
            return Err(AssembleError::SpanOutOfBounds {
                start: token.start,
                end: token.end,
                len: source.len(),
            });
        }
        if index > 0 && token.start < prev_end {
            return Err(AssembleError::OutOfOrder { index });
        }

        let lo = (token.start as isize + shift) as usize;
        let hi = (token.end as isize + shift) as usize;
        if !out.is_char_boundary(lo) {
            return Err(AssembleError::NotCharBoundary { pos: token.start });
        }
        if !out.is_char_boundary(hi) {
            return Err(AssembleError::NotCharBoundary { pos: token.end });
        }

        out.replace_range(lo..hi, &token.phrase);
        shift += token.phrase.len() as isize - (token.end - token.start) as isize;
        prev_end = token.end;
    }

    Ok(out)
}
