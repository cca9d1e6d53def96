/*!
 * Marker catalog for the tokenizer.
 *
 * The tokenizer is driven entirely by this table: each entry maps an
 * opening marker to its required closer and says whether the interior is
 * opaque (scanned only for the closer, never tokenized). Keeping the
 * table separate makes the transition rules testable on their own.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Zero-width space. Text wrapped in a pair of these bypasses translation
/// entirely and survives in the output byte for byte.
pub const ESCAPE_MARKER: &str = "\u{200b}";

/// One recognized marker: opener, required closer, and scanning behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    /// The opening marker text
    pub opener: &'static str,
    /// The closing marker text (the opener itself for symmetric markers)
    pub closer: &'static str,
    /// Whether the interior is excluded from tokenization
    pub opaque: bool,
    /// Whether an annotation tag may follow the opener up to a line break
    pub fenced: bool,
}

// Ordered by opener length so a linear probe yields the longest match
// (``` before `, ** before *).
const CATALOG: &[MarkerSpec] = &[
    MarkerSpec { opener: "```", closer: "```", opaque: false, fenced: true },
    MarkerSpec { opener: "**", closer: "**", opaque: false, fenced: false },
    MarkerSpec { opener: "__", closer: "__", opaque: false, fenced: false },
    MarkerSpec { opener: "*", closer: "*", opaque: false, fenced: false },
    MarkerSpec { opener: "_", closer: "_", opaque: false, fenced: false },
    MarkerSpec { opener: "`", closer: "`", opaque: false, fenced: false },
    MarkerSpec { opener: "<", closer: ">", opaque: true, fenced: false },
    MarkerSpec { opener: ESCAPE_MARKER, closer: ESCAPE_MARKER, opaque: true, fenced: false },
];

/// Fence annotations recognized as part of the opening marker. An unknown
/// annotation is ordinary interior text.
static FENCE_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "asm", "bash", "c", "clj", "cmake", "cpp", "cs", "css", "dart", "diff",
        "dockerfile", "elixir", "erlang", "ex", "fs", "go", "gradle", "groovy",
        "haskell", "hs", "html", "ini", "java", "javascript", "jl", "js",
        "json", "jsx", "kotlin", "kt", "latex", "lua", "makefile", "markdown",
        "md", "nim", "objc", "perl", "php", "pl", "powershell", "prolog",
        "properties", "proto", "ps1", "py", "python", "r", "rb", "ruby", "rs",
        "rust", "scala", "scss", "sh", "shell", "sql", "swift", "tex", "toml",
        "ts", "tsx", "txt", "typescript", "vb", "xml", "yaml", "yml", "zig",
    ]
    .into_iter()
    .collect()
});

/// A marker recognized at some byte offset in a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    /// The catalog entry that matched
    pub spec: &'static MarkerSpec,
    /// Total marker length in bytes, fence annotation included
    pub len: usize,
}

/// Recognize the longest catalog marker starting at byte offset `at`.
///
/// Returns `None` when no marker starts there; the caller treats the
/// character as ordinary text. `at` must lie on a character boundary.
pub fn match_marker(source: &str, at: usize) -> Option<MarkerMatch> {
    let rest = &source[at..];
    for spec in CATALOG {
        if !rest.starts_with(spec.opener) {
            continue;
        }
        let mut len = spec.opener.len();
        if spec.fenced {
            let tail = &rest[len..];
            let tag_end = tail.find('\n').unwrap_or(tail.len());
            let tag = tail[..tag_end].trim_end_matches('\r');
            if !tag.is_empty() && FENCE_TAGS.contains(tag) {
                len += tag_end;
            }
        }
        return Some(MarkerMatch { spec, len });
    }
    None
}

/// Whether a fence annotation is in the recognized set.
pub fn is_fence_tag(tag: &str) -> bool {
    FENCE_TAGS.contains(tag)
}
