use crate::normalizer::{BRANCH_GLYPHS, CONTINUATION_GLYPHS, LAST_BRANCH_GLYPHS};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TREE_GLYPH: Regex = Regex::new(&format!(
        "[{}{}{}]",
        BRANCH_GLYPHS, LAST_BRANCH_GLYPHS, CONTINUATION_GLYPHS
    ))
    .expect("a valid tree glyph pattern");
}

/// The two input shapes the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A box-drawing tree, handled by [`crate::parser::parse_tree`].
    Tree,
    /// One path per line, handled by [`crate::parser::parse_flat`].
    Flat,
}

/// Whether a single line carries a branch, last-branch or continuation glyph.
pub fn is_tree_line(line: &str) -> bool {
    TREE_GLYPH.is_match(line)
}

/// Returns `true` when at least one line contains a box-drawing glyph.
///
/// Legacy dash prefixes (`- name`, `-- name`) never select tree mode on their
/// own, even though the normalizer understands them once a real glyph has
/// selected it.
pub fn looks_like_tree<'a, I>(lines: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().any(is_tree_line)
}

/// Picks the parser family for the whole input; the choice is never made per line.
pub fn detect(text: &str) -> InputFormat {
    if looks_like_tree(text.lines()) {
        InputFormat::Tree
    } else {
        InputFormat::Flat
    }
}
