//! Rewrites any supported tree drawing into the canonical grammar.
//!
//! Several glyph families are accepted (light, heavy, double and dashed box
//! drawing, plus legacy `-`/`--` prefixes) together with irregular
//! indentation. The canonical grammar uses:
//!
//! - [`CONTINUATION`] (`│   `) for every ancestor column,
//! - [`BRANCH`] (`├── `) for an entry followed by a sibling,
//! - [`LAST_BRANCH`] (`└── `) for the final entry at its depth.
//!
//! Normalization runs in two passes: the first derives `(depth, name)` from
//! each line on its own, the second derives `is_last` from the sequence.
use lazy_static::lazy_static;
use regex::Regex;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const CONTINUATION: &str = "│   ";

pub(crate) const BRANCH_GLYPHS: &str = "├┣┠┝┞┟┡┢╟╠╞";
pub(crate) const LAST_BRANCH_GLYPHS: &str = "└┗┖┕┺┻┸┹╚╘";
pub(crate) const CONTINUATION_GLYPHS: &str = "│┃┆┇┊┋║╎╏";
pub(crate) const HORIZONTAL_GLYPHS: &str = "─━┄┅┈┉╌╍═";

const INDENT_SIZE: usize = 3;
const TAB_WIDTH: &str = "    ";

lazy_static! {
    static ref BOX_LINE: Regex = Regex::new(&format!(
        r"^((?:[{cont}]|\s)*)([{branch}{last}])[{horizontal}]*\s*(.+)$",
        cont = CONTINUATION_GLYPHS,
        branch = BRANCH_GLYPHS,
        last = LAST_BRANCH_GLYPHS,
        horizontal = HORIZONTAL_GLYPHS,
    ))
    .expect("a valid box-drawing line pattern");
    static ref LEGACY_LINE: Regex =
        Regex::new(r"^( *)(-+)\s*(.+)$").expect("a valid legacy dash line pattern");
    static ref ROOT_LINE: Regex = Regex::new(&format!(
        r"^[^\s\-{cont}{branch}{last}{horizontal}].*$",
        cont = CONTINUATION_GLYPHS,
        branch = BRANCH_GLYPHS,
        last = LAST_BRANCH_GLYPHS,
        horizontal = HORIZONTAL_GLYPHS,
    ))
    .expect("a valid root line pattern");
    static ref CANONICAL_BRANCH_LINE: Regex =
        Regex::new(r"^(?:│   )*(?:├──|└──) ").expect("a valid canonical line pattern");
    static ref NON_CANONICAL_GLYPH: Regex = Regex::new(
        r"[┣┠┝┞┟┡┢╟╠╞┗┖┕┺┻┸┹╚╘┃┆┇┊┋║╎╏━┄┅┈┉╌╍═]"
    )
    .expect("a valid non-canonical glyph pattern");
}

/// One entry of a tree drawing after the first normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Nesting level, `0` for a root line.
    pub depth: usize,
    /// Entry name, trimmed and never empty.
    pub name: String,
    /// Whether no later sibling follows at the same depth.
    pub is_last: bool,
}

fn is_continuation(c: char) -> bool {
    CONTINUATION_GLYPHS.contains(c)
}

fn is_last_branch(c: char) -> bool {
    LAST_BRANCH_GLYPHS.contains(c)
}

/// Tabs become four columns and the non-breaking spaces `tree` emits inside
/// its continuation columns become plain spaces.
fn expand_whitespace(line: &str) -> String {
    line.replace('\t', TAB_WIDTH).replace('\u{a0}', " ")
}

/// Depth contributed by the glyph/indentation prefix that precedes a
/// branch glyph.
fn prefix_depth(prefix: &str) -> usize {
    let chars: Vec<char> = prefix.chars().collect();
    let mut depth = 0;
    let mut i = 0;

    while i < chars.len() {
        if is_continuation(chars[i]) {
            depth += 1;
            i += 1;

            let start = i;
            while i < chars.len() && chars[i] == ' ' {
                i += 1;
            }
            let spaces = i - start;
            if spaces > INDENT_SIZE {
                depth += (spaces - 2) / INDENT_SIZE;
            }
        } else if chars[i] == ' ' {
            let start = i;
            while i < chars.len() && chars[i] == ' ' {
                i += 1;
            }
            let spaces = i - start;
            if spaces >= INDENT_SIZE {
                depth += spaces.div_ceil(INDENT_SIZE);
            }
        } else {
            i += 1;
        }
    }

    depth
}

/// First pass over a single line. Returns `None` for lines that carry no
/// entry (blank lines, bare continuation columns, glyph-less indented text).
pub fn analyze_line(line: &str) -> Option<ParsedLine> {
    if line.trim().is_empty() {
        return None;
    }

    let line = expand_whitespace(line);

    let (depth, name, is_last) = if let Some(caps) = BOX_LINE.captures(&line) {
        let glyph = caps[2].chars().next().unwrap_or_default();
        let name = caps.get(3).map_or("", |m| m.as_str()).trim();
        (prefix_depth(&caps[1]) + 1, name, is_last_branch(glyph))
    } else if let Some(caps) = LEGACY_LINE.captures(&line) {
        let depth = caps[1].len() / INDENT_SIZE + caps[2].len();
        (depth, caps.get(3).map_or("", |m| m.as_str()).trim(), false)
    } else if ROOT_LINE.is_match(&line) {
        (0, line.trim(), false)
    } else {
        return None;
    };

    if name.is_empty() {
        return None;
    }

    Some(ParsedLine {
        depth,
        name: name.to_string(),
        is_last,
    })
}

/// Whether the line is a bare root entry: no leading whitespace, dash or
/// box-drawing glyph.
pub(crate) fn is_root_line(line: &str) -> bool {
    ROOT_LINE.is_match(line)
}

/// Second pass: an entry is last when the next entry at a depth less than or
/// equal to its own is shallower (or there is none).
pub fn mark_last_siblings(lines: &mut [ParsedLine]) {
    for i in 0..lines.len() {
        let depth = lines[i].depth;
        lines[i].is_last = lines[i + 1..]
            .iter()
            .find(|next| next.depth <= depth)
            .map_or(true, |next| next.depth < depth);
    }
}

fn canonical_line(line: &ParsedLine) -> String {
    if line.depth == 0 {
        return line.name.clone();
    }

    let mut out = CONTINUATION.repeat(line.depth - 1);
    out.push_str(if line.is_last { LAST_BRANCH } else { BRANCH });
    out.push_str(&line.name);
    out
}

/// Runs both passes and returns the structural view of `input`.
pub fn parse_lines(input: &str) -> Vec<ParsedLine> {
    let mut parsed: Vec<ParsedLine> = input.lines().filter_map(analyze_line).collect();
    mark_last_siblings(&mut parsed);
    parsed
}

/// Rewrites `input` into the canonical tree grammar.
///
/// Input in which every entry sits at depth 0 (a plain path list) is
/// returned untouched, so `normalize(normalize(x)) == normalize(x)` holds for
/// every input.
pub fn normalize(input: &str) -> String {
    let parsed = parse_lines(input);

    if parsed.iter().all(|line| line.depth == 0) {
        return input.to_string();
    }

    log::debug!("normalized {} tree lines", parsed.len());

    parsed
        .iter()
        .map(canonical_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether every tree line of `input` already uses the canonical glyphs and
/// four-column units.
pub fn is_canonical(input: &str) -> bool {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| {
            if NON_CANONICAL_GLYPH.is_match(line) || LEGACY_LINE.is_match(line) {
                return false;
            }
            if line.contains('├') || line.contains('└') {
                return CANONICAL_BRANCH_LINE.is_match(line);
            }
            true
        })
}
