use crate::normalizer::{self, CONTINUATION};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::MAIN_SEPARATOR_STR;

lazy_static! {
    static ref CANONICAL_ENTRY: Regex =
        Regex::new(r"^((?:│   )*)(?:├── |└── )(.+)$").expect("a valid canonical entry pattern");
}

/// Number of canonical continuation tokens at the start of `prefix`, consumed
/// one four-column token at a time.
fn continuation_depth(prefix: &str) -> usize {
    let mut rest = prefix;
    let mut depth = 0;

    while let Some(stripped) = rest.strip_prefix(CONTINUATION) {
        depth += 1;
        rest = stripped;
    }

    depth
}

/// Turns a tree drawing into one path per entry.
///
/// The input is normalized first, then walked with a depth stack: the
/// stack holds the open ancestor chain, `stack[d]` being the latest name seen
/// at depth `d`. Each entry truncates the stack to its depth before pushing,
/// which drops the previous sibling's subtree.
///
/// Lines matching neither the bare root pattern nor the canonical entry
/// pattern are skipped; this never fails.
pub fn parse_tree(text: &str) -> Vec<String> {
    if !normalizer::is_canonical(text) {
        log::debug!("input is not canonical, normalizing tree glyphs");
    }
    let canonical = normalizer::normalize(text);

    let mut stack: Vec<String> = Vec::new();
    let mut has_root = false;
    let mut paths = Vec::new();

    for line in canonical.lines().filter(|line| !line.trim().is_empty()) {
        if !has_root && normalizer::is_root_line(line) {
            let root = line.trim().to_string();
            stack.clear();
            stack.push(root.clone());
            paths.push(root);
            has_root = true;
            continue;
        }

        let Some(caps) = CANONICAL_ENTRY.captures(line) else {
            log::debug!("skipping unparseable line: {:?}", line);
            continue;
        };

        let name = caps[2].trim();
        if name.is_empty() {
            continue;
        }

        let mut depth = continuation_depth(&caps[1]);
        if has_root {
            depth += 1;
        }
        // an entry deeper than the open chain hangs off its deepest ancestor
        let depth = depth.min(stack.len());

        stack.truncate(depth);
        stack.push(name.to_string());
        paths.push(stack.join(MAIN_SEPARATOR_STR));
    }

    paths
}

/// Every non-blank line is one path, separators passed through as written.
pub fn parse_flat(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(parts: &[&str]) -> String {
        parts.join(MAIN_SEPARATOR_STR)
    }

    #[test]
    fn test_tree_with_root() {
        let paths = parse_tree("a\n├── b\n│   └── c.txt\n└── d/");

        assert_eq!(
            paths,
            vec![
                "a".to_string(),
                joined(&["a", "b"]),
                joined(&["a", "b", "c.txt"]),
                joined(&["a", "d/"]),
            ]
        );
    }

    #[test]
    fn test_tree_without_root() {
        let paths = parse_tree("├── src\n│   ├── lib.rs\n│   └── main.rs\n└── Cargo.toml");

        assert_eq!(
            paths,
            vec![
                "src".to_string(),
                joined(&["src", "lib.rs"]),
                joined(&["src", "main.rs"]),
                "Cargo.toml".to_string(),
            ]
        );
    }

    #[test]
    fn test_sibling_subtree_is_discarded() {
        let paths = parse_tree(
            "root\n├── a\n│   └── deep\n│       └── deeper.txt\n└── b\n    └── leaf.txt",
        );

        assert_eq!(paths[4], joined(&["root", "b"]));
        assert!(paths.contains(&joined(&["root", "a", "deep", "deeper.txt"])));
        assert!(!paths.iter().any(|p| p.contains("deep") && p.contains("leaf")));
    }

    #[test]
    fn test_legacy_dashes_through_tree_parser() {
        let paths = parse_tree("root\n- child\n-- grandchild");

        assert_eq!(
            paths,
            vec![
                "root".to_string(),
                joined(&["root", "child"]),
                joined(&["root", "child", "grandchild"]),
            ]
        );
    }

    #[test]
    fn test_heavy_glyphs_through_tree_parser() {
        let paths = parse_tree("app\n┣━━ src\n┃   ┗━━ main.rs\n┗━━ README.md");

        assert_eq!(
            paths,
            vec![
                "app".to_string(),
                joined(&["app", "src"]),
                joined(&["app", "src", "main.rs"]),
                joined(&["app", "README.md"]),
            ]
        );
    }

    #[test]
    fn test_second_root_line_is_skipped() {
        let paths = parse_tree("one\n├── a\ntwo\n└── b");

        assert_eq!(
            paths,
            vec![
                "one".to_string(),
                joined(&["one", "a"]),
                joined(&["one", "b"]),
            ]
        );
    }

    #[test]
    fn test_depth_is_clamped_to_open_chain() {
        let paths = parse_tree("root\n│   │   └── orphan.txt");

        assert_eq!(paths, vec!["root".to_string(), joined(&["root", "orphan.txt"])]);
    }

    #[test]
    fn test_four_space_gap_nests_later_sibling_too_deep() {
        let paths = parse_tree(".\n└── b\n    ├── y\n    │   └── z\n    └── w");

        // `w` is drawn as a sibling of `y` but lands under it
        assert_eq!(
            paths,
            vec![
                ".".to_string(),
                joined(&[".", "b"]),
                joined(&[".", "b", "y"]),
                joined(&[".", "b", "y", "z"]),
                joined(&[".", "b", "y", "w"]),
            ]
        );
    }

    #[test]
    fn test_depth_stack_matches_nearest_ancestors() {
        let text = "r\n├── a\n│   ├── a1\n│   │   └── a1x\n│   └── a2\n├── b\n└── c\n│   └── c1";
        let lines: Vec<&str> = text.lines().collect();
        let paths = parse_tree(text);

        assert_eq!(paths.len(), lines.len());

        // rebuild each path from the nearest preceding shallower entries
        let depths: Vec<usize> = lines
            .iter()
            .map(|line| normalizer::analyze_line(line).map_or(0, |parsed| parsed.depth))
            .collect();
        for (i, path) in paths.iter().enumerate() {
            let mut expected = vec![];
            let mut wanted = depths[i];
            for j in (0..=i).rev() {
                if depths[j] == wanted {
                    let name = normalizer::analyze_line(lines[j]).map(|parsed| parsed.name);
                    expected.push(name.unwrap_or_default());
                    if wanted == 0 {
                        break;
                    }
                    wanted -= 1;
                }
            }
            expected.reverse();
            assert_eq!(path, &expected.join(MAIN_SEPARATOR_STR));
        }
    }

    #[test]
    fn test_round_trip_through_normalize() {
        let canonical = "r\n├── a\n│   └── b.txt\n└── c";

        assert_eq!(
            parse_tree(&normalizer::normalize(canonical)),
            parse_tree(canonical)
        );
    }

    #[test]
    fn test_parse_tree_never_fails_on_garbage() {
        assert!(parse_tree("").is_empty());
        assert!(parse_tree("   \n\t\n").is_empty());
        assert_eq!(parse_tree("│\n│\n└── x"), vec!["x".to_string()]);
    }

    #[test]
    fn test_flat_list() {
        let paths = parse_flat("  src/index.js \n\nREADME\n\t.gitignore\n");

        assert_eq!(paths, vec!["src/index.js", "README", ".gitignore"]);
    }

    #[test]
    fn test_flat_keeps_separators() {
        assert_eq!(parse_flat("a/b/\nc\\d"), vec!["a/b/", "c\\d"]);
    }
}
