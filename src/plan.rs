use crate::{
    classifier::{classify, EntryKind},
    detector::{self, InputFormat},
    parser,
};
use std::path::{Path, PathBuf};

/// A parsed path together with what it should become on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPath {
    /// Path relative to the destination directory.
    pub path: PathBuf,
    /// Whether the entry is created as a file or a directory.
    pub kind: EntryKind,
    /// Component count, the sort key that puts parents before children.
    pub depth: usize,
}
impl ClassifiedPath {
    pub fn new(raw: &str) -> Self {
        let path = PathBuf::from(raw);
        let depth = path.components().count();

        Self {
            kind: classify(raw),
            path,
            depth,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// The ordered list of entries handed to the materializer.
///
/// Entries are sorted by ascending depth; the sort is stable, so entries at
/// the same depth keep their input order.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub entries: Vec<ClassifiedPath>,
}
impl Plan {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<ClassifiedPath> = paths
            .into_iter()
            .map(|raw| ClassifiedPath::new(raw.as_ref()))
            .collect();

        entries.sort_by_key(|entry| entry.depth);

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedPath> {
        self.entries.iter()
    }

    /// Looks up the entry planned for `path`, if any.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&ClassifiedPath> {
        let path = path.as_ref();
        self.entries.iter().find(|entry| entry.path == path)
    }
}

/// Runs the whole text-to-plan pipeline: detection, parsing, classification
/// and depth sorting. Blank input yields an empty plan.
pub fn plan(text: &str) -> Plan {
    let format = detector::detect(text);

    let paths = match format {
        InputFormat::Tree => parser::parse_tree(text),
        InputFormat::Flat => parser::parse_flat(text),
    };

    log::debug!("parsed {} paths from {:?} input", paths.len(), format);

    Plan::from_paths(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(plan: &Plan) -> Vec<(PathBuf, EntryKind)> {
        plan.iter()
            .map(|entry| (entry.path.clone(), entry.kind))
            .collect()
    }

    #[test]
    fn test_tree_scenario() {
        let plan = plan("a\n├── b\n│   └── c.txt\n└── d/");

        assert_eq!(
            kinds(&plan),
            vec![
                (PathBuf::from("a"), EntryKind::Directory),
                (PathBuf::from("a/b"), EntryKind::Directory),
                (PathBuf::from("a/d"), EntryKind::Directory),
                (PathBuf::from("a/b/c.txt"), EntryKind::File),
            ]
        );
    }

    #[test]
    fn test_flat_scenario() {
        let plan = plan("src/index.js\nREADME\n.gitignore");

        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(ClassifiedPath::is_file));
        assert_eq!(plan.entries[0].path, PathBuf::from("README"));
        assert_eq!(plan.entries[2].path, PathBuf::from("src/index.js"));
    }

    #[test]
    fn test_dash_only_input_is_flat() {
        let plan = plan("root\n- child\n-- grandchild");

        assert!(plan.get("root").is_some());
        assert!(plan.get("- child").is_some());
        assert!(plan.get("root/child").is_none());
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(plan("").is_empty());
        assert!(plan(" \n\t\n  ").is_empty());
    }

    #[test]
    fn test_parents_come_before_children() {
        let plan = plan("x/y/z.txt\nx/\nx/y/\nw.md\nx/y/q/");

        for (i, entry) in plan.iter().enumerate() {
            for ancestor in entry.path.ancestors().skip(1) {
                if let Some(position) = plan.entries.iter().position(|e| e.path == ancestor) {
                    assert!(position < i, "{:?} after {:?}", ancestor, entry.path);
                }
            }
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let plan = Plan::from_paths(["b/2", "a", "b/1", "c"]);
        let order: Vec<&Path> = plan.iter().map(|entry| entry.path.as_path()).collect();

        assert_eq!(
            order,
            vec![
                Path::new("a"),
                Path::new("c"),
                Path::new("b/2"),
                Path::new("b/1")
            ]
        );
    }
}
