use std::{fmt, path::is_separator};

/// Extensionless names that are files rather than directories.
const KNOWN_FILES: &[&str] = &[
    // build
    "Makefile",
    "GNUmakefile",
    "Dockerfile",
    "Containerfile",
    "Jenkinsfile",
    "Vagrantfile",
    "Procfile",
    "Gemfile",
    "Rakefile",
    "Brewfile",
    "Justfile",
    "Podfile",
    // docs
    "LICENSE",
    "LICENCE",
    "COPYING",
    "NOTICE",
    "AUTHORS",
    "CONTRIBUTORS",
    "CODEOWNERS",
    "README",
    "CHANGELOG",
    "CONTRIBUTING",
    // dotfiles
    ".gitignore",
    ".gitattributes",
    ".gitkeep",
    ".gitmodules",
    ".dockerignore",
    ".npmignore",
    ".npmrc",
    ".nvmrc",
    ".editorconfig",
    ".env",
    ".envrc",
    ".babelrc",
    ".eslintrc",
    ".prettierrc",
    ".prettierignore",
    ".htaccess",
    ".bashrc",
    ".zshrc",
    ".profile",
];

/// What a planned path turns into on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}
impl EntryKind {
    fn as_str(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}
impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `.` after the first character with at least one character behind it.
fn has_extension(name: &str) -> bool {
    name.char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < name.len())
}

fn is_known_file(name: &str) -> bool {
    KNOWN_FILES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// Decides whether `path` denotes a file or a directory.
///
/// A trailing separator always means a directory. Otherwise the final
/// component is a file when it carries an extension or is one of the
/// well-known extensionless file names; anything else is a directory.
pub fn classify(path: &str) -> EntryKind {
    if path.ends_with(is_separator) {
        return EntryKind::Directory;
    }

    let name = path.rsplit(is_separator).next().unwrap_or(path);

    if has_extension(name) || is_known_file(name) {
        EntryKind::File
    } else {
        EntryKind::Directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_separator_is_directory() {
        assert_eq!(classify("src/"), EntryKind::Directory);
        assert_eq!(classify("assets.v2/"), EntryKind::Directory);
        assert_eq!(classify("LICENSE/"), EntryKind::Directory);
    }

    #[test]
    fn test_extension_is_file() {
        assert_eq!(classify("src/index.js"), EntryKind::File);
        assert_eq!(classify("archive.tar.gz"), EntryKind::File);
        assert_eq!(classify(".env.local"), EntryKind::File);
    }

    #[test]
    fn test_known_names_are_files() {
        assert_eq!(classify("LICENSE"), EntryKind::File);
        assert_eq!(classify("docker/Dockerfile"), EntryKind::File);
        assert_eq!(classify("makefile"), EntryKind::File);
        assert_eq!(classify(".gitignore"), EntryKind::File);
        assert_eq!(classify("config/.env"), EntryKind::File);
        assert_eq!(classify("README"), EntryKind::File);
    }

    #[test]
    fn test_everything_else_is_directory() {
        assert_eq!(classify("src"), EntryKind::Directory);
        assert_eq!(classify("a/b/c"), EntryKind::Directory);
        assert_eq!(classify(".github"), EntryKind::Directory);
        assert_eq!(classify("trailing."), EntryKind::Directory);
    }

    #[test]
    fn test_display() {
        assert_eq!(EntryKind::File.to_string(), "file");
        assert_eq!(EntryKind::Directory.to_string(), "directory");
    }
}
