//! Exclusion patterns for sync
//!
//! Ordered, duplicate-free pattern sets and VCS ignore file harvesting.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Exclude patterns in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    seen: HashSet<String>,
}

impl ExcludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern unless it is already present.
    pub fn insert(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if self.seen.insert(pattern.clone()) {
            self.patterns.push(pattern);
        }
    }

    /// Add every pattern, keeping the first occurrence of each.
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.insert(pattern);
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.seen.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.patterns
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Split ignore file contents into patterns.
///
/// Blank lines and `#` comments are dropped, the rest is trimmed.
pub fn parse_ignore_patterns(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read patterns from an ignore file. A missing file yields no patterns.
pub fn read_ignore_file(path: &Path) -> io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_ignore_patterns(&contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_kept() {
        let set: ExcludeSet = ["env", ".git", "env", "build", ".git"].into_iter().collect();
        assert_eq!(set.into_vec(), vec!["env", ".git", "build"]);
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = ExcludeSet::new();
        assert!(set.is_empty());

        set.insert("target");
        set.insert("target");
        assert_eq!(set.len(), 1);
        assert!(set.contains("target"));
        assert!(!set.contains("build"));
    }

    #[test]
    fn test_ignore_file_parsing() {
        let patterns = parse_ignore_patterns(
            "\n# comment\n# Comment\n*.pattern\n\n   # indented comment\n\n  pattern_two  \n\n",
        );
        assert_eq!(patterns, vec!["*.pattern", "pattern_two"]);
    }

    #[test]
    fn test_missing_ignore_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let patterns = read_ignore_file(&dir.path().join(".gitignore")).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_read_ignore_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# Comment").unwrap();
        writeln!(file, "*.tmp").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  build/  ").unwrap();

        let patterns = read_ignore_file(file.path()).unwrap();
        assert_eq!(patterns, vec!["*.tmp", "build/"]);
    }
}
