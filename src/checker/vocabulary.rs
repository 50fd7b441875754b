use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Small, fixed, lower-cased word list that backs local spell checks.
///
/// Iteration follows insertion order, which decides ties between equally
/// close suggestions.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        vocabulary.extend(words);
        vocabulary
    }

    /// Read one word per line, skipping blanks and `#` comments
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary: {}", path.display()))?;
        Ok(Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && self.index.insert(word.clone()) {
                self.words.push(word);
            }
        }
    }

    /// Check a word already folded to lower case
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lowercases_and_keeps_first_order() {
        let vocab = Vocabulary::new(["Night", "cat", "night", " Knight "]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["night", "cat", "knight"]);
        assert!(vocab.contains("night"));
        assert!(!vocab.contains("Night"));
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "# school words\nhomework\n\n  Exam\n").unwrap();

        let vocab = Vocabulary::load_from_path(&path).unwrap();
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["homework", "exam"]);
        assert!(Vocabulary::load_from_path(&dir.path().join("missing.txt")).is_err());
    }
}
