use once_cell::sync::Lazy;
use regex::Regex;
use super::concept::clean_label;

pub const DEFAULT_TAXONOMY_LEVELS: [&str; 6] =
    ["Remember", "Understand", "Apply", "Analyze", "Evaluate", "Create"];

pub const TAXONOMY_SIZE: usize = DEFAULT_TAXONOMY_LEVELS.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyLevels(Vec<String>);

impl TaxonomyLevels {
    pub fn new(levels: Vec<String>) -> Option<Self> {
        let levels: Vec<String> = levels
            .iter()
            .filter_map(|l| clean_label(l))
            .collect();
        if levels.len() == TAXONOMY_SIZE {
            Some(Self(levels))
        } else {
            None
        }
    }

    /// Extracts the level names from a free-form model listing such as
    /// `"1. **Remember**: recall facts"`. Returns `None` unless exactly six survive.
    pub fn from_model_output(text: &str) -> Option<Self> {
        static MARKER: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*(?:\d+\s*[.)]|[-*•])\s+").unwrap());
        static TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*(?::|\(|\s[-–—]\s).*$").unwrap());

        let mut candidates = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let marked = MARKER.is_match(line);
            let without_marker = MARKER.replace(line, "");
            let unemphasized = without_marker.replace('*', "");
            let label = TAIL.replace(unemphasized.trim(), "");
            let label = label.trim();
            if !label.is_empty() {
                candidates.push((marked, label.to_string()));
            }
        }

        let any_marked = candidates.iter().any(|(marked, _)| *marked);
        let levels = candidates
            .into_iter()
            .filter(|(marked, _)| *marked || !any_marked)
            .map(|(_, label)| label)
            .collect();
        Self::new(levels)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, level: &str) -> bool {
        self.0.iter().any(|l| l == level)
    }

    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl Default for TaxonomyLevels {
    fn default() -> Self {
        Self(DEFAULT_TAXONOMY_LEVELS.iter().map(|l| l.to_string()).collect())
    }
}
