use std::fmt;

/// `name` doubles as the node key inside its owning graph. `children` keeps the
/// order in which the model listed the child concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptNode {
    pub name: String,
    pub taxonomy_level: Option<String>,
    pub children: Vec<String>,
}

impl ConceptNode {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            taxonomy_level: None,
            children: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.taxonomy_level = Some(level.into());
        self
    }

    pub fn has_child(&self, child: &str) -> bool {
        self.children.iter().any(|c| c == child)
    }
}

impl fmt::Display for ConceptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.taxonomy_level {
            Some(level) => write!(f, "{} [{}]", self.name, level),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Trims a model-provided label and collapses inner whitespace runs to one
/// space, rejecting labels that are blank. Rendered labels are rewrapped on
/// whitespace, so two labels differing only in spacing are the same node.
pub fn clean_label(raw: &str) -> Option<String> {
    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_level_when_tagged() {
        let node = ConceptNode::new("Definition").with_level("Remember");
        assert_eq!(node.to_string(), "Definition [Remember]");
        assert_eq!(ConceptNode::new("Light").to_string(), "Light");
    }

    #[test]
    fn clean_label_rejects_blank_input() {
        assert_eq!(clean_label("  Light  ").as_deref(), Some("Light"));
        assert_eq!(clean_label("   "), None);
        assert_eq!(clean_label(""), None);
        assert_eq!(
            clean_label(" Light \t Reactions\n").as_deref(),
            Some("Light Reactions")
        );
    }
}
