use super::concept::{clean_label, ConceptNode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Overview,
    Level,
    Detail,
}

impl GraphKind {
    pub fn fill_color(self) -> &'static str {
        match self {
            GraphKind::Overview => "lightblue",
            GraphKind::Level => "lightgreen",
            GraphKind::Detail => "lightyellow",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphKind::Overview => "overview",
            GraphKind::Level => "level",
            GraphKind::Detail => "detail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConceptEdge {
    pub parent: String,
    pub child: String,
}

impl fmt::Display for ConceptEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// Nodes are keyed by their cleaned label; edges are a set, so adding the same
/// `parent -> child` pair twice keeps a single edge. Both endpoints of an edge
/// are always present as nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptGraph {
    pub title: String,
    pub kind: GraphKind,
    root: Option<String>,
    nodes: Vec<ConceptNode>,
    edges: Vec<ConceptEdge>,
}

impl ConceptGraph {
    pub fn new(kind: GraphKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            root: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn rooted(kind: GraphKind, title: impl Into<String>, root: &str) -> Self {
        let mut graph = Self::new(kind, title);
        graph.root = graph.ensure_node(root);
        graph
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn nodes(&self) -> &[ConceptNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ConceptEdge] {
        &self.edges
    }

    pub fn node(&self, name: &str) -> Option<&ConceptNode> {
        let name = clean_label(name)?;
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        let (Some(parent), Some(child)) = (clean_label(parent), clean_label(child)) else {
            return false;
        };
        self.edges
            .iter()
            .any(|e| e.parent == parent && e.child == child)
    }

    pub fn ensure_node(&mut self, label: &str) -> Option<String> {
        let name = clean_label(label)?;
        if self.node(&name).is_none() {
            self.nodes.push(ConceptNode::new(name.clone()));
        }
        Some(name)
    }

    pub fn tag_level(&mut self, label: &str, level: &str) {
        let Some(name) = self.ensure_node(label) else {
            return;
        };
        if let Some(node) = self.nodes.iter_mut().find(|n| n.name == name) {
            node.taxonomy_level = clean_label(level);
        }
    }

    /// Adds `parent -> child`, creating missing endpoints. Blank labels are ignored
    /// and `false` is returned.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> bool {
        let (Some(parent), Some(child)) = (self.ensure_node(parent), self.ensure_node(child))
        else {
            return false;
        };
        if !self.has_edge(&parent, &child) {
            if let Some(node) = self.nodes.iter_mut().find(|n| n.name == parent) {
                if !node.has_child(&child) {
                    node.children.push(child.clone());
                }
            }
            self.edges.push(ConceptEdge { parent, child });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_graph_starts_with_root_node() {
        let graph = ConceptGraph::rooted(GraphKind::Overview, "Main", " Photosynthesis ");
        assert_eq!(graph.root(), Some("Photosynthesis"));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn edges_create_endpoints_and_record_children() {
        let mut graph = ConceptGraph::rooted(GraphKind::Level, "Remember", "Remember");
        assert!(graph.add_edge("Remember", "Definition"));
        assert!(graph.add_edge("Definition", "Chlorophyll"));
        assert!(graph.add_edge("Definition", "Light"));

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        let definition = graph.node("Definition").unwrap();
        assert_eq!(definition.children, vec!["Chlorophyll", "Light"]);
        for edge in graph.edges() {
            assert!(graph.node(&edge.parent).is_some());
            assert!(graph.node(&edge.child).is_some());
        }
    }

    #[test]
    fn duplicate_edges_are_collapsed() {
        let mut graph = ConceptGraph::rooted(GraphKind::Detail, "Light", "Light");
        graph.add_edge("Light", "Photons");
        graph.add_edge("Light ", " Photons");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("Light").unwrap().children.len(), 1);
    }

    #[test]
    fn labels_differing_only_in_spacing_share_a_node() {
        let mut graph = ConceptGraph::rooted(GraphKind::Detail, "Light", "Light");
        graph.add_edge("Light", "Light Reactions");
        graph.add_edge("Light", "Light  Reactions");
        graph.add_edge("Light", "Light\tReactions");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("Light", "Light   Reactions"));
    }

    #[test]
    fn blank_labels_are_rejected() {
        let mut graph = ConceptGraph::rooted(GraphKind::Detail, "Light", "Light");
        assert!(!graph.add_edge("Light", "   "));
        assert_eq!(graph.node_count(), 1);

        let rootless = ConceptGraph::rooted(GraphKind::Overview, "Empty", "  ");
        assert_eq!(rootless.root(), None);
        assert_eq!(rootless.node_count(), 0);
    }

    #[test]
    fn tag_level_updates_node() {
        let mut graph = ConceptGraph::rooted(GraphKind::Overview, "Main", "Photosynthesis");
        graph.add_edge("Photosynthesis", "Definition");
        graph.tag_level("Definition", "Remember");
        assert_eq!(
            graph.node("Definition").unwrap().taxonomy_level.as_deref(),
            Some("Remember")
        );
    }

    #[test]
    fn fill_colours_differ_by_kind() {
        assert_eq!(GraphKind::Overview.fill_color(), "lightblue");
        assert_eq!(GraphKind::Level.fill_color(), "lightgreen");
        assert_eq!(GraphKind::Detail.fill_color(), "lightyellow");
    }
}
