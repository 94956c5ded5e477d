use crate::domain::ConceptGraph;
use std::fmt::Write;

pub const WRAP_WIDTH: usize = 20;

const SPECIAL_CHARS: [char; 6] = ['"', '|', '{', '}', '<', '>'];

fn wrap_lines(label: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in label.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current_len + word_len > WRAP_WIDTH {
            lines.push(current.join(" "));
            current = vec![word];
            current_len = word_len;
        } else {
            current.push(word);
            current_len += word_len + 1;
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Splits `label` into lines of roughly [`WRAP_WIDTH`] characters, joined with
/// the DOT line break `\n`. Words are never split.
pub fn wrap_label(label: &str) -> String {
    wrap_lines(label).join("\\n")
}

pub fn escape_specials(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wrapped and escaped form used both as node id and node label. Lines are
/// escaped before the `\n` breaks go in, so a break is never doubled.
pub fn escape_label(label: &str) -> String {
    wrap_lines(label)
        .iter()
        .map(|line| escape_specials(line))
        .collect::<Vec<_>>()
        .join("\\n")
}

pub fn to_dot(graph: &ConceptGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape_specials(&graph.title));
    out.push_str("  graph [rankdir=LR, size=\"8,5\"];\n");
    let _ = writeln!(
        out,
        "  node [shape=box, style=filled, fillcolor={}];\n",
        graph.kind.fill_color()
    );

    for node in graph.nodes() {
        let id = escape_label(&node.name);
        let _ = writeln!(out, "  \"{id}\" [label=\"{id}\"];");
    }
    out.push('\n');
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            escape_label(&edge.parent),
            escape_label(&edge.child)
        );
    }
    out.push_str("}\n");
    out
}
