mod dot;
mod graphviz;

pub use dot::{escape_label, escape_specials, to_dot, wrap_label, WRAP_WIDTH};
pub use graphviz::{render_bundle, GraphRenderer, GraphvizRenderer};

#[cfg(test)]
pub(crate) use graphviz::tests::RecordingRenderer;
