mod summarizer;

pub use summarizer::{strip_emphasis, summary_prompt, Summarizer, SUMMARY_MAX_TOKENS};
