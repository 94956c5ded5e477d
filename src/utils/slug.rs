use once_cell::sync::Lazy;
use regex::Regex;

pub const OVERVIEW_FILE_STEM: &str = "concept_overview_map";
pub const SUMMARY_FILE_NAME: &str = "concept_summary.txt";

/// Path separators and control characters never reach the file system.
fn file_safe(input: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\\x00-\x1f]").unwrap());
    RE.replace_all(input, "_").into_owned()
}

/// `concepts_<level lowercased>_map`
pub fn level_file_stem(level: &str) -> String {
    format!("concepts_{}_map", file_safe(&level.to_lowercase()))
}

/// `detailed_<sub-concept lowercased, spaces to underscores>_map`
pub fn detail_file_stem(subconcept: &str) -> String {
    let slug = subconcept.to_lowercase().replace(' ', "_");
    format!("detailed_{}_map", file_safe(&slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_lowercased_verbatim() {
        assert_eq!(level_file_stem("Remember"), "concepts_remember_map");
        assert_eq!(level_file_stem("Higher Order"), "concepts_higher order_map");
    }

    #[test]
    fn detail_names_use_underscores() {
        assert_eq!(
            detail_file_stem("Light Dependent Reactions"),
            "detailed_light_dependent_reactions_map"
        );
    }

    #[test]
    fn separators_cannot_escape_the_output_dir() {
        assert_eq!(level_file_stem("../etc"), "concepts_.._etc_map");
        assert_eq!(detail_file_stem("Input/Output"), "detailed_input_output_map");
        assert!(!detail_file_stem("a\\b\nc").contains(['\\', '\n']));
    }
}
