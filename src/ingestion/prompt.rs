use crate::domain::{TaxonomyLevels, TAXONOMY_SIZE};

pub fn taxonomy_prompt() -> String {
    "List the six levels of Bloom's Taxonomy in order of cognitive complexity, \
     from lowest to highest. Answer with one level name per line and nothing else."
        .to_string()
}

/// Asks for the main concept of `text` and six sub-concepts tagged with `levels`.
pub fn extraction_prompt(text: &str, levels: &TaxonomyLevels) -> String {
    format!(
        concat!(
            "Analyze the following text and extract key concepts:\n\n",
            "{text}\n\n",
            "Provide the output as a JSON object with the following structure:\n",
            "{{\n",
            "  \"main_concept\": \"Main Topic\",\n",
            "  \"subconcepts\": [\n",
            "    {{\n",
            "      \"name\": \"Subconcept 1\",\n",
            "      \"blooms_level\": \"<Appropriate Bloom's level>\",\n",
            "      \"children\": [\"Child 1\", \"Child 2\"]\n",
            "    }},\n",
            "    {{\n",
            "      \"name\": \"Subconcept 2\",\n",
            "      \"blooms_level\": \"<Appropriate Bloom's level>\",\n",
            "      \"children\": [\"Child 3\", \"Child 4\"]\n",
            "    }},\n",
            "    ...\n",
            "  ]\n",
            "}}\n",
            "Ensure there are exactly {count} subconcepts, one for each of the {count} Bloom's Taxonomy levels.\n",
            "Each subconcept should have 2-3 children.\n",
            "Use the following Bloom's levels: {levels}\n"
        ),
        text = text,
        count = TAXONOMY_SIZE,
        levels = levels.join(", "),
    )
}

pub fn expansion_prompt(subconcept: &str) -> String {
    format!(
        concat!(
            "Create a detailed mind map for the concept: {name}\n\n",
            "Provide the output as a JSON object with the following structure:\n",
            "{{\n",
            "  \"main_concept\": \"{name}\",\n",
            "  \"subconcepts\": [\n",
            "    {{\n",
            "      \"name\": \"Related Concept 1\",\n",
            "      \"children\": [\"Subpoint 1\", \"Subpoint 2\"]\n",
            "    }},\n",
            "    {{\n",
            "      \"name\": \"Related Concept 2\",\n",
            "      \"children\": [\"Subpoint 3\", \"Subpoint 4\"]\n",
            "    }},\n",
            "    ...\n",
            "  ]\n",
            "}}\n",
            "Include 4-6 related concepts, each with 2-3 subpoints.\n"
        ),
        name = subconcept,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_text_and_levels() {
        let prompt = extraction_prompt("Plants turn light into sugar.", &TaxonomyLevels::default());
        assert!(prompt.contains("Plants turn light into sugar."));
        assert!(prompt.contains("Remember, Understand, Apply, Analyze, Evaluate, Create"));
        assert!(prompt.contains("exactly 6 subconcepts"));
        assert!(prompt.contains("\"blooms_level\""));
    }

    #[test]
    fn extraction_prompt_accepts_empty_text() {
        let prompt = extraction_prompt("", &TaxonomyLevels::default());
        assert!(prompt.starts_with("Analyze the following text"));
        assert!(prompt.contains("\"main_concept\""));
    }

    #[test]
    fn expansion_prompt_pins_main_concept() {
        let prompt = expansion_prompt("Light Reactions");
        assert!(prompt.contains("mind map for the concept: Light Reactions"));
        assert!(prompt.contains("\"main_concept\": \"Light Reactions\""));
        assert!(prompt.contains("4-6 related concepts"));
        assert!(!prompt.contains("blooms_level"));
    }

    #[test]
    fn taxonomy_prompt_is_fixed() {
        assert_eq!(taxonomy_prompt(), taxonomy_prompt());
        assert!(taxonomy_prompt().contains("six levels of Bloom's Taxonomy"));
    }
}
