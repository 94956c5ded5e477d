use super::validator::{validate_concept_map, ParsedStructure};
use crate::error::ConceptMapError;
use serde::Deserialize;

/// JSON shape the model is asked to return, with every field optional so a
/// partial answer can still be inspected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConceptMap {
    #[serde(default)]
    pub main_concept: Option<String>,
    #[serde(default)]
    pub subconcepts: Option<Vec<RawSubconcept>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubconcept {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "level")]
    pub blooms_level: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<String>>,
}

pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim().trim_matches('`').trim();
    match text.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => text[4..].trim(),
        _ => text,
    }
}

/// The fence-stripped text is tried first, then the slice between the first
/// `{` and the last `}` in case the model wrapped the object in prose.
pub fn decode_concept_map(raw: &str) -> Result<RawConceptMap, ConceptMapError> {
    let text = strip_code_fence(raw);
    let first_error = match serde_json::from_str::<RawConceptMap>(text) {
        Ok(map) => return Ok(map),
        Err(err) => err,
    };

    if let (Some(i), Some(j)) = (text.find('{'), text.rfind('}')) {
        if i < j {
            if let Ok(map) = serde_json::from_str::<RawConceptMap>(&text[i..=j]) {
                return Ok(map);
            }
        }
    }

    Err(ConceptMapError::parse(
        format!("invalid concept map JSON: {}", first_error),
        raw,
    ))
}

pub fn parse(raw: &str) -> Result<ParsedStructure, ConceptMapError> {
    validate_concept_map(decode_concept_map(raw)?, None, raw)
}

/// Parses a sub-concept expansion answer, rooting it at `subconcept` when the
/// model left `main_concept` out.
pub fn parse_expansion(raw: &str, subconcept: &str) -> Result<ParsedStructure, ConceptMapError> {
    validate_concept_map(decode_concept_map(raw)?, Some(subconcept), raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"main_concept": "Photosynthesis", "subconcepts": [{"name": "Definition", "blooms_level": "Remember", "children": ["Chlorophyll", "Light"]}]}"#;

    #[test]
    fn strips_fences_and_language_tag() {
        let fenced = format!("```json\n{}\n```", BODY);
        assert_eq!(strip_code_fence(&fenced), BODY);
        let upper = format!("  ```JSON {}```  ", BODY);
        assert_eq!(strip_code_fence(&upper), BODY);
        assert_eq!(strip_code_fence(BODY), BODY);
    }

    #[test]
    fn parses_fenced_extraction() {
        let parsed = parse(&format!("```json\n{}\n```", BODY)).unwrap();
        assert_eq!(parsed.main_concept, "Photosynthesis");
        assert_eq!(parsed.subconcepts.len(), 1);
        assert_eq!(parsed.subconcepts[0].level.as_deref(), Some("Remember"));
        assert_eq!(parsed.subconcepts[0].children, vec!["Chlorophyll", "Light"]);
    }

    #[test]
    fn recovers_object_wrapped_in_prose() {
        let chatty = format!("Sure! Here is the map:\n{}\nHope this helps.", BODY);
        assert_eq!(parse(&chatty).unwrap().main_concept, "Photosynthesis");
    }

    #[test]
    fn malformed_output_keeps_raw_text() {
        let err = parse("I cannot help with that").unwrap_err();
        match err {
            ConceptMapError::Parse { raw, .. } => assert_eq!(raw, "I cannot help with that"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse("").is_err());
        assert!(parse("{\"main_concept\": ").is_err());
    }

    #[test]
    fn extraction_without_main_concept_fails() {
        let err = parse(r#"{"subconcepts": []}"#).unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn expansion_falls_back_to_requested_name() {
        let parsed =
            parse_expansion(r#"{"subconcepts": [{"name": "Photons"}]}"#, "Light").unwrap();
        assert_eq!(parsed.main_concept, "Light");
        assert_eq!(parsed.subconcepts[0].name, "Photons");
        assert!(parsed.subconcepts[0].children.is_empty());
    }

    #[test]
    fn level_alias_is_accepted() {
        let parsed = parse(
            r#"{"main_concept": "M", "subconcepts": [{"name": "S", "level": "Apply", "children": []}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.subconcepts[0].level.as_deref(), Some("Apply"));
    }
}
