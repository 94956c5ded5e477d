use super::response::{RawConceptMap, RawSubconcept};
use crate::domain::clean_label;
use crate::error::ConceptMapError;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubconceptDescriptor {
    pub name: String,
    pub level: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStructure {
    pub main_concept: String,
    pub subconcepts: Vec<SubconceptDescriptor>,
}

fn normalize_subconcept(candidate: RawSubconcept) -> Option<SubconceptDescriptor> {
    let Some(name) = candidate.name.as_deref().and_then(clean_label) else {
        debug!(?candidate, "dropping sub-concept without a name");
        return None;
    };
    let children = candidate
        .children
        .unwrap_or_default()
        .iter()
        .filter_map(|child| clean_label(child))
        .collect();
    Some(SubconceptDescriptor {
        name,
        level: candidate.blooms_level.as_deref().and_then(clean_label),
        children,
    })
}

/// Checks required fields and degrades missing optional ones to empty values.
///
/// `main_concept` must be present unless `fallback_main` is given. Missing
/// `subconcepts` or `children` become empty lists, blank labels are dropped and
/// sub-concept counts or level names are not checked.
pub fn validate_concept_map(
    response: RawConceptMap,
    fallback_main: Option<&str>,
    raw_text: &str,
) -> Result<ParsedStructure, ConceptMapError> {
    let main_concept = response
        .main_concept
        .as_deref()
        .and_then(clean_label)
        .or_else(|| fallback_main.and_then(clean_label))
        .ok_or_else(|| ConceptMapError::parse("missing main_concept", raw_text))?;

    let subconcepts = response
        .subconcepts
        .unwrap_or_default()
        .into_iter()
        .filter_map(normalize_subconcept)
        .collect();

    Ok(ParsedStructure {
        main_concept,
        subconcepts,
    })
}
