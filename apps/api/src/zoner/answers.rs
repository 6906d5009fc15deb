//! Canned zoning answers and the mock document loader.
//!
//! Randomized fields (page counts, confidence, regeneration prefixes) are drawn
//! from the caller's `Rng` so results are reproducible under a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::status::Status;
use crate::zoner::models::{LoadDocumentRequest, LoadedDocument, QueryAnswer, QueryRequest};

/// Topic keywords checked in order against the lowercased query; the first hit wins.
const TOPIC_ANSWERS: [(&str, &str); 4] = [
    (
        "height",
        "Based on the zoning bylaws, residential buildings in this zone are limited to a maximum height of 4 stories (12 meters), with exceptions for affordable housing projects which may reach 6 stories with special permits.",
    ),
    (
        "parking",
        "Parking requirements specify 1.5 spaces per residential unit, with visitor parking at 0.25 spaces per unit. Commercial zones require 1 space per 25 square meters of floor area.",
    ),
    (
        "setback",
        "Minimum setback requirements are: 6 meters from front property line, 3 meters from side boundaries, and 7.5 meters from rear boundary for residential structures.",
    ),
    (
        "commercial",
        "Commercial development is permitted in designated C1 and C2 zones with ground floor retail mandatory along main streets. Mixed-use developments require special planning approval.",
    ),
];

const REGENERATION_PREFIXES: [&str; 4] = [
    "Upon reviewing the documentation more thoroughly, ",
    "Cross-referencing with related bylaws shows that ",
    "An alternative interpretation suggests that ",
    "Looking at recent amendments, ",
];

const KEY_SECTIONS: [&str; 5] = [
    "Residential Zoning Guidelines",
    "Commercial Development Rules",
    "Height Restrictions",
    "Setback Requirements",
    "Parking Regulations",
];

const RELEVANT_SECTIONS: [&str; 3] = [
    "Section 4.2 - Zoning Classifications",
    "Section 7.1 - Development Standards",
    "Appendix C - Special Provisions",
];

const CITATIONS: [&str; 2] = [
    "Municipal Planning Act, Section 4.2.1",
    "Zoning Bylaw 2023-045, Article 7",
];

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Pretends to ingest a document and returns static metadata about it.
pub fn load_document<R: Rng + ?Sized>(request: &LoadDocumentRequest, rng: &mut R) -> LoadedDocument {
    LoadedDocument {
        document_type: request.document_type.clone(),
        document_info: request.document_info.clone(),
        upload_path: request.upload_path.clone(),
        processing_status: "loaded".to_string(),
        document_summary: format!(
            "Successfully loaded {} document. Ready for queries about zoning regulations, planning permits, and urban development guidelines.",
            request.document_type
        ),
        key_sections: to_owned(&KEY_SECTIONS),
        total_pages: rng.gen_range(15..=150),
        status: Status::Success,
    }
}

/// Picks the canned answer for `query`, or the templated default when no topic matches.
pub fn select_answer(query: &str, document_type: &str) -> String {
    let query = query.to_lowercase();
    TOPIC_ANSWERS
        .iter()
        .find(|(topic, _)| query.contains(topic))
        .map(|(_, answer)| answer.to_string())
        .unwrap_or_else(|| default_answer(document_type))
}

fn default_answer(document_type: &str) -> String {
    let document = if document_type.is_empty() {
        "zoning document"
    } else {
        document_type
    };
    format!(
        "According to the {document}, this regulation falls under Section 4.2 of the municipal planning guidelines. The specific requirements depend on the zone classification and intended use of the property."
    )
}

pub fn answer_query<R: Rng + ?Sized>(request: &QueryRequest, rng: &mut R) -> QueryAnswer {
    QueryAnswer {
        query: request.query.clone(),
        response: select_answer(&request.query, &request.document_type),
        confidence_score: rng.gen_range(85..=98),
        relevant_sections: to_owned(&RELEVANT_SECTIONS),
        citations: to_owned(&CITATIONS),
        status: Status::Success,
        regenerated: None,
    }
}

/// Answers again with a rephrasing prefix in front of the lowercased answer.
pub fn regenerate_answer<R: Rng + ?Sized>(request: &QueryRequest, rng: &mut R) -> QueryAnswer {
    let mut answer = answer_query(request, rng);
    let prefix = REGENERATION_PREFIXES
        .choose(rng)
        .copied()
        .unwrap_or(REGENERATION_PREFIXES[0]);
    answer.response = format!("{prefix}{}", answer.response.to_lowercase());
    answer.regenerated = Some(true);
    answer
}
