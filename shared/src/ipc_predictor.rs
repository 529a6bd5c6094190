//! Keyword based IPC section prediction.
//!
//! Every [`KeywordRule`](crate::ipc_catalog::KeywordRule) whose keyword occurs
//! in the lower-cased description adds weight to its candidate sections; the
//! five best sections are returned with a rank based confidence. When nothing
//! matches, a couple of generic fallbacks are returned instead, so callers
//! always get at least one prediction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ipc_catalog::{self, KEYWORD_RULES};

/// Upper bound on the number of predictions returned.
pub const MAX_PREDICTIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub section: String,
    pub description: String,
    pub confidence: u8,
    pub punishment: String,
    pub relevance: String,
}

/// Accumulated keyword score for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSection {
    pub id: &'static str,
    pub score: u64,
    pub context_tags: BTreeSet<&'static str>,
}

const GENERAL_INDICATORS: &[&str] = &["police", "complaint", "report"];

const CHEATING_DESCRIPTION: &str = "Cheating and dishonestly inducing delivery of property";
const CHEATING_PUNISHMENT: &str = "Imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.";
const BREACH_DESCRIPTION: &str = "Punishment for criminal breach of trust";
const BREACH_PUNISHMENT: &str = "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.";

/// Substring groups that add a sentence to the relevance text. First hit wins.
const RELEVANCE_CONTEXTS: &[(&[&str], &str)] = &[
    (
        &["money", "cash", "payment"],
        "The involvement of financial transactions or monetary value strengthens the applicability of this section.",
    ),
    (
        &["phone", "call", "message"],
        "The use of communication devices or digital means may be relevant to the circumstances described.",
    ),
    (
        &["family", "spouse", "marriage"],
        "The domestic or familial context of the incident may affect the severity and applicability of this section.",
    ),
    (
        &["work", "office", "business"],
        "The professional or workplace context may be relevant to understanding the circumstances.",
    ),
];

/// Scores every section hit by a keyword, best first.
///
/// A repeated hit multiplies the section's previous score by the rule weight
/// instead of adding to it (`weight * (previous || 1)`); a first hit scores the
/// plain weight. Ties keep the order in which sections were first hit.
pub fn score_sections(description: &str) -> Vec<ScoredSection> {
    let lower = description.to_lowercase();
    let mut scored: Vec<ScoredSection> = Vec::new();

    for rule in KEYWORD_RULES.iter().filter(|r| lower.contains(r.keyword)) {
        for &id in rule.sections {
            let idx = match scored.iter().position(|s| s.id == id) {
                Some(idx) => idx,
                None => {
                    scored.push(ScoredSection {
                        id,
                        score: 0,
                        context_tags: BTreeSet::new(),
                    });
                    scored.len() - 1
                }
            };
            let entry = &mut scored[idx];
            let previous = if entry.score == 0 { 1 } else { entry.score };
            entry.score = u64::from(rule.weight).saturating_mul(previous);
            entry.context_tags.insert(rule.context);
        }
    }

    // stable: equal scores stay in first-hit order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Predicts the IPC sections most likely to apply to `description`.
///
/// Never returns an empty list; confidences are within `0..=100` and never
/// increase with rank.
pub fn predict(description: &str) -> Vec<Prediction> {
    let lower = description.to_lowercase();
    let mut top = score_sections(description);
    top.truncate(MAX_PREDICTIONS);

    if top.is_empty() {
        debug!("no keyword matched, using general patterns");
        return general_patterns(&lower);
    }

    let mut predictions: Vec<Prediction> = top
        .iter()
        .enumerate()
        .map(|(rank, scored)| match ipc_catalog::section(scored.id) {
            Some(record) => Prediction {
                section: scored.id.to_string(),
                description: record.description.to_string(),
                confidence: catalogued_confidence(rank, scored.context_tags.len()),
                punishment: record.punishment.to_string(),
                relevance: relevance_text(&lower, record.relevance),
            },
            None => Prediction {
                section: scored.id.to_string(),
                description: format!("{} of the Indian Penal Code", scored.id),
                confidence: uncatalogued_confidence(rank),
                punishment: "Punishment as prescribed by law for this offense.".to_string(),
                relevance: "This section appears relevant based on the description provided."
                    .to_string(),
            },
        })
        .collect();

    let mut ceiling = 100;
    for p in &mut predictions {
        p.confidence = p.confidence.min(ceiling);
        ceiling = p.confidence;
    }

    debug!(
        matched = top.len(),
        best = %predictions[0].section,
        best_confidence = predictions[0].confidence,
        "IPC prediction complete"
    );
    predictions
}

fn catalogued_confidence(rank: usize, tag_count: usize) -> u8 {
    let base = 95usize.saturating_sub(10 * rank).max(60);
    let bonus = (3 * tag_count).min(10);
    (base + bonus).min(100) as u8
}

fn uncatalogued_confidence(rank: usize) -> u8 {
    85usize.saturating_sub(15 * rank).max(60) as u8
}

fn general_patterns(lower: &str) -> Vec<Prediction> {
    if GENERAL_INDICATORS.iter().any(|w| lower.contains(w)) {
        return vec![
            Prediction {
                section: "IPC 420".into(),
                description: CHEATING_DESCRIPTION.into(),
                confidence: 70,
                punishment: CHEATING_PUNISHMENT.into(),
                relevance: "Based on the general nature of your complaint, this section may be applicable. Please consult a legal professional for specific advice.".into(),
            },
            Prediction {
                section: "IPC 406".into(),
                description: BREACH_DESCRIPTION.into(),
                confidence: 65,
                punishment: BREACH_PUNISHMENT.into(),
                relevance: "This section covers various forms of criminal misconduct. Legal consultation is recommended for accurate assessment.".into(),
            },
        ];
    }

    vec![Prediction {
        section: "IPC 420".into(),
        description: CHEATING_DESCRIPTION.into(),
        confidence: 50,
        punishment: CHEATING_PUNISHMENT.into(),
        relevance: "This is a general section that may apply. For accurate legal advice, please consult with a qualified legal professional.".into(),
    }]
}

/// Appends a context sentence to `base` when the (lower-cased) description
/// mentions money, communication devices, family or work.
pub fn relevance_text(lower_description: &str, base: &str) -> String {
    RELEVANCE_CONTEXTS
        .iter()
        .find(|(terms, _)| terms.iter().any(|t| lower_description.contains(t)))
        .map(|(_, sentence)| format!("{base} {sentence}"))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(preds: &[Prediction]) -> Vec<&str> {
        preds.iter().map(|p| p.section.as_str()).collect()
    }

    fn confidences(preds: &[Prediction]) -> Vec<u8> {
        preds.iter().map(|p| p.confidence).collect()
    }

    #[test]
    fn theft_ranks_ipc_378_first() {
        for text in [
            "There was a theft at my shop last night",
            "Someone tried to steal my bag",
            "My bicycle was stolen from the market",
        ] {
            let preds = predict(text);
            assert_eq!(preds[0].section, "IPC 378", "{text}");
            assert!(preds[0].confidence >= 60);
        }
    }

    #[test]
    fn theft_confidences_follow_rank() {
        let preds = predict("theft");
        assert_eq!(sections(&preds), vec!["IPC 378", "IPC 379", "IPC 380"]);
        assert_eq!(confidences(&preds), vec![98, 88, 78]);
    }

    #[test]
    fn repeated_hits_multiply_previous_score() {
        // "theft" then "stolen": 3, then 3 * 3
        let scored = score_sections("theft of goods, they were stolen");
        assert_eq!(scored[0].id, "IPC 378");
        assert_eq!(scored[0].score, 9);
        assert_eq!(scored[0].context_tags.len(), 1);

        // "robbery" also contains "rob": 4, then 4 * 4
        let scored = score_sections("robbery");
        let ids: Vec<_> = scored.iter().map(|s| (s.id, s.score)).collect();
        assert_eq!(
            ids,
            vec![("IPC 390", 16), ("IPC 392", 16), ("IPC 394", 16)]
        );
    }

    #[test]
    fn uncatalogued_section_gets_generic_text() {
        let preds = predict("robbery");
        let third = &preds[2];
        assert_eq!(third.section, "IPC 394");
        assert_eq!(third.description, "IPC 394 of the Indian Penal Code");
        assert_eq!(third.confidence, 60);
        assert_eq!(
            third.punishment,
            "Punishment as prescribed by law for this offense."
        );
    }

    #[test]
    fn general_indicators_return_two_defaults() {
        for text in [
            "I want to file a police complaint",
            "Need to report something",
            "COMPLAINT",
        ] {
            let preds = predict(text);
            assert_eq!(sections(&preds), vec!["IPC 420", "IPC 406"], "{text}");
            assert_eq!(confidences(&preds), vec![70, 65]);
        }
    }

    #[test]
    fn nothing_matched_returns_single_default() {
        for text in ["", "   ", "The weather is pleasant today", "🙂🙂"] {
            let preds = predict(text);
            assert_eq!(preds.len(), 1, "{text:?}");
            assert_eq!(preds[0].section, "IPC 420");
            assert_eq!(preds[0].confidence, 50);
        }
    }

    #[test]
    fn at_most_five_and_non_increasing() {
        let text = "They planned together as a group, threatened me, hit me, \
                    stole my cash, damaged my car and forged documents after the accident";
        let preds = predict(text);
        assert_eq!(preds.len(), MAX_PREDICTIONS);
        let conf = confidences(&preds);
        assert!(conf.iter().all(|c| *c <= 100));
        assert!(conf.windows(2).all(|w| w[0] >= w[1]), "{conf:?}");
    }

    fn assert_well_ranked(text: &str) {
        let preds = predict(text);
        assert!(!preds.is_empty(), "{text:?}");
        assert!(preds.len() <= MAX_PREDICTIONS, "{text:?}");
        let conf = confidences(&preds);
        assert!(conf.iter().all(|c| *c <= 100), "{text:?}: {conf:?}");
        assert!(conf.windows(2).all(|w| w[0] >= w[1]), "{text:?}: {conf:?}");
    }

    #[test]
    fn every_keyword_and_keyword_pair_ranks_cleanly() {
        for first in KEYWORD_RULES {
            assert_well_ranked(first.keyword);
            for second in KEYWORD_RULES {
                assert_well_ranked(&format!("{} and {}", first.keyword, second.keyword));
            }
        }
    }

    #[test]
    fn context_bonus_is_capped() {
        assert_eq!(catalogued_confidence(0, 1), 98);
        assert_eq!(catalogued_confidence(0, 4), 100);
        assert_eq!(catalogued_confidence(4, 4), 70);
        assert_eq!(catalogued_confidence(9, 0), 60);
        assert_eq!(uncatalogued_confidence(0), 85);
        assert_eq!(uncatalogued_confidence(3), 60);
    }

    #[test]
    fn relevance_sentence_follows_first_context() {
        let base = "Base.";
        assert_eq!(relevance_text("nothing special", base), "Base.");
        assert!(relevance_text("he took my cash", base).contains("financial transactions"));
        assert!(relevance_text("a phone call", base).contains("communication devices"));
        assert!(relevance_text("my spouse", base).contains("familial context"));
        assert!(relevance_text("at the office", base).contains("workplace context"));
        // money wins over phone
        assert!(relevance_text("payment by phone", base).contains("financial transactions"));
    }

    #[test]
    fn relevance_keeps_base_description() {
        let preds = predict("My phone was stolen");
        assert!(preds[0].relevance.starts_with("Involves dishonestly taking"));
        assert!(preds[0].relevance.ends_with("circumstances described."));
    }
}
