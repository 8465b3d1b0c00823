//! Scoring engine: aggregates answers into a total and maps it to a persona.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::questions::{self, QuestionKind, TOTAL_QUESTIONS};
use crate::error::ScoringError;

/// The in-progress record of a user's responses, keyed by question id.
///
/// Unanswered questions are absent from the map, never present with a
/// placeholder value.
pub type AnswerMap = BTreeMap<u32, i32>;

/// One of three fixed risk-profile classifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub title: &'static str,
    pub description: &'static str,
    pub risk_level: u8,
}

pub static DEFENSIVE_GUARDIAN: Persona = Persona {
    title: "Defensive Guardian",
    description: "You put safety and stability first and have no appetite for sharp \
        swings. Your goals are usually beating inflation and preserving what you have.",
    risk_level: 1,
};

pub static BALANCED_STRATEGIST: Persona = Persona {
    title: "Balanced Strategist",
    description: "You look for the sweet spot between growth and risk control. You \
        accept volatility as the price of returns, but still want a margin of safety.",
    risk_level: 2,
};

pub static AGGRESSIVE_PIONEER: Persona = Persona {
    title: "Aggressive Pioneer",
    description: "You are confident about the future and willing to ride short-term \
        swings for outsized long-term returns, with a sharp eye for trends.",
    risk_level: 3,
};

/// Map a total score to its persona. Boundaries are exact integer
/// comparisons: `< 90` Guardian, `90..130` Strategist, `>= 130` Pioneer.
pub fn persona_for(total: i32) -> &'static Persona {
    if total < 90 {
        &DEFENSIVE_GUARDIAN
    } else if total < 130 {
        &BALANCED_STRATEGIST
    } else {
        &AGGRESSIVE_PIONEER
    }
}

/// The result of scoring an answer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub total: i32,
    pub persona: Persona,
}

/// Contribution of a single answer toward the total.
///
/// Labeled-choice values are pre-weighted and used as-is. Scale and binary
/// values are inverted around the 1–7 midpoint (`8 - value`) when the
/// question carries the aggressive polarity flag. An id with no matching
/// question contributes 0 (stale input, ignored).
fn contribution(id: u32, value: i32) -> i32 {
    match questions::question_by_id(id) {
        Some(q) => match q.kind {
            QuestionKind::LabeledChoice { .. } => value,
            QuestionKind::Scale { aggressive } | QuestionKind::Binary { aggressive } => {
                if aggressive { 8 - value } else { value }
            }
        },
        None => {
            tracing::debug!(id, value, "Ignoring answer for unknown question id");
            0
        }
    }
}

/// Score an answer map.
///
/// Sums whatever entries are present; the navigation machine is the sole
/// completeness gate before this runs. Use [`score_strict`] for an explicit
/// completeness check.
pub fn score(answers: &AnswerMap) -> ScoreOutcome {
    let total: i32 = answers.iter().map(|(&id, &v)| contribution(id, v)).sum();
    ScoreOutcome {
        total,
        persona: persona_for(total).clone(),
    }
}

/// Score an answer map, erroring unless all 29 questions are answered.
pub fn score_strict(answers: &AnswerMap) -> Result<ScoreOutcome, ScoringError> {
    let missing: Vec<u32> = (1..=TOTAL_QUESTIONS as u32)
        .filter(|id| !answers.contains_key(id))
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::Incomplete { missing });
    }
    Ok(score(answers))
}
