//! Session state and the action reducer.
//!
//! All mutable quiz state lives in one `Session` struct owned by the
//! caller; every user interaction arrives as an `Action` and flows through
//! `Session::apply`. Guarded transitions are silently refused; the UI
//! surfaces them as disabled affordances, never as errors.

use serde::Serialize;

use crate::catalog::questions::{question_by_id, SectionId};
use crate::quiz::model::{AgeBracket, ContactInfo, Experience};
use crate::quiz::stage::{Stage, View};
use crate::scoring::{self, AnswerMap, ScoreOutcome};

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Intro → Contact, unconditional.
    Begin,
    SetName(String),
    SetPhone(String),
    SetEmail(String),
    SetAge(AgeBracket),
    SetExperience(Experience),
    /// Contact → Section A, guarded by [`ContactInfo::is_complete`].
    SubmitContact,
    /// Record an answer for the question currently on screen.
    Answer { id: u32, value: i32 },
    /// Move to the next question/section, or into Result from the last one.
    Advance,
    /// Move to the previous question/section, or back to the contact form.
    Retreat,
    /// From Result: clear answers, outcome and cart, keep contact, restart
    /// at Section A.
    Retake,
    /// From anywhere: clear everything, back to Intro.
    Reset,
    /// Flip between the quiz and the admin side view.
    ToggleAdmin,
    /// Add or remove a fund code from the cart.
    ToggleCart(String),
}

/// The whole mutable state of one quiz session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub stage: Stage,
    pub view: View,
    pub contact: ContactInfo,
    pub answers: AnswerMap,
    pub outcome: Option<ScoreOutcome>,
    /// Selected fund codes, in selection order.
    pub cart: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the question currently on screen has an answer.
    pub fn current_answered(&self) -> bool {
        self.stage
            .current_question()
            .is_some_and(|id| self.answers.contains_key(&id))
    }

    /// How many questions of `section` are answered.
    pub fn answered_in(&self, section: SectionId) -> usize {
        section
            .ids()
            .filter(|id| self.answers.contains_key(id))
            .count()
    }

    /// Apply one action. Guard violations leave the session untouched.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Begin => {
                if self.stage == Stage::Intro {
                    self.stage = Stage::Contact;
                }
            }
            Action::SetName(name) => self.contact.name = name,
            Action::SetPhone(phone) => self.contact.phone = phone,
            Action::SetEmail(email) => self.contact.email = email,
            Action::SetAge(age) => self.contact.age = Some(age),
            Action::SetExperience(exp) => self.contact.experience = Some(exp),
            Action::SubmitContact => {
                if self.stage == Stage::Contact && self.contact.is_complete() {
                    self.stage = Stage::section_start(SectionId::A);
                }
            }
            Action::Answer { id, value } => self.answer(id, value),
            Action::Advance => {
                if self.current_answered() {
                    self.step_forward();
                }
            }
            Action::Retreat => self.stage = self.stage.retreated(),
            Action::Retake => {
                if self.stage.is_result() {
                    self.clear_assessment();
                    self.stage = Stage::section_start(SectionId::A);
                }
            }
            Action::Reset => {
                self.clear_assessment();
                self.contact = ContactInfo::default();
                self.stage = Stage::Intro;
                self.view = View::Quiz;
            }
            Action::ToggleAdmin => self.view = self.view.toggled(),
            Action::ToggleCart(code) => {
                match self.cart.iter().position(|c| c == &code) {
                    Some(pos) => {
                        self.cart.remove(pos);
                    }
                    None => self.cart.push(code),
                }
            }
        }
    }

    /// Record an answer for the question on screen. Answers for any other
    /// question id, or invalid values, are dropped. Binary and choice
    /// questions auto-advance once answered; scale questions stay put.
    fn answer(&mut self, id: u32, value: i32) {
        if self.stage.current_question() != Some(id) {
            tracing::debug!(id, "Dropping answer for a question not on screen");
            return;
        }
        let Some(question) = question_by_id(id) else {
            return;
        };
        if !question.kind.accepts(value) {
            tracing::debug!(id, value, "Dropping out-of-range answer");
            return;
        }
        self.answers.insert(id, value);
        if question.kind.auto_advances() {
            self.step_forward();
        }
    }

    /// Completing the final section computes the score on the way into
    /// Result.
    fn step_forward(&mut self) {
        let next = self.stage.advanced();
        if next.is_result() && !self.stage.is_result() {
            let outcome = scoring::score(&self.answers);
            tracing::info!(total = outcome.total, persona = outcome.persona.title, "Assessment scored");
            self.outcome = Some(outcome);
        }
        self.stage = next;
    }

    fn clear_assessment(&mut self) {
        self.answers.clear();
        self.outcome = None;
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            age: Some(AgeBracket::Thirties),
            ..Default::default()
        }
    }

    fn session_at_section_a() -> Session {
        let mut s = Session::new();
        s.apply(Action::Begin);
        s.contact = contact();
        s.apply(Action::SubmitContact);
        assert_eq!(s.stage, Stage::section_start(SectionId::A));
        s
    }

    /// Answer every question with a neutral/low value and land on Result.
    fn complete_quiz(s: &mut Session) {
        while let Some(id) = s.stage.current_question() {
            let q = question_by_id(id).unwrap();
            let value = if q.kind.auto_advances() { 1 } else { 4 };
            s.apply(Action::Answer { id, value });
            if !q.kind.auto_advances() {
                s.apply(Action::Advance);
            }
        }
        assert!(s.stage.is_result());
    }

    #[test]
    fn contact_guard_blocks_incomplete_form() {
        let mut s = Session::new();
        s.apply(Action::Begin);
        assert_eq!(s.stage, Stage::Contact);

        s.apply(Action::SetName("Alice".to_string()));
        s.apply(Action::SubmitContact);
        assert_eq!(s.stage, Stage::Contact, "email and age still missing");

        s.apply(Action::SetEmail("alice@example.com".to_string()));
        s.apply(Action::SetAge(AgeBracket::Twenties));
        s.apply(Action::SubmitContact);
        assert_eq!(s.stage, Stage::section_start(SectionId::A));
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut s = session_at_section_a();
        s.apply(Action::Advance);
        assert_eq!(s.stage, Stage::section_start(SectionId::A), "silent no-op");

        s.apply(Action::Answer { id: 1, value: 5 });
        assert_eq!(s.stage, Stage::section_start(SectionId::A), "scale does not auto-advance");
        s.apply(Action::Advance);
        assert_eq!(
            s.stage,
            Stage::Section {
                section: SectionId::A,
                index: 1
            }
        );
    }

    #[test]
    fn binary_answers_auto_advance() {
        let mut s = session_at_section_a();
        for id in 1..=10 {
            s.apply(Action::Answer { id, value: 4 });
            s.apply(Action::Advance);
        }
        assert_eq!(s.stage, Stage::section_start(SectionId::B));

        s.apply(Action::Answer { id: 11, value: 7 });
        assert_eq!(
            s.stage,
            Stage::Section {
                section: SectionId::B,
                index: 1
            },
            "binary advances without an explicit Advance"
        );
    }

    #[test]
    fn answers_for_offscreen_questions_are_dropped() {
        let mut s = session_at_section_a();
        s.apply(Action::Answer { id: 15, value: 1 });
        assert!(s.answers.is_empty());

        s.apply(Action::Answer { id: 1, value: 99 });
        assert!(s.answers.is_empty(), "out-of-range value dropped");
    }

    #[test]
    fn retreat_is_always_permitted() {
        let mut s = session_at_section_a();
        s.apply(Action::Retreat);
        assert_eq!(s.stage, Stage::Contact);
    }

    #[test]
    fn completing_the_quiz_scores_and_lands_on_result() {
        let mut s = session_at_section_a();
        complete_quiz(&mut s);
        let outcome = s.outcome.as_ref().unwrap();
        // Sections A and C answered 4 (aggressive-invariant), section B all 1s:
        // aggressive binaries invert 1 → 7.
        assert_eq!(outcome.total, 19 * 4 + 4 * 1 + 4 * 7 + 2 * 1);
        assert_eq!(outcome.persona.title, "Balanced Strategist");
    }

    #[test]
    fn retake_preserves_contact_but_clears_assessment() {
        let mut s = session_at_section_a();
        complete_quiz(&mut s);
        s.apply(Action::ToggleCart("17605622".to_string()));

        s.apply(Action::Retake);
        assert_eq!(s.stage, Stage::section_start(SectionId::A));
        assert!(s.answers.is_empty());
        assert!(s.outcome.is_none());
        assert!(s.cart.is_empty());
        assert_eq!(s.contact, contact(), "contact survives a retake");
    }

    #[test]
    fn retake_outside_result_is_refused() {
        let mut s = session_at_section_a();
        s.apply(Action::Answer { id: 1, value: 3 });
        s.apply(Action::Retake);
        assert_eq!(s.stage, Stage::section_start(SectionId::A));
        assert_eq!(s.answers.len(), 1, "in-progress answers untouched");
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = session_at_section_a();
        complete_quiz(&mut s);
        s.apply(Action::ToggleCart("98641529".to_string()));

        s.apply(Action::Reset);
        assert_eq!(s.stage, Stage::Intro);
        assert_eq!(s.view, View::Quiz);
        assert!(s.answers.is_empty());
        assert!(s.outcome.is_none());
        assert!(s.cart.is_empty());
        assert_eq!(s.contact, ContactInfo::default());
    }

    #[test]
    fn admin_toggle_leaves_quiz_state_alone() {
        let mut s = session_at_section_a();
        s.apply(Action::Answer { id: 1, value: 6 });
        let stage_before = s.stage;

        s.apply(Action::ToggleAdmin);
        assert_eq!(s.view, View::Admin);
        assert_eq!(s.stage, stage_before);
        assert_eq!(s.answers.len(), 1);

        s.apply(Action::ToggleAdmin);
        assert_eq!(s.view, View::Quiz);
    }

    #[test]
    fn cart_toggle_adds_and_removes() {
        let mut s = Session::new();
        s.apply(Action::ToggleCart("a".to_string()));
        s.apply(Action::ToggleCart("b".to_string()));
        assert_eq!(s.cart, vec!["a", "b"]);
        s.apply(Action::ToggleCart("a".to_string()));
        assert_eq!(s.cart, vec!["b"]);
    }

    #[test]
    fn answered_count_tracks_progress() {
        let mut s = session_at_section_a();
        assert_eq!(s.answered_in(SectionId::A), 0);
        s.apply(Action::Answer { id: 1, value: 2 });
        s.apply(Action::Advance);
        s.apply(Action::Answer { id: 2, value: 2 });
        assert_eq!(s.answered_in(SectionId::A), 2);
        assert_eq!(s.answered_in(SectionId::B), 0);
    }
}
