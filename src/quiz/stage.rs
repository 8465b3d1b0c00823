//! Wizard stage machine: tracks which step of the quiz is active.

use serde::{Deserialize, Serialize};

use crate::catalog::questions::{section as section_def, SectionId};

/// The stages of the quiz wizard.
///
/// Progresses linearly: Intro → Contact → Section A → Section B →
/// Section C → Result. Section stages carry the 0-based index of the
/// question currently on screen. There is no terminal stage: Result permits
/// indefinite retake and reset cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Intro,
    Contact,
    Section { section: SectionId, index: usize },
    Result,
}

impl Stage {
    /// Entry point of a section.
    pub fn section_start(section: SectionId) -> Stage {
        Stage::Section { section, index: 0 }
    }

    /// The question id currently on screen, if a section is active.
    pub fn current_question(&self) -> Option<u32> {
        match self {
            Stage::Section { section, index } => {
                section_def(*section).questions.get(*index).map(|q| q.id)
            }
            _ => None,
        }
    }

    /// The stage after a forward step.
    ///
    /// Within a section this walks question by question, crosses into the
    /// next section at the boundary, and leaves the final section into
    /// Result. Intro, Contact and Result do not advance this way; their
    /// transitions are guarded separately by the session reducer.
    pub fn advanced(&self) -> Stage {
        match *self {
            Stage::Section { section, index } => {
                let sec = section_def(section);
                if index < sec.last_index() {
                    Stage::Section {
                        section,
                        index: index + 1,
                    }
                } else {
                    match section.next() {
                        Some(next) => Stage::section_start(next),
                        None => Stage::Result,
                    }
                }
            }
            other => other,
        }
    }

    /// The stage after a backward step. Always permitted: index 0 of the
    /// first section retreats to the contact form, index 0 of a later
    /// section to the previous section's last question.
    pub fn retreated(&self) -> Stage {
        match *self {
            Stage::Section { section, index } => {
                if index > 0 {
                    Stage::Section {
                        section,
                        index: index - 1,
                    }
                } else {
                    match section.prev() {
                        Some(prev) => Stage::Section {
                            section: prev,
                            index: section_def(prev).last_index(),
                        },
                        None => Stage::Contact,
                    }
                }
            }
            other => other,
        }
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Stage::Result)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Intro
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Intro => write!(f, "intro"),
            Stage::Contact => write!(f, "contact"),
            Stage::Section { section, index } => write!(f, "section_{section}[{index}]"),
            Stage::Result => write!(f, "result"),
        }
    }
}

/// Which of the two top-level views is showing. Admin is a side view over
/// persisted leads, orthogonal to the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Quiz,
    Admin,
}

impl View {
    pub fn toggled(&self) -> View {
        match self {
            View::Quiz => View::Admin,
            View::Admin => View::Quiz,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Quiz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_walks_every_question_then_result() {
        let mut stage = Stage::section_start(SectionId::A);
        let mut visited = vec![stage.current_question().unwrap()];
        loop {
            stage = stage.advanced();
            match stage.current_question() {
                Some(id) => visited.push(id),
                None => break,
            }
        }
        assert_eq!(visited, (1..=29).collect::<Vec<u32>>());
        assert!(stage.is_result());
    }

    #[test]
    fn section_boundaries_cross_cleanly() {
        let end_of_a = Stage::Section {
            section: SectionId::A,
            index: 9,
        };
        assert_eq!(end_of_a.advanced(), Stage::section_start(SectionId::B));

        let start_of_b = Stage::section_start(SectionId::B);
        assert_eq!(
            start_of_b.retreated(),
            Stage::Section {
                section: SectionId::A,
                index: 9,
            }
        );
    }

    #[test]
    fn retreat_from_first_question_reaches_contact() {
        let stage = Stage::section_start(SectionId::A);
        assert_eq!(stage.retreated(), Stage::Contact);
    }

    #[test]
    fn last_question_of_final_section_advances_to_result() {
        let stage = Stage::Section {
            section: SectionId::C,
            index: 8,
        };
        assert!(stage.advanced().is_result());
    }

    #[test]
    fn non_section_stages_do_not_walk() {
        assert_eq!(Stage::Intro.advanced(), Stage::Intro);
        assert_eq!(Stage::Contact.retreated(), Stage::Contact);
        assert_eq!(Stage::Result.advanced(), Stage::Result);
        assert_eq!(Stage::Intro.current_question(), None);
    }

    #[test]
    fn view_toggles_both_ways() {
        assert_eq!(View::Quiz.toggled(), View::Admin);
        assert_eq!(View::Admin.toggled(), View::Quiz);
    }
}
