//! Questionnaire reference data: three fixed sections, 29 questions.
//!
//! Question ids are unique, globally ordered, and partition into the three
//! sections by a fixed id-range rule (A: 1–10, B: 11–20, C: 21–29).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Total number of questions across all sections.
pub const TOTAL_QUESTIONS: usize = 29;

/// One selectable option of a labeled-choice question.
///
/// Option values are pre-weighted; the scoring engine uses them as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: i32,
    pub label: &'static str,
}

/// The shape of a question, keyed by kind.
///
/// Scale questions take a 1–7 Likert answer. Binary questions are a forced
/// yes/no choice recorded as 1 (yes) or 7 (no). Labeled-choice questions
/// carry explicit pre-weighted options and ignore the polarity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Scale { aggressive: bool },
    Binary { aggressive: bool },
    LabeledChoice { options: &'static [ChoiceOption] },
}

impl QuestionKind {
    /// Whether answering this question should immediately move to the next
    /// one. Scale answers stay on screen; binary/choice answers auto-advance.
    pub fn auto_advances(&self) -> bool {
        !matches!(self, Self::Scale { .. })
    }

    /// The set of values a valid answer may take.
    pub fn accepts(&self, value: i32) -> bool {
        match self {
            Self::Scale { .. } => (1..=7).contains(&value),
            Self::Binary { .. } => value == 1 || value == 7,
            Self::LabeledChoice { options } => options.iter().any(|o| o.value == value),
        }
    }
}

/// A single questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

/// Identifier of one of the three fixed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    A,
    B,
    C,
}

impl SectionId {
    /// The id range this section owns.
    pub fn ids(&self) -> RangeInclusive<u32> {
        match self {
            Self::A => 1..=10,
            Self::B => 11..=20,
            Self::C => 21..=29,
        }
    }

    /// Resolve the section a question id belongs to.
    pub fn of_question(id: u32) -> Option<SectionId> {
        [Self::A, Self::B, Self::C]
            .into_iter()
            .find(|s| s.ids().contains(&id))
    }

    pub fn next(&self) -> Option<SectionId> {
        match self {
            Self::A => Some(Self::B),
            Self::B => Some(Self::C),
            Self::C => None,
        }
    }

    pub fn prev(&self) -> Option<SectionId> {
        match self {
            Self::A => None,
            Self::B => Some(Self::A),
            Self::C => Some(Self::B),
        }
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::C)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        };
        write!(f, "{s}")
    }
}

/// An ordered, fixed-size group of questions.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub intro: &'static str,
    pub questions: &'static [Question],
}

impl Section {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }
}

const fn scale(id: u32, prompt: &'static str, aggressive: bool) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Scale { aggressive },
    }
}

const fn binary(id: u32, prompt: &'static str, aggressive: bool) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Binary { aggressive },
    }
}

const fn choice(id: u32, prompt: &'static str, options: &'static [ChoiceOption]) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::LabeledChoice { options },
    }
}

static SECTION_A: [Question; 10] = [
    scale(1, "When I think of hotpot, I think of dieting.", false),
    scale(2, "When I think of premium quality, I think: too expensive.", false),
    scale(3, "When I think of high dividends, I think: I need that.", false),
    scale(4, "When I think of a market crash, I think of buying the dip.", true),
    scale(
        5,
        "When I think of investing with borrowed money, I think of going broke faster.",
        false,
    ),
    scale(6, "When I think of buy-and-hold dividend stocks, I get bored.", true),
    scale(7, "When I think of signing a contract, I feel tied down.", true),
    scale(8, "When I think of an all-you-can-eat buffet, it feels hollow.", false),
    scale(
        9,
        "When I think of my kids' education, I think of sending them abroad.",
        true,
    ),
    scale(
        10,
        "When I buy a phone, I already know exactly which brand it will be.",
        false,
    ),
];

static SEEDLING_OPTIONS: [ChoiceOption; 2] = [
    ChoiceOption {
        value: 7,
        label: "Jack's magic beanstalk (high risk, high reward)",
    },
    ChoiceOption {
        value: 1,
        label: "Steady-dividend apple tree (stable income)",
    },
];

static HOMESTEAD_OPTIONS: [ChoiceOption; 2] = [
    ChoiceOption {
        value: 1,
        label: "Galactic federation (mature regulation)",
    },
    ChoiceOption {
        value: 7,
        label: "Frontier wilds (no government, high profit)",
    },
];

static SECTION_B: [Question; 10] = [
    binary(
        11,
        "Rather than let my money tree grow, I want it dropping coins every month to spend now.",
        false,
    ),
    binary(
        12,
        "I am in no rush to harvest; reinvest everything and let the money tree grow.",
        true,
    ),
    binary(
        13,
        "Holding the galactic reserve coin (like the US dollar) makes me feel safer.",
        false,
    ),
    binary(
        14,
        "When the neighbor has a bumper harvest, I don't chase it, I tend my own familiar crops.",
        false,
    ),
    binary(
        15,
        "Rather than play it safe, I'd gamble on the future alien mutant great-tree.",
        true,
    ),
    binary(
        16,
        "Letting the robot auto-irrigate beats watering by hand whenever I feel like it.",
        true,
    ),
    binary(
        17,
        "This tree is an heirloom for the next generation, not something for me to use.",
        true,
    ),
    binary(
        18,
        "Chasing coin freedom is about retiring completely from hard farming.",
        false,
    ),
    choice(
        19,
        "At the cosmic seedling exchange you may buy exactly one seedling. Which one?",
        &SEEDLING_OPTIONS,
    ),
    choice(
        20,
        "The cosmic agriculture bureau opens new star systems for homesteading. Where to?",
        &HOMESTEAD_OPTIONS,
    ),
];

static SECTION_C: [Question; 9] = [
    scale(
        21,
        "I often realize only afterwards that a decision was driven by emotion.",
        true,
    ),
    scale(
        22,
        "Without someone reminding me, I easily lose track of long-term plans.",
        true,
    ),
    scale(
        23,
        "I fear making a wrong decision more than missing an opportunity.",
        false,
    ),
    scale(
        24,
        "Seeing other people profit makes me rethink my own allocation.",
        true,
    ),
    scale(
        25,
        "If there's a queue outside a popular restaurant, I'll join it to try the place.",
        true,
    ),
    scale(
        26,
        "At a familiar restaurant I order the same dish every single time.",
        false,
    ),
    scale(
        27,
        "When I buy a new phone, I always add the accident insurance.",
        false,
    ),
    scale(
        28,
        "In a raffle I'd take a guaranteed small prize over a 50% shot at the big one.",
        false,
    ),
    scale(
        29,
        "I'd rather have a higher base salary than a shot at a bonus.",
        false,
    ),
];

static SECTIONS: [Section; 3] = [
    Section {
        id: SectionId::A,
        title: "Word association",
        intro: "Rate your gut agreement with these everyday statements.",
        questions: &SECTION_A,
    },
    Section {
        id: SectionId::B,
        title: "Intuition round",
        intro: "Forget the numbers, let's hear what your instincts say.",
        questions: &SECTION_B,
    },
    Section {
        id: SectionId::C,
        title: "Decision scenarios",
        intro: "In the real investing world, how do you usually react?",
        questions: &SECTION_C,
    },
];

/// All three sections in order.
pub fn sections() -> &'static [Section; 3] {
    &SECTIONS
}

/// The section definition for an id.
pub fn section(id: SectionId) -> &'static Section {
    match id {
        SectionId::A => &SECTIONS[0],
        SectionId::B => &SECTIONS[1],
        SectionId::C => &SECTIONS[2],
    }
}

/// Look up a question by id across the three fixed sections.
pub fn question_by_id(id: u32) -> Option<&'static Question> {
    let section_id = SectionId::of_question(id)?;
    let sec = section(section_id);
    let offset = (id - *sec.id.ids().start()) as usize;
    sec.questions.get(offset)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn ids_are_unique_and_cover_1_to_29() {
        let ids: BTreeSet<u32> = sections()
            .iter()
            .flat_map(|s| s.questions.iter().map(|q| q.id))
            .collect();
        assert_eq!(ids.len(), TOTAL_QUESTIONS);
        assert_eq!(ids.iter().copied().collect::<Vec<_>>(), (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn section_sizes() {
        assert_eq!(section(SectionId::A).len(), 10);
        assert_eq!(section(SectionId::B).len(), 10);
        assert_eq!(section(SectionId::C).len(), 9);
    }

    #[test]
    fn ids_partition_by_range_rule() {
        for sec in sections() {
            for q in sec.questions {
                assert!(sec.id.ids().contains(&q.id), "question {} outside section {}", q.id, sec.id);
                assert_eq!(SectionId::of_question(q.id), Some(sec.id));
            }
        }
        assert_eq!(SectionId::of_question(0), None);
        assert_eq!(SectionId::of_question(30), None);
    }

    #[test]
    fn question_lookup_matches_position() {
        for sec in sections() {
            for q in sec.questions {
                let found = question_by_id(q.id).unwrap();
                assert_eq!(found.id, q.id);
                assert_eq!(found.prompt, q.prompt);
            }
        }
        assert!(question_by_id(0).is_none());
        assert!(question_by_id(99).is_none());
    }

    #[test]
    fn binary_and_choice_values_are_one_or_seven() {
        for q in section(SectionId::B).questions {
            match q.kind {
                QuestionKind::Binary { .. } => {
                    assert!(q.kind.accepts(1) && q.kind.accepts(7));
                    assert!(!q.kind.accepts(4));
                }
                QuestionKind::LabeledChoice { options } => {
                    let values: BTreeSet<i32> = options.iter().map(|o| o.value).collect();
                    assert_eq!(values, BTreeSet::from([1, 7]));
                }
                QuestionKind::Scale { .. } => panic!("section B has no scale questions"),
            }
        }
    }

    #[test]
    fn scale_accepts_full_likert_range() {
        let q = question_by_id(1).unwrap();
        for v in 1..=7 {
            assert!(q.kind.accepts(v));
        }
        assert!(!q.kind.accepts(0));
        assert!(!q.kind.accepts(8));
    }

    #[test]
    fn auto_advance_by_kind() {
        assert!(!question_by_id(1).unwrap().kind.auto_advances());
        assert!(question_by_id(11).unwrap().kind.auto_advances());
        assert!(question_by_id(19).unwrap().kind.auto_advances());
    }

    #[test]
    fn section_ordering() {
        assert_eq!(SectionId::A.next(), Some(SectionId::B));
        assert_eq!(SectionId::B.next(), Some(SectionId::C));
        assert_eq!(SectionId::C.next(), None);
        assert_eq!(SectionId::A.prev(), None);
        assert_eq!(SectionId::C.prev(), Some(SectionId::B));
        assert!(SectionId::C.is_last());
        assert!(!SectionId::A.is_last());
    }
}
