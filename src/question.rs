use rand::{seq::SliceRandom, Rng};

use crate::{source::RawQuestion, text::decode_entities};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerId(u64);

/// Hands out ids that stay unique for the lifetime of one controller,
/// so a fresh round never shares an id with the round it replaces.
#[derive(Debug, Default)]
pub struct IdGen(u64);

impl IdGen {
    fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn question(&mut self) -> QuestionId {
        QuestionId(self.next())
    }

    pub fn answer(&mut self) -> AnswerId {
        AnswerId(self.next())
    }
}

/// Grading outcome of a single answer. Stays `Unset` on every answer
/// the user did not select, graded or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correctness {
    Unset,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    pub is_correct: bool,
    pub is_selected: bool,
    pub is_graded: bool,
    pub correctness: Correctness,
}

impl Answer {
    fn new(id: AnswerId, text: String, is_correct: bool) -> Self {
        Self {
            id,
            text,
            is_correct,
            is_selected: false,
            is_graded: false,
            correctness: Correctness::Unset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Shuffled once at creation, fixed afterwards.
    pub answers: Vec<Answer>,
    pub is_answered: bool,
}

impl Question {
    pub fn selected(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_selected)
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    pub questions: Vec<Question>,
    pub is_graded: bool,
    pub score: usize,
}

/// Turns one fetched batch into a playable round: texts decoded, ids
/// assigned, answer order shuffled, all selection and grading flags
/// cleared.
pub fn build_round(records: Vec<RawQuestion>, ids: &mut IdGen, rng: &mut impl Rng) -> Round {
    let questions = records
        .into_iter()
        .map(|record| build_question(record, ids, rng))
        .collect();

    Round {
        questions,
        is_graded: false,
        score: 0,
    }
}

fn build_question(record: RawQuestion, ids: &mut IdGen, rng: &mut impl Rng) -> Question {
    let mut answers = Vec::with_capacity(record.incorrect_answers.len() + 1);
    answers.push(Answer::new(
        ids.answer(),
        decode_entities(&record.correct_answer),
        true,
    ));
    for wrong in &record.incorrect_answers {
        answers.push(Answer::new(ids.answer(), decode_entities(wrong), false));
    }
    // Fisher–Yates, not a random comparator sort
    answers.shuffle(rng);

    Question {
        id: ids.question(),
        text: decode_entities(&record.question),
        answers,
        is_answered: false,
    }
}
