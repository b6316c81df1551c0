use anyhow::Result;
use log::{debug, warn};

use crate::{
    question::{build_round, AnswerId, Correctness, IdGen, Question, QuestionId, Round},
    source::{QuestionSource, RoundRequest},
};

/// The one stateful piece of the system. Owns the current round and
/// applies every user-triggered transition; a rendering layer reads
/// the question list and flags and calls the operations below.
#[derive(Debug, Default)]
pub struct Quiz {
    started: bool,
    /// `None` until the first round loads.
    round: Option<Round>,
    ids: IdGen,
    request: RoundRequest,
}

impl Quiz {
    pub fn new(request: RoundRequest) -> Self {
        Self {
            started: false,
            round: None,
            ids: IdGen::default(),
            request,
        }
    }

    /// Flips the gate that shows the quiz at all.
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// The current round's questions; empty before the first load.
    pub fn questions(&self) -> &[Question] {
        self.round
            .as_ref()
            .map(|r| r.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_graded(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.is_graded)
    }

    /// Valid after grading; 0 otherwise.
    pub fn score(&self) -> usize {
        self.round.as_ref().map(|r| r.score).unwrap_or(0)
    }

    /// True once every question in the round holds a selection. False
    /// while no round is loaded.
    pub fn all_answered(&self) -> bool {
        self.round
            .as_ref()
            .is_some_and(|r| r.questions.iter().all(|q| q.is_answered))
    }

    /// Fetches a fresh batch and replaces the held round wholesale. On
    /// fetch or parse failure nothing changes and the current round
    /// stays as it was.
    pub async fn load_new_round(&mut self, source: &impl QuestionSource) -> Result<()> {
        let records = source.fetch(&self.request).await?;
        let round = build_round(records, &mut self.ids, &mut rand::rng());
        debug!("loaded a round of {} questions", round.questions.len());
        self.round = Some(round);

        Ok(())
    }

    /// Selects one answer within one question, deselecting its
    /// siblings. Ids that do not resolve are ignored, the UI may be
    /// racing a round swap. Selections are frozen once the round is
    /// graded.
    pub fn select_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.is_graded {
            return;
        }
        let Some(question) = round.questions.iter_mut().find(|q| q.id == question_id) else {
            warn!("selection on unknown question {:?}", question_id);
            return;
        };
        if !question.answers.iter().any(|a| a.id == answer_id) {
            warn!("selection on unknown answer {:?}", answer_id);
            return;
        }

        for answer in &mut question.answers {
            answer.is_selected = answer.id == answer_id;
        }
        question.is_answered = true;
    }

    /// Locks in correctness feedback and recomputes the score from the
    /// selection state alone, so repeated calls cannot double-count.
    /// Questions without a selection contribute nothing.
    pub fn grade_round(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let mut score = 0;
        for question in &mut round.questions {
            for answer in &mut question.answers {
                answer.is_graded = true;
                answer.correctness = match (answer.is_selected, answer.is_correct) {
                    (true, true) => Correctness::Correct,
                    (true, false) => Correctness::Incorrect,
                    (false, _) => Correctness::Unset,
                };
            }
            if question.selected().is_some_and(|a| a.is_correct) {
                score += 1;
            }
        }
        round.score = score;
        round.is_graded = true;
        debug!("graded round, score {}/{}", score, round.questions.len());
    }

    /// "Play again": reset the score and the graded flag, then load a
    /// fresh round.
    pub async fn start_new_round(&mut self, source: &impl QuestionSource) -> Result<()> {
        if let Some(round) = self.round.as_mut() {
            round.score = 0;
            round.is_graded = false;
        }
        self.load_new_round(source).await
    }
}
