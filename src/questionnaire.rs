//! Diagnosis questionnaire: the question set and the step-by-step session.
//!
//! A [`QuestionnaireSession`] walks the user through an ordered question
//! list one question at a time. Moving forward requires an answer to the
//! current question; a rejected transition never changes the session.
//! On the last question, [`QuestionnaireSession::submit`] hands the
//! collected answers to the diagnosis engine.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::diagnosis::{self, Diagnosis};
use crate::models::{HealthRecord, QuestionKind};

// ═══════════════════════════════════════════
// Constants: question ids and yes/no options
// ═══════════════════════════════════════════

pub const QUESTION_FEVER: &str = "fever";
pub const QUESTION_MEDICATION: &str = "medication";
pub const QUESTION_HOME_REMEDIES: &str = "homeRemedies";
pub const QUESTION_MOBILITY: &str = "mobility";
pub const QUESTION_SUPPORT: &str = "support";

pub const YES: &str = "yes";
pub const NO: &str = "no";

/// Points on a scale question.
pub const SCALE_POINTS: usize = 5;

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireError {
    #[error("Question '{question_id}' has not been answered")]
    NotAnswered { question_id: String },

    #[error("Option {index} is out of range for question '{question_id}' ({option_count} options)")]
    InvalidOption {
        question_id: String,
        index: usize,
        option_count: usize,
    },

    #[error("Cannot answer step {requested} while at step {current}")]
    WrongStep { requested: usize, current: usize },

    #[error("Already at the last question")]
    NoNextQuestion,

    #[error("Already at the first question")]
    NoPreviousQuestion,

    #[error("Submit is only available on the last question (at step {step} of {last})")]
    NotAtLastStep { step: usize, last: usize },

    #[error("A questionnaire needs at least one question")]
    EmptyQuestionnaire,

    #[error("Duplicate question id: {0}")]
    DuplicateQuestionId(String),
}

// ═══════════════════════════════════════════
// Questions
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: Vec<String>,
    /// One label per scale point; scale questions only.
    pub scale_labels: Option<Vec<String>>,
}

impl Question {
    pub fn yes_no(id: &str, text: &str) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::YesNo,
            options: vec![YES.into(), NO.into()],
            scale_labels: None,
        }
    }

    /// Options are `"1"` through `"5"`.
    pub fn scale(id: &str, text: &str, labels: [&str; SCALE_POINTS]) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: QuestionKind::Scale,
            options: (1..=SCALE_POINTS).map(|n| n.to_string()).collect(),
            scale_labels: Some(labels.iter().map(|l| l.to_string()).collect()),
        }
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Labels shown under the two ends of a scale.
    pub fn endpoint_labels(&self) -> Option<(&str, &str)> {
        let labels = self.scale_labels.as_ref()?;
        Some((labels.first()?.as_str(), labels.last()?.as_str()))
    }
}

/// The five-question set used by the diagnosis flow.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::yes_no(QUESTION_FEVER, "Do you have a fever?"),
        Question::yes_no(
            QUESTION_MEDICATION,
            "Are you currently taking any medication?",
        ),
        Question::scale(
            QUESTION_HOME_REMEDIES,
            "How well stocked is your home with over-the-counter remedies?",
            ["None at all", "A little", "Some", "Quite a lot", "Plenty"],
        ),
        Question::yes_no(QUESTION_MOBILITY, "Could you walk to a hospital?"),
        Question::yes_no(QUESTION_SUPPORT, "Is there someone you can rely on right now?"),
    ]
}

// ═══════════════════════════════════════════
// Answers
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub selected_index: usize,
    /// Option text at `selected_index`.
    pub value: String,
    /// Scale label for scale questions, option text otherwise.
    pub label: String,
}

impl Answer {
    pub fn for_option(question: &Question, index: usize) -> Result<Self, QuestionnaireError> {
        let value = question
            .options
            .get(index)
            .ok_or_else(|| QuestionnaireError::InvalidOption {
                question_id: question.id.clone(),
                index,
                option_count: question.option_count(),
            })?
            .clone();

        let label = match (question.kind, &question.scale_labels) {
            (QuestionKind::Scale, Some(labels)) => {
                labels.get(index).cloned().unwrap_or_else(|| value.clone())
            }
            _ => value.clone(),
        };

        Ok(Self {
            question_id: question.id.clone(),
            selected_index: index,
            value,
            label,
        })
    }
}

/// Answers keyed by question id; at most one per question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(HashMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `answer`, replacing any earlier answer to the same question.
    pub fn insert(&mut self, answer: Answer) -> &Answer {
        match self.0.entry(answer.question_id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(answer);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(answer),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    /// The stored option text for `question_id`.
    pub fn value(&self, question_id: &str) -> Option<&str> {
        self.get(question_id).map(|a| a.value.as_str())
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.0.values()
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = Self::new();
        for answer in iter {
            set.insert(answer);
        }
        set
    }
}

// ═══════════════════════════════════════════
// UI driver view types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
}

/// Which navigation controls the question screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub show_previous: bool,
    pub show_next: bool,
    pub show_submit: bool,
    pub next_enabled: bool,
    pub submit_enabled: bool,
}

// ═══════════════════════════════════════════
// Session
// ═══════════════════════════════════════════

/// One pass through the questionnaire. Owned by the UI; never global.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession {
    id: Uuid,
    questions: Vec<Question>,
    step: usize,
    answers: AnswerSet,
}

impl QuestionnaireSession {
    /// Starts a session over `questions`, which must be non-empty with unique ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionnaireError> {
        if questions.is_empty() {
            return Err(QuestionnaireError::EmptyQuestionnaire);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(QuestionnaireError::DuplicateQuestionId(q.id.clone()));
            }
        }

        Ok(Self::open(questions))
    }

    /// Session over [`default_questions`].
    pub fn with_default_questions() -> Self {
        Self::open(default_questions())
    }

    fn open(questions: Vec<Question>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            questions,
            step: 0,
            answers: AnswerSet::new(),
        };
        tracing::debug!(session = %session.id, questions = session.questions.len(), "Questionnaire opened");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 0-based index of the current question.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.step]
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 == self.questions.len()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Option already chosen for the current question, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.answers
            .get(&self.current_question().id)
            .map(|a| a.selected_index)
    }

    fn current_answered(&self) -> bool {
        self.answers.contains(&self.current_question().id)
    }

    pub fn progress(&self) -> Progress {
        let position = self.step + 1;
        let total = self.questions.len();
        Progress {
            position,
            total,
            percent: position as f64 / total as f64 * 100.0,
        }
    }

    pub fn navigation(&self) -> Navigation {
        let answered = self.current_answered();
        let last = self.is_last();
        Navigation {
            show_previous: !self.is_first(),
            show_next: !last && answered,
            show_submit: last && answered,
            next_enabled: answered,
            submit_enabled: answered,
        }
    }

    // ── Transitions ─────────────────────────────────────────

    /// Records the option chosen for question `step`. Does not advance.
    pub fn select_answer(
        &mut self,
        step: usize,
        answer_index: usize,
    ) -> Result<&Answer, QuestionnaireError> {
        if step != self.step {
            return Err(QuestionnaireError::WrongStep {
                requested: step,
                current: self.step,
            });
        }
        let answer = Answer::for_option(self.current_question(), answer_index)?;
        tracing::debug!(session = %self.id, question = %answer.question_id, index = answer_index, "Answer selected");
        Ok(self.answers.insert(answer))
    }

    pub fn go_next(&mut self) -> Result<usize, QuestionnaireError> {
        if self.is_last() {
            return Err(QuestionnaireError::NoNextQuestion);
        }
        if !self.current_answered() {
            return Err(QuestionnaireError::NotAnswered {
                question_id: self.current_question().id.clone(),
            });
        }
        self.step += 1;
        tracing::debug!(session = %self.id, step = self.step, "Moved to next question");
        Ok(self.step)
    }

    /// Steps back; the earlier answer stays available via [`Self::selected_index`].
    pub fn go_previous(&mut self) -> Result<usize, QuestionnaireError> {
        if self.is_first() {
            return Err(QuestionnaireError::NoPreviousQuestion);
        }
        self.step -= 1;
        tracing::debug!(session = %self.id, step = self.step, "Moved to previous question");
        Ok(self.step)
    }

    /// Back to the first question with no answers.
    pub fn reset(&mut self) {
        self.step = 0;
        self.answers.clear();
        tracing::debug!(session = %self.id, "Questionnaire reset");
    }

    /// Runs the diagnosis. Only valid on the answered last question.
    pub fn submit(
        &self,
        records: &[HealthRecord],
        today: NaiveDate,
    ) -> Result<Diagnosis, QuestionnaireError> {
        if !self.is_last() {
            return Err(QuestionnaireError::NotAtLastStep {
                step: self.step,
                last: self.questions.len() - 1,
            });
        }
        if !self.current_answered() {
            return Err(QuestionnaireError::NotAnswered {
                question_id: self.current_question().id.clone(),
            });
        }

        let result = diagnosis::diagnose(&self.answers, records, today);
        tracing::info!(
            session = %self.id,
            urgency = %result.urgency_level,
            "Diagnosis generated"
        );
        Ok(result)
    }
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::with_default_questions()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrgencyLevel;
    use chrono::Utc;

    fn session() -> QuestionnaireSession {
        QuestionnaireSession::with_default_questions()
    }

    /// Answers every question with `indices[i]`, leaving the session on the last step.
    fn answer_all(s: &mut QuestionnaireSession, indices: &[usize]) {
        for (step, &index) in indices.iter().enumerate() {
            s.select_answer(step, index).unwrap();
            if step + 1 < indices.len() {
                s.go_next().unwrap();
            }
        }
    }

    // ───────────────────────────────────────
    // question set tests
    // ───────────────────────────────────────

    #[test]
    fn default_questions_shape() {
        let qs = default_questions();
        assert_eq!(qs.len(), 5);
        let ids: Vec<&str> = qs.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                QUESTION_FEVER,
                QUESTION_MEDICATION,
                QUESTION_HOME_REMEDIES,
                QUESTION_MOBILITY,
                QUESTION_SUPPORT
            ]
        );
        for q in &qs {
            match q.kind {
                QuestionKind::YesNo => assert_eq!(q.options, vec!["yes", "no"]),
                QuestionKind::Scale => {
                    assert_eq!(q.options, vec!["1", "2", "3", "4", "5"]);
                    assert_eq!(q.scale_labels.as_ref().unwrap().len(), 5);
                }
            }
        }
    }

    #[test]
    fn scale_endpoint_labels() {
        let qs = default_questions();
        assert_eq!(qs[2].endpoint_labels(), Some(("None at all", "Plenty")));
        assert_eq!(qs[0].endpoint_labels(), None);
    }

    #[test]
    fn question_and_answer_serialize_camel_case() {
        let q = &default_questions()[2];
        let json = serde_json::to_value(q).unwrap();
        assert_eq!(json["type"], "scale");
        assert_eq!(json["scaleLabels"][4], "Plenty");
        assert!(json.get("kind").is_none());

        let answer = serde_json::to_value(Answer::for_option(q, 1).unwrap()).unwrap();
        assert_eq!(answer["questionId"], QUESTION_HOME_REMEDIES);
        assert_eq!(answer["selectedIndex"], 1);
        assert_eq!(answer["value"], "2");

        let parsed: Question = serde_json::from_value(json).unwrap();
        assert_eq!(&parsed, q);
    }

    #[test]
    fn scale_answer_stores_one_based_value_and_label() {
        let qs = default_questions();
        let answer = Answer::for_option(&qs[2], 0).unwrap();
        assert_eq!(answer.value, "1");
        assert_eq!(answer.label, "None at all");
        let answer = Answer::for_option(&qs[2], 4).unwrap();
        assert_eq!(answer.value, "5");
    }

    // ───────────────────────────────────────
    // construction tests
    // ───────────────────────────────────────

    #[test]
    fn empty_question_list_rejected() {
        assert_eq!(
            QuestionnaireSession::new(vec![]).unwrap_err(),
            QuestionnaireError::EmptyQuestionnaire
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let qs = vec![Question::yes_no("a", "A?"), Question::yes_no("a", "Again?")];
        assert_eq!(
            QuestionnaireSession::new(qs).unwrap_err(),
            QuestionnaireError::DuplicateQuestionId("a".into())
        );
    }

    #[test]
    fn default_and_custom_sessions_start_alike() {
        let default = QuestionnaireSession::default();
        let custom = QuestionnaireSession::new(default_questions()).unwrap();
        assert_eq!(default.questions(), custom.questions());
        assert_eq!((default.step(), custom.step()), (0, 0));
        assert!(default.answers().is_empty() && custom.answers().is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let mut a = session();
        let b = session();
        a.select_answer(0, 0).unwrap();
        assert!(b.answers().is_empty());
        assert_ne!(a.id(), b.id());
    }

    // ───────────────────────────────────────
    // navigation tests
    // ───────────────────────────────────────

    #[test]
    fn next_without_answer_rejected_and_state_unchanged() {
        let mut s = session();
        let err = s.go_next().unwrap_err();
        assert_eq!(
            err,
            QuestionnaireError::NotAnswered { question_id: QUESTION_FEVER.into() }
        );
        assert_eq!(s.step(), 0);
    }

    #[test]
    fn select_next_previous_keeps_selection() {
        let mut s = session();
        s.select_answer(0, 1).unwrap();
        assert_eq!(s.step(), 0);
        assert_eq!(s.go_next().unwrap(), 1);
        assert_eq!(s.selected_index(), None);
        assert_eq!(s.go_previous().unwrap(), 0);
        assert_eq!(s.selected_index(), Some(1));
    }

    #[test]
    fn reselecting_overwrites_answer() {
        let mut s = session();
        let first = s.select_answer(0, 0).unwrap();
        assert_eq!(first.value, "yes");
        let second = s.select_answer(0, 1).unwrap();
        assert_eq!((second.selected_index, second.value.as_str()), (1, "no"));
        assert_eq!(s.answers().len(), 1);
        assert_eq!(s.answers().value(QUESTION_FEVER), Some("no"));
    }

    #[test]
    fn invalid_option_rejected() {
        let mut s = session();
        let err = s.select_answer(0, 2).unwrap_err();
        assert!(matches!(
            err,
            QuestionnaireError::InvalidOption { index: 2, option_count: 2, .. }
        ));
        assert!(s.answers().is_empty());
    }

    #[test]
    fn answering_other_step_rejected() {
        let mut s = session();
        let err = s.select_answer(1, 0).unwrap_err();
        assert_eq!(err, QuestionnaireError::WrongStep { requested: 1, current: 0 });
        assert!(s.answers().is_empty());
    }

    #[test]
    fn previous_on_first_rejected() {
        let mut s = session();
        assert_eq!(s.go_previous().unwrap_err(), QuestionnaireError::NoPreviousQuestion);
    }

    #[test]
    fn next_on_last_rejected() {
        let mut s = session();
        answer_all(&mut s, &[1, 1, 0, 0, 0]);
        assert!(s.is_last());
        assert_eq!(s.go_next().unwrap_err(), QuestionnaireError::NoNextQuestion);
        assert_eq!(s.step(), 4);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = session();
        answer_all(&mut s, &[0, 0, 2]);
        s.reset();
        assert_eq!(s.step(), 0);
        assert!(s.answers().is_empty());
    }

    #[test]
    fn progress_tracks_position() {
        let mut s = session();
        let p = s.progress();
        assert_eq!((p.position, p.total), (1, 5));
        assert!((p.percent - 20.0).abs() < 1e-9);
        answer_all(&mut s, &[0, 0, 0, 0]);
        assert_eq!(s.progress().position, 4);
    }

    #[test]
    fn navigation_buttons_follow_answer_state() {
        let mut s = session();
        let nav = s.navigation();
        assert!(!nav.show_previous);
        assert!(!nav.show_next);
        assert!(!nav.next_enabled);
        assert!(!nav.show_submit);

        s.select_answer(0, 0).unwrap();
        let nav = s.navigation();
        assert!(nav.show_next && nav.next_enabled);
        assert!(!nav.show_submit);

        answer_all(&mut s, &[0, 0, 0, 0]);
        s.go_next().unwrap();
        let nav = s.navigation();
        assert!(nav.show_previous);
        assert!(!nav.show_next);
        assert!(!nav.show_submit);

        s.select_answer(4, 0).unwrap();
        let nav = s.navigation();
        assert!(nav.show_submit && nav.submit_enabled);
    }

    // ───────────────────────────────────────
    // submit tests
    // ───────────────────────────────────────

    #[test]
    fn submit_before_last_step_rejected() {
        let mut s = session();
        s.select_answer(0, 0).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(
            s.submit(&[], today).unwrap_err(),
            QuestionnaireError::NotAtLastStep { step: 0, last: 4 }
        );
    }

    #[test]
    fn submit_unanswered_last_rejected() {
        let mut s = session();
        answer_all(&mut s, &[0, 0, 0, 0]);
        s.go_next().unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(
            s.submit(&[], today).unwrap_err(),
            QuestionnaireError::NotAnswered { question_id: QUESTION_SUPPORT.into() }
        );
    }

    #[test]
    fn submit_runs_diagnosis() {
        let mut s = session();
        // fever no, medication no, remedies 5, mobility yes, support yes
        answer_all(&mut s, &[1, 1, 4, 0, 0]);
        let today = Utc::now().date_naive();
        let diagnosis = s.submit(&[], today).unwrap();
        assert_eq!(diagnosis.urgency_level, UrgencyLevel::Low);
        assert_eq!(diagnosis.recommendations.len(), 1);
    }

    #[test]
    fn single_question_session_can_submit_immediately() {
        let mut s = QuestionnaireSession::new(vec![Question::yes_no(QUESTION_FEVER, "Fever?")])
            .unwrap();
        assert!(s.is_first() && s.is_last());
        s.select_answer(0, 0).unwrap();
        let today = Utc::now().date_naive();
        let diagnosis = s.submit(&[], today).unwrap();
        assert_eq!(diagnosis.urgency_level, UrgencyLevel::Medium);
    }
}
