use chrono::NaiveDate;

use crate::journal::{recent_records, RECENT_WINDOW_DAYS};
use crate::models::{AverageTemperature, HealthRecord};
use crate::questionnaire::{
    AnswerSet, QUESTION_FEVER, QUESTION_HOME_REMEDIES, QUESTION_MEDICATION, QUESTION_MOBILITY,
    QUESTION_SUPPORT, YES,
};

use super::types::HealthSummary;

/// Lowest home-remedies level; also the value used when unanswered.
pub const MIN_REMEDIES_LEVEL: u8 = 1;
pub const MAX_REMEDIES_LEVEL: u8 = 5;

/// The five questionnaire answers reduced to what the rules branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub has_fever: bool,
    pub is_on_medication: bool,
    pub home_remedies_level: u8,
    pub can_walk_to_hospital: bool,
    pub has_support: bool,
}

impl Signals {
    /// Missing or unrecognised answers read as "no" / least stocked.
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let yes = |id: &str| answers.value(id) == Some(YES);

        let home_remedies_level = answers
            .value(QUESTION_HOME_REMEDIES)
            .and_then(|v| v.trim().parse::<u8>().ok())
            .map(|level| level.clamp(MIN_REMEDIES_LEVEL, MAX_REMEDIES_LEVEL))
            .unwrap_or(MIN_REMEDIES_LEVEL);

        Self {
            has_fever: yes(QUESTION_FEVER),
            is_on_medication: yes(QUESTION_MEDICATION),
            home_remedies_level,
            can_walk_to_hospital: yes(QUESTION_MOBILITY),
            has_support: yes(QUESTION_SUPPORT),
        }
    }

    /// Level 4 or 5.
    pub fn well_stocked(&self) -> bool {
        self.home_remedies_level >= 4
    }

    /// Level 1 or 2.
    pub fn under_stocked(&self) -> bool {
        self.home_remedies_level <= 2
    }
}

/// Summarises records from the trailing window ending `today`.
pub fn summarize_recent(records: &[HealthRecord], today: NaiveDate) -> HealthSummary {
    let recent = recent_records(records, today, RECENT_WINDOW_DAYS);
    HealthSummary {
        recent_record_count: recent.len(),
        average_temperature: AverageTemperature::of(recent.iter().copied()),
        has_recent_fever: recent.iter().any(|r| r.is_febrile()),
        has_recent_symptoms: recent.iter().any(|r| r.has_notable_symptoms()),
    }
}
