//! Rule-based diagnosis engine.
//!
//! `diagnose` is a pure function of the questionnaire answers, the stored
//! records and the evaluation date:
//! 1. Recent history: records from the trailing 7 days ([`summarize_recent`])
//! 2. Signals: the five answers reduced to booleans plus a stock level
//! 3. Classification: urgency tier, then one [`Variant`] within it
//! 4. Assembly: a single recommendation for the variant
//!
//! The engine has no error path. Missing or malformed answers fall to the
//! "no" / least-stocked branch.

mod content;
mod rules;
mod signals;
mod situation;
mod types;

pub use content::recommendation;
pub use rules::{classify, tier, Variant};
pub use signals::{summarize_recent, Signals, MAX_REMEDIES_LEVEL, MIN_REMEDIES_LEVEL};
pub use situation::{analyze, environment_factors, SituationAnalysis};
pub use types::*;

use chrono::{Local, NaiveDate};

use crate::models::HealthRecord;
use crate::questionnaire::AnswerSet;

/// Produces the diagnosis for `answers` against `records`, as of `today`.
pub fn diagnose(answers: &AnswerSet, records: &[HealthRecord], today: NaiveDate) -> Diagnosis {
    let health_summary = summarize_recent(records, today);
    let signals = Signals::from_answers(answers);
    let situation = analyze(&signals, &health_summary);
    let variant = classify(&signals, &health_summary);

    tracing::debug!(
        ?variant,
        recent = health_summary.recent_record_count,
        "Diagnosis variant selected"
    );

    Diagnosis {
        urgency_level: variant.urgency(),
        recommendations: vec![recommendation(variant, &signals, &situation)],
        situation_summary: situation.summary,
        health_summary,
    }
}

/// [`diagnose`] as of the local calendar date.
pub fn diagnose_now(answers: &AnswerSet, records: &[HealthRecord]) -> Diagnosis {
    diagnose(answers, records, Local::now().date_naive())
}
