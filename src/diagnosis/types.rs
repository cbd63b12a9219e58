use serde::{Deserialize, Serialize};

use crate::models::{AverageTemperature, UrgencyLevel};

/// Notice shown under every diagnosis result.
pub const DISCLAIMER: &str = "This result is reference information based on your answers and \
health records. It does not replace a diagnosis from a doctor. If a symptom worries you, or in \
an emergency, see a medical professional without hesitation.";

/// One advice card: what is going on and what to do, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub content: String,
    pub actions: Vec<String>,
}

/// Echo of the recent-history figures the diagnosis was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub recent_record_count: usize,
    pub average_temperature: AverageTemperature,
    pub has_recent_fever: bool,
    pub has_recent_symptoms: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub urgency_level: UrgencyLevel,
    pub recommendations: Vec<Recommendation>,
    /// One-paragraph reading of the record history and living situation.
    pub situation_summary: String,
    pub health_summary: HealthSummary,
}

impl UrgencyLevel {
    /// Closing advice for the result screen.
    pub fn follow_up_advice(&self) -> &'static str {
        match self {
            Self::High => {
                "Once you start to recover, keep recording so you can see how the recovery goes."
            }
            Self::Medium => {
                "Keep recording regularly so changes are spotted early and handled well."
            }
            Self::Low => "Keep recording regularly to hold on to your current good condition.",
        }
    }
}
