use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Temperature at or above which a day counts as febrile (°C).
pub const FEVER_THRESHOLD_C: f64 = 37.5;

/// Throat/nose severity at or above which a day counts as symptomatic.
pub const SYMPTOM_SEVERITY_THRESHOLD: u8 = 3;

/// One journal entry. At most one per `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub date: NaiveDate,
    pub temperature: f64,
    pub throat_pain: u8,
    pub runny_nose: u8,
    pub timestamp: DateTime<Utc>,
}

impl HealthRecord {
    pub fn is_febrile(&self) -> bool {
        self.temperature >= FEVER_THRESHOLD_C
    }

    pub fn has_notable_symptoms(&self) -> bool {
        self.throat_pain >= SYMPTOM_SEVERITY_THRESHOLD
            || self.runny_nose >= SYMPTOM_SEVERITY_THRESHOLD
    }
}

/// Raw entry form. Every field may be missing until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthRecordInput {
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
    pub temperature: Option<f64>,
    pub throat_pain: Option<u8>,
    pub runny_nose: Option<u8>,
}

impl From<&HealthRecord> for HealthRecordInput {
    /// Pre-fills the form when editing an existing day.
    fn from(record: &HealthRecord) -> Self {
        Self {
            date: Some(record.date),
            temperature: Some(record.temperature),
            throat_pain: Some(record.throat_pain),
            runny_nose: Some(record.runny_nose),
        }
    }
}

/// Placeholder shown instead of an average when there is nothing to average.
pub const NO_DATA_SENTINEL: &str = "--";

/// Mean temperature rounded to one decimal, or no data.
///
/// Serialized as a string: `"36.8"` or `"--"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AverageTemperature {
    Celsius(f64),
    NoData,
}

impl AverageTemperature {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a HealthRecord>,
    {
        let (sum, count) = records
            .into_iter()
            .fold((0.0_f64, 0_u32), |(sum, n), r| (sum + r.temperature, n + 1));
        if count == 0 {
            return Self::NoData;
        }
        let mean = sum / f64::from(count);
        Self::Celsius((mean * 10.0).round() / 10.0)
    }

    pub fn celsius(&self) -> Option<f64> {
        match self {
            Self::Celsius(v) => Some(*v),
            Self::NoData => None,
        }
    }
}

impl fmt::Display for AverageTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius(v) => write!(f, "{v:.1}"),
            Self::NoData => f.write_str(NO_DATA_SENTINEL),
        }
    }
}

impl From<AverageTemperature> for String {
    fn from(avg: AverageTemperature) -> Self {
        avg.to_string()
    }
}

impl TryFrom<String> for AverageTemperature {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw == NO_DATA_SENTINEL {
            return Ok(Self::NoData);
        }
        raw.parse::<f64>()
            .map(Self::Celsius)
            .map_err(|e| format!("invalid average temperature {raw:?}: {e}"))
    }
}
