//! Daily health journal: record storage, profile, statistics and export.
//!
//! All data lives in a [`KeyValueStore`] as two JSON blobs: the record
//! array under [`HEALTH_RECORDS_KEY`] and the profile under
//! [`USER_PROFILE_KEY`]. Saving is read-modify-write of the whole array,
//! so a store must only have one writer at a time.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{read_json, write_json, DatabaseError, KeyValueStore};
use crate::models::{AverageTemperature, HealthRecord, HealthRecordInput, UserProfile};

// ═══════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════

pub const HEALTH_RECORDS_KEY: &str = "healthRecords";
pub const USER_PROFILE_KEY: &str = "userProfile";

pub const TEMPERATURE_MIN_C: f64 = 35.0;
pub const TEMPERATURE_MAX_C: f64 = 42.0;

pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 5;

/// Trailing window, in days, that counts as "recent".
pub const RECENT_WINDOW_DAYS: i64 = 7;

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Storage error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Temperature must be between 35.0 and 42.0 °C, got {0}")]
    TemperatureOutOfRange(f64),

    #[error("{field} must be between 1 and 5, got {value}")]
    SeverityOutOfRange { field: &'static str, value: u8 },
}

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// Whether a save added a new day or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Figures for the "my page" summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStats {
    pub total_records: usize,
    pub average_temperature: AverageTemperature,
    /// Consecutive days with a record, ending today.
    pub streak_days: u32,
}

/// Full data export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthExport {
    pub profile: UserProfile,
    pub health_records: Vec<HealthRecord>,
    pub export_date: DateTime<Utc>,
}

// ═══════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════

/// Turns the entry form into a record. Nothing is stored here.
pub fn validate_entry(
    input: &HealthRecordInput,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<HealthRecord, JournalError> {
    let temperature = input
        .temperature
        .ok_or(JournalError::MissingField("temperature"))?;
    let throat_pain = input
        .throat_pain
        .ok_or(JournalError::MissingField("throat_pain"))?;
    let runny_nose = input
        .runny_nose
        .ok_or(JournalError::MissingField("runny_nose"))?;

    if !(TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&temperature) {
        return Err(JournalError::TemperatureOutOfRange(temperature));
    }
    check_severity("throat_pain", throat_pain)?;
    check_severity("runny_nose", runny_nose)?;

    Ok(HealthRecord {
        date: input.date.unwrap_or(today),
        temperature,
        throat_pain,
        runny_nose,
        timestamp: now,
    })
}

fn check_severity(field: &'static str, value: u8) -> Result<(), JournalError> {
    if (SEVERITY_MIN..=SEVERITY_MAX).contains(&value) {
        Ok(())
    } else {
        Err(JournalError::SeverityOutOfRange { field, value })
    }
}

// ═══════════════════════════════════════════
// Records
// ═══════════════════════════════════════════

/// All stored records, in storage order. Empty when nothing was saved yet.
pub fn load_records<S>(store: &S) -> Result<Vec<HealthRecord>, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, HEALTH_RECORDS_KEY)?.unwrap_or_default())
}

/// Saves `record`, replacing any record already stored for the same date.
pub fn save_record<S>(store: &S, record: HealthRecord) -> Result<SaveOutcome, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    let mut records = load_records(store)?;
    let outcome = match records.iter_mut().find(|r| r.date == record.date) {
        Some(existing) => {
            *existing = record;
            SaveOutcome::Updated
        }
        None => {
            records.push(record);
            SaveOutcome::Created
        }
    };
    write_json(store, HEALTH_RECORDS_KEY, &records)?;

    tracing::debug!(total = records.len(), ?outcome, "Saved health record");
    Ok(outcome)
}

/// Validates the entry form and saves it. The form submission path.
pub fn record_entry<S>(
    store: &S,
    input: &HealthRecordInput,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<HealthRecord, JournalError>
where
    S: KeyValueStore + ?Sized,
{
    let record = validate_entry(input, today, now)?;
    let outcome = save_record(store, record.clone())?;
    tracing::info!(date = %record.date, ?outcome, "Recorded daily entry");
    Ok(record)
}

/// The record for `date`, if one exists.
pub fn record_for_date<S>(store: &S, date: NaiveDate) -> Result<Option<HealthRecord>, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(load_records(store)?.into_iter().find(|r| r.date == date))
}

/// Records dated within `[today - days, today]`, both ends inclusive.
///
/// A window reaching past the earliest representable date covers
/// everything up to `today`.
pub fn recent_records(records: &[HealthRecord], today: NaiveDate, days: i64) -> Vec<&HealthRecord> {
    let cutoff = Duration::try_days(days)
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN);
    records
        .iter()
        .filter(|r| r.date >= cutoff && r.date <= today)
        .collect()
}

// ═══════════════════════════════════════════
// Statistics
// ═══════════════════════════════════════════

pub fn compute_stats(records: &[HealthRecord], today: NaiveDate) -> HealthStats {
    HealthStats {
        total_records: records.len(),
        average_temperature: AverageTemperature::of(records),
        streak_days: calculate_streak(records, today),
    }
}

/// Consecutive days with a record counting back from `today`.
/// Zero when today itself has no record.
pub fn calculate_streak(records: &[HealthRecord], today: NaiveDate) -> u32 {
    let dates: HashSet<NaiveDate> = records.iter().map(|r| r.date).collect();
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

// ═══════════════════════════════════════════
// Profile
// ═══════════════════════════════════════════

/// The stored profile, or the default one.
pub fn load_profile<S>(store: &S) -> Result<UserProfile, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(read_json(store, USER_PROFILE_KEY)?.unwrap_or_default())
}

/// Saves the profile. Name and email are both required.
pub fn save_profile<S>(store: &S, profile: &UserProfile) -> Result<(), JournalError>
where
    S: KeyValueStore + ?Sized,
{
    if profile.name.trim().is_empty() {
        return Err(JournalError::MissingField("name"));
    }
    if profile.email.trim().is_empty() {
        return Err(JournalError::MissingField("email"));
    }
    write_json(store, USER_PROFILE_KEY, profile)?;
    tracing::info!("Profile updated");
    Ok(())
}

// ═══════════════════════════════════════════
// Export / erase
// ═══════════════════════════════════════════

pub fn export_data<S>(store: &S, now: DateTime<Utc>) -> Result<HealthExport, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(HealthExport {
        profile: load_profile(store)?,
        health_records: load_records(store)?,
        export_date: now,
    })
}

/// Pretty-printed export document.
pub fn export_json<S>(store: &S, now: DateTime<Utc>) -> Result<String, DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    let export = export_data(store, now)?;
    tracing::info!(records = export.health_records.len(), "Exported health data");
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Suggested download name, e.g. `health-records_2025-06-12.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("health-records_{}.json", date.format("%Y-%m-%d"))
}

/// Removes every record and the profile.
pub fn clear_all_data<S>(store: &S) -> Result<(), DatabaseError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(HEALTH_RECORDS_KEY)?;
    store.remove(USER_PROFILE_KEY)?;
    tracing::warn!("All journal data cleared");
    Ok(())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
