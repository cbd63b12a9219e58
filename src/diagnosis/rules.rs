use serde::{Deserialize, Serialize};

use crate::models::UrgencyLevel;

use super::signals::Signals;
use super::types::HealthSummary;

/// Every recommendation body the engine can produce.
///
/// Variants are mutually exclusive; [`classify`] picks exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    // High: fever now and in the last week
    /// On medication, cannot walk, no one to rely on.
    CriticalIsolation,
    FeverOnMedication,
    PersistentFever,

    // Medium: fever now, or symptoms in the last week
    /// Cannot walk, no support, few remedies.
    IsolatedUnderResourced,
    /// Well stocked and supported.
    WellResourcedCare,
    NewSymptomsOnMedication,
    GeneralSymptomCare,

    // Low: nothing notable
    IdealEnvironment,
    LivingAlone,
    GeneralMaintenance,
}

impl Variant {
    pub const ALL: [Variant; 10] = [
        Variant::CriticalIsolation,
        Variant::FeverOnMedication,
        Variant::PersistentFever,
        Variant::IsolatedUnderResourced,
        Variant::WellResourcedCare,
        Variant::NewSymptomsOnMedication,
        Variant::GeneralSymptomCare,
        Variant::IdealEnvironment,
        Variant::LivingAlone,
        Variant::GeneralMaintenance,
    ];

    pub fn urgency(self) -> UrgencyLevel {
        match self {
            Variant::CriticalIsolation | Variant::FeverOnMedication | Variant::PersistentFever => {
                UrgencyLevel::High
            }
            Variant::IsolatedUnderResourced
            | Variant::WellResourcedCare
            | Variant::NewSymptomsOnMedication
            | Variant::GeneralSymptomCare => UrgencyLevel::Medium,
            Variant::IdealEnvironment | Variant::LivingAlone | Variant::GeneralMaintenance => {
                UrgencyLevel::Low
            }
        }
    }
}

/// The urgency tier, before choosing a variant within it.
pub fn tier(signals: &Signals, history: &HealthSummary) -> UrgencyLevel {
    if signals.has_fever && history.has_recent_fever {
        UrgencyLevel::High
    } else if signals.has_fever || history.has_recent_symptoms {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    }
}

/// Picks the recommendation variant. Within a tier, the first matching
/// row wins.
pub fn classify(signals: &Signals, history: &HealthSummary) -> Variant {
    let s = signals;
    match tier(s, history) {
        UrgencyLevel::High => {
            if s.is_on_medication && !s.can_walk_to_hospital && !s.has_support {
                Variant::CriticalIsolation
            } else if s.is_on_medication {
                Variant::FeverOnMedication
            } else {
                Variant::PersistentFever
            }
        }
        UrgencyLevel::Medium => {
            if !s.can_walk_to_hospital && !s.has_support && s.under_stocked() {
                Variant::IsolatedUnderResourced
            } else if s.well_stocked() && s.has_support {
                Variant::WellResourcedCare
            } else if s.is_on_medication {
                Variant::NewSymptomsOnMedication
            } else {
                Variant::GeneralSymptomCare
            }
        }
        UrgencyLevel::Low => {
            if s.well_stocked() && s.has_support {
                Variant::IdealEnvironment
            } else if !s.has_support && s.under_stocked() {
                Variant::LivingAlone
            } else {
                Variant::GeneralMaintenance
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AverageTemperature;

    fn signals(fever: bool, meds: bool, level: u8, walk: bool, support: bool) -> Signals {
        Signals {
            has_fever: fever,
            is_on_medication: meds,
            home_remedies_level: level,
            can_walk_to_hospital: walk,
            has_support: support,
        }
    }

    fn history(fever: bool, symptoms: bool) -> HealthSummary {
        HealthSummary {
            recent_record_count: usize::from(fever || symptoms),
            average_temperature: AverageTemperature::NoData,
            has_recent_fever: fever,
            has_recent_symptoms: symptoms,
        }
    }

    #[test]
    fn decision_table() {
        // (fever, meds, level, walk, support), (recent fever, recent symptoms), expected
        let rows = [
            ((true, true, 1, false, false), (true, false), Variant::CriticalIsolation),
            ((true, true, 5, false, true), (true, false), Variant::FeverOnMedication),
            ((true, true, 1, true, false), (true, true), Variant::FeverOnMedication),
            ((true, false, 1, false, false), (true, false), Variant::PersistentFever),
            ((true, false, 5, true, true), (true, true), Variant::PersistentFever),
            ((true, false, 2, false, false), (false, false), Variant::IsolatedUnderResourced),
            ((false, true, 1, false, false), (false, true), Variant::IsolatedUnderResourced),
            ((true, true, 4, false, true), (false, false), Variant::WellResourcedCare),
            ((false, false, 5, true, true), (false, true), Variant::WellResourcedCare),
            ((true, true, 3, true, false), (false, false), Variant::NewSymptomsOnMedication),
            ((false, true, 3, false, false), (true, true), Variant::NewSymptomsOnMedication),
            ((true, false, 3, true, true), (false, false), Variant::GeneralSymptomCare),
            ((false, false, 1, true, false), (false, true), Variant::GeneralSymptomCare),
            ((false, false, 4, true, true), (false, false), Variant::IdealEnvironment),
            ((false, true, 5, false, true), (true, false), Variant::IdealEnvironment),
            ((false, false, 2, true, false), (false, false), Variant::LivingAlone),
            ((false, true, 1, false, false), (false, false), Variant::LivingAlone),
            ((false, false, 3, true, false), (false, false), Variant::GeneralMaintenance),
            ((false, false, 1, true, true), (false, false), Variant::GeneralMaintenance),
        ];

        for ((fever, meds, level, walk, support), (rf, rs), expected) in rows {
            let s = signals(fever, meds, level, walk, support);
            let h = history(rf, rs);
            assert_eq!(classify(&s, &h), expected, "signals {s:?}, history ({rf}, {rs})");
        }
    }

    #[test]
    fn recent_fever_alone_is_not_high() {
        let s = signals(false, false, 3, true, true);
        assert_eq!(tier(&s, &history(true, false)), UrgencyLevel::Low);
    }

    #[test]
    fn every_variant_reachable_and_tier_consistent() {
        let mut seen = std::collections::HashSet::new();
        for bits in 0u32..(1 << 6) {
            for level in 1..=5 {
                let s = signals(bits & 1 != 0, bits & 2 != 0, level, bits & 4 != 0, bits & 8 != 0);
                let h = history(bits & 16 != 0, bits & 32 != 0);
                let v = classify(&s, &h);
                assert_eq!(v.urgency(), tier(&s, &h));
                seen.insert(v);
            }
        }
        assert_eq!(seen.len(), Variant::ALL.len());
    }
}
