use super::rules::Variant;
use super::signals::Signals;
use super::situation::SituationAnalysis;
use super::types::Recommendation;
use crate::models::UrgencyLevel;

/// Builds the recommendation card for `variant`.
///
/// The content opens with the situation reading whose tone matches the
/// variant's tier. Some actions depend on mobility or support.
pub fn recommendation(
    variant: Variant,
    signals: &Signals,
    situation: &SituationAnalysis,
) -> Recommendation {
    let walk = signals.can_walk_to_hospital;
    let support = signals.has_support;

    let (title, body, actions): (&str, String, Vec<&str>) = match variant {
        Variant::CriticalIsolation => (
            "Urgent response needed",
            "You are on medication, getting around is hard and there is no one to rely on, \
             which is very worrying. Do not push through this alone; consider the emergency \
             steps below."
                .into(),
            vec![
                "Call an emergency medical advice line (such as #7119) right away",
                "Find a clinic that makes home visits and contact it",
                "Do not hesitate to call an ambulance if needed",
                "Consider letting a neighbour or building manager know in case of emergency",
            ],
        ),
        Variant::FeverOnMedication => (
            "Fever continuing while on medication: get medical care now",
            "Your current medication may interact with this illness or be affected by it. \
             Bring your medication details and get seen urgently."
                .into(),
            vec![
                "Bring all your current medicines to an internal medicine visit",
                "Have your medication notebook or medicine list ready",
                if walk {
                    "Even if you can walk, ask someone to come with you"
                } else {
                    "Consider an ambulance or a home visit"
                },
                "Drink small amounts of fluid often",
            ],
        ),
        Variant::PersistentFever => (
            "Persistent fever: urgent visit recommended",
            if walk {
                "You said you can walk, but you need prompt medical care.".to_string()
            } else {
                "Getting around is difficult for you, and you need prompt medical care.".to_string()
            },
            if walk {
                vec![
                    "Go to the nearest internal medicine clinic or hospital now",
                    "Phone ahead with your symptoms and when you expect to arrive",
                    "Have enough fluids and a light snack before you head out",
                    "Check which emergency number to call if things get worse",
                ]
            } else {
                vec![
                    "Contact a clinic that makes home visits",
                    "Keep going to an emergency department open as an option",
                    if support {
                        "Ask someone you trust to stay with you"
                    } else {
                        "Ask neighbours for help in case of emergency"
                    },
                    "Phone for advice on using fever reducers properly",
                ]
            },
        ),
        Variant::IsolatedUnderResourced => (
            "Managing symptoms on your own",
            "Getting around is hard, you have few remedies at home and no one to rely on, \
             which is worrying. Build up support step by step while you manage your symptoms."
                .into(),
            vec![
                "Use a pharmacy delivery service or order online",
                "Phone a local health advice service such as your public health centre",
                "Keep a symptom diary that records changes in detail",
                "In an emergency, call an ambulance without hesitation",
            ],
        ),
        Variant::WellResourcedCare => (
            "Managing symptoms with good support",
            "Fortunately you have plenty of remedies and someone to rely on. Make the most of \
             that to manage your symptoms well."
                .into(),
            vec![
                "Use your home remedies as your symptoms call for",
                "Ask the person you rely on to keep an eye on how you are doing",
                if walk {
                    "Agree in advance when you would go to a clinic if things get worse"
                } else {
                    "Check the contact details of a doctor who makes home visits"
                },
                "Ask for help preparing nourishing meals",
            ],
        ),
        Variant::NewSymptomsOnMedication => (
            "New symptoms while on medication: take care",
            "Your current medication may be affecting your symptoms. Avoid adding medicines on \
             your own judgement and talk to a professional first."
                .into(),
            vec![
                "Ask a pharmacist whether your medicines and symptoms could be related",
                "Tell your doctor about your symptoms and medication in detail",
                "Wait for professional advice before adding any new medicine",
                "Keep detailed notes of your symptoms and when you take each dose",
            ],
        ),
        Variant::GeneralSymptomCare => (
            "Symptom care and medical advice",
            "At your current level of symptoms, sensible first steps and a medical consultation \
             work well."
                .into(),
            if walk {
                vec![
                    "Book an appointment at an internal medicine clinic",
                    "Bring your detailed symptom records",
                    "Ask a pharmacist before using over-the-counter medicine",
                ]
            } else {
                vec![
                    "Use a telephone medical advice service",
                    if support {
                        "Ask someone who can help to pick up medicine from a pharmacy"
                    } else {
                        "Use a delivery service"
                    },
                    "Watch and record changes in your symptoms closely",
                ]
            },
        ),
        Variant::IdealEnvironment => (
            "An ideal setting for staying healthy",
            "You have an excellent setup. Make the most of it and take an active part in your \
             health."
                .into(),
            vec![
                "Keep up regular health checks and records",
                "Keep your home remedies organised and up to date",
                "Keep sharing health information and asking for advice",
                "Keep track of vaccinations and regular check-ups",
            ],
        ),
        Variant::LivingAlone => (
            "Looking after your health on your own",
            "You are managing your health by yourself. Build a support network for emergencies \
             while strengthening your everyday habits."
                .into(),
            vec![
                "Make a list of nearby clinics and their contact details",
                "Put together a basic set of home remedies",
                "Arrange more than one emergency contact",
                "Use a health app or journal to keep records",
            ],
        ),
        Variant::GeneralMaintenance => (
            "Keeping healthy day to day",
            "Keep up your current health while building even better habits.".into(),
            vec![
                "Keep a regular daily rhythm",
                "Eat a balanced diet and exercise moderately",
                "Manage stress and get enough sleep",
                "Keep recording your health regularly",
            ],
        ),
    };

    let opening = match variant.urgency() {
        UrgencyLevel::High => &situation.critical,
        UrgencyLevel::Medium => &situation.moderate,
        UrgencyLevel::Low => &situation.positive,
    };
    let content = if opening.is_empty() {
        body
    } else {
        format!("{opening} {body}")
    };

    Recommendation {
        title: title.to_string(),
        content,
        actions: actions.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(walk: bool, support: bool) -> Signals {
        Signals {
            has_fever: true,
            is_on_medication: false,
            home_remedies_level: 3,
            can_walk_to_hospital: walk,
            has_support: support,
        }
    }

    fn situation() -> SituationAnalysis {
        SituationAnalysis {
            critical: "CRITICAL.".into(),
            moderate: "MODERATE.".into(),
            positive: "POSITIVE.".into(),
            summary: "SUMMARY.".into(),
        }
    }

    #[test]
    fn every_variant_has_title_and_actions() {
        for variant in Variant::ALL {
            for (walk, support) in [(true, true), (true, false), (false, true), (false, false)] {
                let r = recommendation(variant, &signals(walk, support), &situation());
                assert!(!r.title.is_empty(), "{variant:?}");
                assert!(r.actions.len() >= 3, "{variant:?}");
                assert!(r.actions.iter().all(|a| !a.is_empty()));
            }
        }
    }

    #[test]
    fn content_opens_with_tier_tone() {
        let s = signals(true, true);
        let high = recommendation(Variant::PersistentFever, &s, &situation());
        assert!(high.content.starts_with("CRITICAL. "));
        let medium = recommendation(Variant::GeneralSymptomCare, &s, &situation());
        assert!(medium.content.starts_with("MODERATE. "));
        let low = recommendation(Variant::GeneralMaintenance, &s, &situation());
        assert!(low.content.starts_with("POSITIVE. "));
    }

    #[test]
    fn empty_opening_leaves_body_alone() {
        let r = recommendation(
            Variant::GeneralMaintenance,
            &signals(true, true),
            &SituationAnalysis::default(),
        );
        assert_eq!(r.content, "Keep up your current health while building even better habits.");
    }

    #[test]
    fn persistent_fever_actions_follow_mobility_and_support() {
        let walking = recommendation(Variant::PersistentFever, &signals(true, false), &situation());
        assert!(walking.actions[0].contains("nearest internal medicine clinic"));

        let alone = recommendation(Variant::PersistentFever, &signals(false, false), &situation());
        assert!(alone.actions[0].contains("home visits"));
        assert!(alone.actions[2].contains("neighbours"));

        let supported = recommendation(Variant::PersistentFever, &signals(false, true), &situation());
        assert!(supported.actions[2].contains("someone you trust"));
    }

    #[test]
    fn general_care_has_three_actions() {
        let r = recommendation(Variant::GeneralSymptomCare, &signals(false, true), &situation());
        assert_eq!(r.actions.len(), 3);
        assert!(r.actions[1].contains("pharmacy"));
    }
}
