use super::signals::Signals;
use super::types::HealthSummary;

/// Record-history reading, phrased once per tone.
///
/// Only the tone matching the classified tier is shown to the user; the
/// others may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SituationAnalysis {
    pub critical: String,
    pub moderate: String,
    pub positive: String,
    pub summary: String,
}

pub fn analyze(signals: &Signals, history: &HealthSummary) -> SituationAnalysis {
    let mut analysis = SituationAnalysis::default();

    if history.recent_record_count > 0 {
        if history.has_recent_fever && signals.has_fever {
            analysis.critical = "Your records from the past 7 days already show a fever, and it \
                                 is still going on. That is a serious pattern."
                .into();
            analysis.summary = "A continuing fever has been recorded.".into();
        } else if history.has_recent_symptoms {
            analysis.moderate = "Your recent records show symptoms, and together with how you \
                                 feel now this needs careful watching."
                .into();
            analysis.summary = "Recent symptoms call for continued attention.".into();
        } else {
            analysis.positive = "Your recent records look good and you have no symptoms now, \
                                 which is ideal."
                .into();
            analysis.summary = "You have been keeping in good health.".into();
        }
    } else if signals.has_fever {
        analysis.critical =
            "With no health records to go on, it is hard to put this fever in context.".into();
        analysis.summary = "This is an important first record of your symptoms.".into();
    } else {
        analysis.positive = "You are starting your health journal from a good place.".into();
        analysis.summary = "A good start to looking after your health.".into();
    }

    let factors = environment_factors(signals);
    if !factors.is_empty() {
        let note = format!("(Your situation: {}.)", factors.join(", "));
        append(&mut analysis.critical, &note);
        append(&mut analysis.moderate, &note);
        append(&mut analysis.summary, &note);
    }

    analysis
}

/// Living-situation constraints worth naming back to the user.
pub fn environment_factors(signals: &Signals) -> Vec<&'static str> {
    let mut factors = Vec::new();
    if !signals.has_support {
        factors.push("coping alone");
    }
    if !signals.can_walk_to_hospital {
        factors.push("limited mobility");
    }
    if signals.under_stocked() {
        factors.push("few home remedies");
    }
    if signals.is_on_medication {
        factors.push("currently on medication");
    }
    factors
}

fn append(text: &mut String, note: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(note);
}
