//! Keyword matcher that points free-text symptoms at a specialty.

use crate::models::SymptomCheckResponse;

pub const DEFAULT_SPECIALTY: &str = "General Physician";
pub const DEFAULT_RECOMMENDATION: &str = "a General Physician for a consultation";

/// Specialties and their trigger phrases. Order matters: on a tie the
/// earlier specialty wins.
pub const SPECIALTY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Dermatologist", &["rash", "skin", "itch", "acne", "mole"]),
    ("Cardiologist", &["chest pain", "heart", "pressure", "palpitations", "dizzy"]),
    ("Neurologist", &["headache", "migraine", "seizure", "numbness", "memory loss"]),
    ("Orthopedic", &["joint pain", "bone", "fracture", "sprain", "knee", "back pain"]),
    ("General Physician", &["fever", "cough", "cold", "sore throat", "fatigue"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomMatch {
    pub specialty: &'static str,
    pub matches: usize,
}

impl SymptomMatch {
    pub fn recommendation(&self) -> String {
        if self.matches == 0 {
            DEFAULT_RECOMMENDATION.to_string()
        } else {
            format!("a {}", self.specialty)
        }
    }

    pub fn into_response(self) -> SymptomCheckResponse {
        SymptomCheckResponse {
            recommendation: self.recommendation(),
            specialty: self.specialty.to_string(),
            matches: self.matches,
        }
    }
}

/// Counts keyword hits per specialty (substring match on the lower-cased
/// text) and keeps the first specialty with the strictly highest count.
pub fn check_symptoms(symptoms: &str) -> SymptomMatch {
    let text = symptoms.to_lowercase();

    SPECIALTY_KEYWORDS.iter().fold(
        SymptomMatch { specialty: DEFAULT_SPECIALTY, matches: 0 },
        |best, &(specialty, keywords)| {
            let matches = keywords.iter().filter(|keyword| text.contains(**keyword)).count();
            if matches > best.matches {
                SymptomMatch { specialty, matches }
            } else {
                best
            }
        },
    )
}
