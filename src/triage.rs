//! Rule-based urgency triage for symptom reports.
//!
//! A coarse signal, not a diagnosis: a fixed phrase list is matched
//! against the reported symptoms to decide how quickly the user should
//! seek care.

use serde::{Deserialize, Serialize};

/// Symptom phrases that always escalate to high urgency.
const HIGH_URGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe headache",
    "high fever",
    "bleeding",
];

/// Symptom phrases that downgrade to low urgency.
const LOW_URGENCY_PHRASES: &[&str] = &["mild headache", "slight cough", "minor fatigue"];

/// Coarse triage level for a symptom report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// Classify a symptom list into an urgency level.
///
/// Symptoms are lowercased and space-joined into one search space, then
/// matched by substring. High beats low beats the Medium default; a
/// single matching phrase anywhere in the joined text is sufficient.
/// Matching is deliberately boundary-unaware: "chest pain" reported
/// across two entries still escalates.
pub fn classify(symptoms: &[String]) -> Urgency {
    let joined = symptoms
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if HIGH_URGENCY_PHRASES.iter().any(|p| joined.contains(p)) {
        Urgency::High
    } else if LOW_URGENCY_PHRASES.iter().any(|p| joined.contains(p)) {
        Urgency::Low
    } else {
        Urgency::Medium
    }
}
