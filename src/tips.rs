//! Static daily health tips.
//!
//! Fixed reference content served as-is. The `points` values are
//! declarative metadata for the frontend; no tip is currently claimable
//! against the interaction ledger.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthTip {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub points: i64,
}

const DAILY_TIPS: &[HealthTip] = &[
    HealthTip {
        id: 1,
        title: "Stay Hydrated Throughout the Day",
        description: "Drink at least 8-10 glasses of water daily to maintain proper hydration. \
                      Water helps regulate body temperature, lubricates joints, and aids in digestion.",
        category: "hydration",
        points: 5,
    },
    HealthTip {
        id: 2,
        title: "The Power of 30-Minute Daily Walking",
        description: "Regular walking for just 30 minutes can significantly improve cardiovascular \
                      health, strengthen bones, and boost mental well-being.",
        category: "exercise",
        points: 10,
    },
    HealthTip {
        id: 3,
        title: "Balanced Nutrition: The 5-Color Rule",
        description: "Include fruits and vegetables of 5 different colors in your daily diet to \
                      ensure you get a wide variety of nutrients and antioxidants.",
        category: "nutrition",
        points: 15,
    },
];

pub fn daily_tips() -> &'static [HealthTip] {
    DAILY_TIPS
}
