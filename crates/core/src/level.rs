//! Canonical risk levels and the label normalizer.
//!
//! Persisted level labels may be in any locale the app has ever rendered,
//! because locale is a display setting while the label is stored verbatim.
//! [`normalize`] collapses that label space into the canonical six-value
//! domain so aggregations count "Alto" and "High" as the same thing. The
//! alias table is a locale union, not locale-selected: labels written under
//! one locale normalize identically whatever locale is active when read.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// The canonical, locale-independent risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Intolerable,
    High,
    Medium,
    Low,
    Tolerable,
    Unclassified,
}

impl RiskLevel {
    /// All canonical levels, ordered most to least severe.
    pub const ALL: [RiskLevel; 6] = [
        RiskLevel::Intolerable,
        RiskLevel::High,
        RiskLevel::Medium,
        RiskLevel::Low,
        RiskLevel::Tolerable,
        RiskLevel::Unclassified,
    ];

    /// Display label in the given locale.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (RiskLevel::Intolerable, Locale::Es) => "Intolerable",
            (RiskLevel::High, Locale::Es) => "Alto",
            (RiskLevel::Medium, Locale::Es) => "Medio",
            (RiskLevel::Low, Locale::Es) => "Bajo",
            (RiskLevel::Tolerable, Locale::Es) => "Tolerable",
            (RiskLevel::Unclassified, Locale::Es) => "Sin clasificar",
            (RiskLevel::Intolerable, Locale::En) => "Intolerable",
            (RiskLevel::High, Locale::En) => "High",
            (RiskLevel::Medium, Locale::En) => "Medium",
            (RiskLevel::Low, Locale::En) => "Low",
            (RiskLevel::Tolerable, Locale::En) => "Tolerable",
            (RiskLevel::Unclassified, Locale::En) => "Unclassified",
        }
    }
}

/// Map a risk-level label from any supported locale to its canonical level.
///
/// Recognizes the exact-case and lower-cased form of every locale's label.
/// Unknown or empty input is [`RiskLevel::Unclassified`] -- a first-class
/// outcome, never an error.
pub fn normalize(label: &str) -> RiskLevel {
    match label {
        "Intolerable" | "intolerable" => RiskLevel::Intolerable,
        "Alto" | "alto" | "High" | "high" => RiskLevel::High,
        "Medio" | "medio" | "Medium" | "medium" => RiskLevel::Medium,
        "Bajo" | "bajo" | "Low" | "low" => RiskLevel::Low,
        "Tolerable" | "tolerable" => RiskLevel::Tolerable,
        "Sin clasificar" | "sin clasificar" | "Unclassified" | "unclassified" => {
            RiskLevel::Unclassified
        }
        _ => RiskLevel::Unclassified,
    }
}

/// True iff the label normalizes to High or Intolerable.
pub fn is_high_risk(label: &str) -> bool {
    matches!(normalize(label), RiskLevel::High | RiskLevel::Intolerable)
}

/// True iff the label normalizes to Low or Tolerable.
pub fn is_low_risk(label: &str) -> bool {
    matches!(normalize(label), RiskLevel::Low | RiskLevel::Tolerable)
}

/// Semantic color tokens for rendering a level badge.
///
/// Pure presentation configuration; the tokens are opaque to this crate and
/// resolved by whatever theme the consumer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelStyle {
    pub background: &'static str,
    pub foreground: &'static str,
    pub border: &'static str,
}

/// Style lookup, total over the canonical domain.
///
/// Unclassified gets the neutral style.
pub fn style(level: RiskLevel) -> LevelStyle {
    match level {
        RiskLevel::Intolerable => LevelStyle {
            background: "red-300",
            foreground: "red-900",
            border: "red-500",
        },
        RiskLevel::High => LevelStyle {
            background: "orange-300",
            foreground: "orange-900",
            border: "orange-500",
        },
        RiskLevel::Medium => LevelStyle {
            background: "amber-300",
            foreground: "amber-900",
            border: "amber-500",
        },
        RiskLevel::Low => LevelStyle {
            background: "blue-300",
            foreground: "blue-900",
            border: "blue-500",
        },
        RiskLevel::Tolerable => LevelStyle {
            background: "green-300",
            foreground: "green-900",
            border: "green-500",
        },
        RiskLevel::Unclassified => LevelStyle {
            background: "neutral-200",
            foreground: "neutral-700",
            border: "neutral-400",
        },
    }
}

/// The register's single severity policy for a risk with both an inherent
/// and a residual assessment: prefer the residual level, fall back to the
/// inherent level, else Unclassified.
///
/// Every aggregation (dashboard summary, department stats, level filters)
/// goes through this function so no view can drift to a different rule.
pub fn effective_level(residual_label: &str, inherent_label: &str) -> RiskLevel {
    if !residual_label.is_empty() {
        normalize(residual_label)
    } else if !inherent_label.is_empty() {
        normalize(inherent_label)
    } else {
        RiskLevel::Unclassified
    }
}
