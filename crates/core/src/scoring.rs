//! Probability/impact ordinal scales and the risk scorer.
//!
//! A risk is scored as `probability rank * impact rank` (both 1-5) and the
//! product is bucketed into one of five qualitative bands. The scorer is the
//! single source of truth for the `inherent_level` / `residual_level` columns:
//! handlers recompute the level on every write so a stored level can never go
//! stale against its probability+impact pair.

use serde::{Deserialize, Serialize};

use crate::level::RiskLevel;
use crate::locale::Locale;

/// Ordinal probability scale, rank 1 (remote) to rank 5 (frequent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityLevel {
    Remote,
    Unlikely,
    Occasional,
    Likely,
    Frequent,
}

/// Ordinal impact scale, rank 1 (insignificant) to rank 5 (catastrophic).
///
/// The rank order (Critical below Major) is the register's historical scale,
/// preserved so persisted rows keep scoring identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    Insignificant,
    Minor,
    Critical,
    Major,
    Catastrophic,
}

impl ProbabilityLevel {
    pub const ALL: [ProbabilityLevel; 5] = [
        ProbabilityLevel::Remote,
        ProbabilityLevel::Unlikely,
        ProbabilityLevel::Occasional,
        ProbabilityLevel::Likely,
        ProbabilityLevel::Frequent,
    ];

    /// Ordinal rank, 1-5.
    pub fn rank(self) -> u8 {
        match self {
            ProbabilityLevel::Remote => 1,
            ProbabilityLevel::Unlikely => 2,
            ProbabilityLevel::Occasional => 3,
            ProbabilityLevel::Likely => 4,
            ProbabilityLevel::Frequent => 5,
        }
    }

    /// Display label in the given locale.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ProbabilityLevel::Remote, Locale::Es) => "Remoto (0-20%)",
            (ProbabilityLevel::Unlikely, Locale::Es) => "Improbable (21-40%)",
            (ProbabilityLevel::Occasional, Locale::Es) => "Ocasional (41-60%)",
            (ProbabilityLevel::Likely, Locale::Es) => "Probable (61-80%)",
            (ProbabilityLevel::Frequent, Locale::Es) => "Frecuente (81-100%)",
            (ProbabilityLevel::Remote, Locale::En) => "Remote (0-20%)",
            (ProbabilityLevel::Unlikely, Locale::En) => "Unlikely (21-40%)",
            (ProbabilityLevel::Occasional, Locale::En) => "Occasional (41-60%)",
            (ProbabilityLevel::Likely, Locale::En) => "Likely (61-80%)",
            (ProbabilityLevel::Frequent, Locale::En) => "Frequent (81-100%)",
        }
    }

    /// Parse a display label from any supported locale.
    ///
    /// Returns `None` for empty or unrecognized input (rank 0 in the scoring
    /// model).
    pub fn parse(label: &str) -> Option<Self> {
        for level in Self::ALL {
            for locale in Locale::ALL {
                if level.label(locale) == label {
                    return Some(level);
                }
            }
        }
        None
    }
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 5] = [
        ImpactLevel::Insignificant,
        ImpactLevel::Minor,
        ImpactLevel::Critical,
        ImpactLevel::Major,
        ImpactLevel::Catastrophic,
    ];

    /// Ordinal rank, 1-5.
    pub fn rank(self) -> u8 {
        match self {
            ImpactLevel::Insignificant => 1,
            ImpactLevel::Minor => 2,
            ImpactLevel::Critical => 3,
            ImpactLevel::Major => 4,
            ImpactLevel::Catastrophic => 5,
        }
    }

    /// Display label in the given locale.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ImpactLevel::Insignificant, Locale::Es) => "Insignificante",
            (ImpactLevel::Minor, Locale::Es) => "Menor",
            (ImpactLevel::Critical, Locale::Es) => "Crítico",
            (ImpactLevel::Major, Locale::Es) => "Mayor",
            (ImpactLevel::Catastrophic, Locale::Es) => "Catastrófico",
            (ImpactLevel::Insignificant, Locale::En) => "Insignificant",
            (ImpactLevel::Minor, Locale::En) => "Minor",
            (ImpactLevel::Critical, Locale::En) => "Critical",
            (ImpactLevel::Major, Locale::En) => "Major",
            (ImpactLevel::Catastrophic, Locale::En) => "Catastrophic",
        }
    }

    /// Parse a display label from any supported locale.
    pub fn parse(label: &str) -> Option<Self> {
        for level in Self::ALL {
            for locale in Locale::ALL {
                if level.label(locale) == label {
                    return Some(level);
                }
            }
        }
        None
    }
}

/// Classify a probability/impact pair into a qualitative risk band.
///
/// `score = rank(p) * rank(i)`, range 1-25. Thresholds are evaluated in
/// ascending order, first match wins.
pub fn classify(probability: ProbabilityLevel, impact: ImpactLevel) -> RiskLevel {
    let score = u16::from(probability.rank()) * u16::from(impact.rank());
    match score {
        ..=4 => RiskLevel::Tolerable,
        5..=8 => RiskLevel::Low,
        9..=12 => RiskLevel::Medium,
        13..=16 => RiskLevel::High,
        _ => RiskLevel::Intolerable,
    }
}

/// Compute the localized risk-level label for a pair of probability/impact
/// display labels.
///
/// Inputs are recognized in any supported locale; output is produced in
/// `locale`. Empty or unrecognized input yields the empty string, meaning
/// "level not yet determined" -- it is not an error, and a zero score is
/// never classified as Tolerable because the short-circuit runs first.
pub fn score_label(probability: &str, impact: &str, locale: Locale) -> String {
    let (Some(p), Some(i)) = (ProbabilityLevel::parse(probability), ImpactLevel::parse(impact))
    else {
        return String::new();
    };
    classify(p, i).label(locale).to_string()
}
