//! Domain core for the risk register.
//!
//! Everything in this crate is pure and synchronous: the locale label
//! tables, the probability/impact ordinal scales, the risk scorer, and the
//! level normalizer. No I/O, no global state -- callers pass the locale in
//! explicitly where output is localized.

pub mod error;
pub mod level;
pub mod locale;
pub mod scoring;
pub mod types;

pub use error::CoreError;
pub use level::RiskLevel;
pub use locale::Locale;
pub use scoring::{ImpactLevel, ProbabilityLevel};
