//! Supported display locales.
//!
//! The locale is a per-session display setting, never a stored attribute.
//! Components that produce localized output take a [`Locale`] parameter;
//! components that consume persisted labels (the normalizer) recognize the
//! union of every locale's labels and ignore the active locale entirely.

use serde::{Deserialize, Serialize};

/// A supported display locale.
///
/// Spanish is the default, matching the deployment this register was built
/// for; English labels are accepted everywhere Spanish ones are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// All supported locales, used by tests that must cover every label set.
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];
}
