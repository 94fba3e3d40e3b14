//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod department;
pub mod invitation_code;
pub mod risk;
