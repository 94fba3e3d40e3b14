//! Entity models and DTOs.

pub mod department;
pub mod invitation_code;
pub mod risk;
pub mod session;
pub mod user;
