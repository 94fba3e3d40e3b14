//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod department_repo;
pub mod invitation_code_repo;
pub mod risk_repo;
pub mod session_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use invitation_code_repo::InvitationCodeRepo;
pub use risk_repo::RiskRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
