//! User aggregate
//!
//! Users only anchor ownership of API keys; they are created lazily and
//! never updated here.

pub mod model;

mod dto_create;

pub use dto_create::NewUser;
pub use model::{User, UserResolution, UserRole};
