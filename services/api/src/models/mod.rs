//! API service models

pub mod movie;
pub mod user;

// Re-export for convenience
pub use movie::{Movie, NewMovie};
pub use user::{NewUser, User, UserInfoResponse, UserResponse};
