//! API service repositories

pub mod movie;
pub mod user;

pub use movie::MovieRepository;
pub use user::{UserRepository, hash_password, verify_password};
