//! Entity Module

pub mod profile;
pub mod user;

pub use profile::Profile;
pub use user::{NewUser, User};
