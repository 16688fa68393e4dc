//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random string generation (slug suffixes)
//! - Password hashing (Argon2id) and the registration password policy

pub mod crypto;
pub mod password;
