//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod login;
pub mod profile;
pub mod register;
pub mod token;
pub mod update_user;

#[cfg(test)]
pub(crate) mod fakes;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use profile::ProfileUseCase;
pub use register::{AuthenticatedUser, RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenService};
pub use update_user::{UpdateUserUseCase, UserChanges};
