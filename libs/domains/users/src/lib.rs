//! Users Domain
//!
//! Registration and login. Passwords are hashed with Argon2 before they
//! reach the repository; successful logins are exchanged for JWT bearer
//! tokens issued by `axum_helpers`.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    AccessTokenResponse, LoginRequest, NewUser, RegisterRequest, RegisterResponse, User,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
