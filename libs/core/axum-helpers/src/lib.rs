//! # Axum Helpers
//!
//! Shared utilities for the HTTP surface of the workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT bearer authentication (token issuance,
//!   verification, and route-guarding middleware)
//! - **[`errors`]**: standardized error responses shared by all domains
//! - **[`extractors`]**: custom extractors (validated JSON)
//! - **[`server`]**: listener setup with graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{JwtAuth, JwtClaims, JwtConfig, TOKEN_TTL, jwt_auth_middleware};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export server helpers
pub use server::{create_router, serve, shutdown_signal};
