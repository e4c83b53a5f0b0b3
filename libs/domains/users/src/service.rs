use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use axum_helpers::JwtAuth;

use crate::error::{UserError, UserResult};
use crate::models::{AccessTokenResponse, LoginRequest, NewUser, RegisterRequest, RegisterResponse};
use crate::repository::UserRepository;

/// Service layer for registration and login
///
/// Owns password hashing and token issuance; the repository only ever
/// sees finished Argon2 PHC strings.
#[derive(Clone)]
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new account
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<RegisterResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = self
            .repository
            .insert(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered user");
        Ok(RegisterResponse {
            message: format!("Welcome, {}! Thank you for signing up", user.name),
        })
    }

    /// Exchange credentials for a bearer token
    ///
    /// Unknown email and failed verification produce the same error, so a
    /// caller cannot probe which emails are registered.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AccessTokenResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let access_token = self
            .jwt
            .create_access_token(user.id, &user.email)
            .map_err(|e| UserError::Internal(format!("Token creation failed: {}", e)))?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(AccessTokenResponse { access_token })
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum_helpers::JwtConfig;

    fn build_service() -> AuthService<InMemoryUserRepository> {
        let jwt = JwtAuth::new(&JwtConfig::new("service-test-secret-that-is-32-chars!"));
        AuthService::new(InMemoryUserRepository::new(), jwt)
    }

    fn register_input(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn test_hashing_is_salted_per_call() {
        let service = build_service();

        let first = service.hash_password("hunter22").unwrap();
        let second = service.hash_password("hunter22").unwrap();

        assert_ne!(first, "hunter22");
        assert_ne!(first, second);
        assert!(service.verify_password("hunter22", &first).unwrap());
        assert!(service.verify_password("hunter22", &second).unwrap());
        assert!(!service.verify_password("wrong", &first).unwrap());
    }

    #[tokio::test]
    async fn test_register_returns_greeting() {
        let service = build_service();

        let response = service
            .register(register_input("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(response.message, "Welcome, Ada! Thank you for signing up");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = build_service();

        service
            .register(register_input("ada@example.com"))
            .await
            .unwrap();
        let result = service.register(register_input("ada@example.com")).await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let jwt = JwtAuth::new(&JwtConfig::new("service-test-secret-that-is-32-chars!"));
        let service = AuthService::new(InMemoryUserRepository::new(), jwt.clone());

        service
            .register(register_input("ada@example.com"))
            .await
            .unwrap();

        let response = service
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        let claims = jwt.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthorized() {
        let service = build_service();

        let result = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let service = build_service();

        service
            .register(register_input("ada@example.com"))
            .await
            .unwrap();

        let result = service
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "not-the-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
