use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{normalize_email, AuthSession, LoginRequest, SignupRequest, User};
use crate::repository::UserRepository;

/// Signup, login and token issuing
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    auth: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, auth: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            auth,
        }
    }

    /// Register a user and return a token for them
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<AuthSession> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            email,
            password_hash,
        );

        let created = self.repository.create(user).await?;
        self.session(created)
    }

    /// Check credentials and return a fresh token
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthSession> {
        input.validate()?;

        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Rejected login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        self.session(user)
    }

    fn session(&self, user: User) -> UserResult<AuthSession> {
        let token = self.auth.issue_token(user.id, &user.email).map_err(|e| {
            tracing::error!("Failed to issue token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

        Ok(AuthSession {
            user: user.into(),
            token,
        })
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            auth: self.auth.clone(),
        }
    }
}

// Password helpers

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::JwtConfig;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("secret2", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_signup_issues_verifiable_token() {
        let service = UserService::new(InMemoryUserRepository::new(), auth());

        let session = service.signup(signup_request("Jane@Example.com")).await.unwrap();

        assert_eq!(session.user.email, "jane@example.com");
        let claims = auth().verify_token(&session.token).unwrap();
        assert_eq!(claims.user_uuid().unwrap(), session.user.id);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let service = UserService::new(InMemoryUserRepository::new(), auth());
        service.signup(signup_request("jane@example.com")).await.unwrap();

        let result = service.signup(signup_request("JANE@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_short_password() {
        let service = UserService::new(InMemoryUserRepository::new(), auth());
        let mut request = signup_request("jane@example.com");
        request.password = "123".to_string();

        let result = service.signup(request).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let service = UserService::new(InMemoryUserRepository::new(), auth());
        let signed_up = service.signup(signup_request("jane@example.com")).await.unwrap();

        let session = service
            .login(login_request("jane@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(session.user.id, signed_up.user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let service = UserService::new(InMemoryUserRepository::new(), auth());
        service.signup(signup_request("jane@example.com")).await.unwrap();

        let result = service
            .login(login_request("jane@example.com", "not-it"))
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(mock_repo, auth());
        let result = service
            .login(login_request("ghost@example.com", "secret1"))
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
