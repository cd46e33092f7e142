use foodgram_auth_types::token::issue_access_token;

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::error::FoodgramError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub auth_token: String,
    pub expires_at: u64,
}

pub struct LoginUseCase<R: UserRepository, H: PasswordHasher> {
    pub users: R,
    pub hasher: H,
    pub jwt_secret: String,
}

impl<R: UserRepository, H: PasswordHasher> LoginUseCase<R, H> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, FoodgramError> {
        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(FoodgramError::InvalidCredentials)?;

        if !self.hasher.verify(&input.password, &user.password_hash).await? {
            return Err(FoodgramError::InvalidCredentials);
        }
        // Blocked status is only reported for correct credentials.
        if user.is_blocked {
            tracing::info!(user_id = %user.id, "blocked user attempted login");
            return Err(FoodgramError::UserBlocked);
        }

        let (auth_token, expires_at) = issue_access_token(user.id, user.role(), &self.jwt_secret)
            .map_err(|e| FoodgramError::Internal(e.into()))?;
        Ok(LoginOutput {
            auth_token,
            expires_at,
        })
    }
}
