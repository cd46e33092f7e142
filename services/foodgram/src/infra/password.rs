use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::repository::PasswordHasher;
use crate::error::FoodgramError;

/// Argon2id hasher producing PHC strings.
///
/// Parameters: 64 MiB memory, 3 iterations, parallelism 4. Hashing runs on
/// tokio's blocking pool.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    fn argon2() -> Result<Argon2<'static>, FoodgramError> {
        let params = Params::new(65536, 3, 4, None)
            .map_err(|e| FoodgramError::Internal(anyhow::anyhow!("argon2 params: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn hash_blocking(password: &str) -> Result<String, FoodgramError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| FoodgramError::Internal(anyhow::anyhow!("hash password: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify_blocking(password: &str, password_hash: &str) -> Result<bool, FoodgramError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| FoodgramError::Internal(anyhow::anyhow!("parse password hash: {e}")))?;
        // Parameters are read from the PHC string.
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, FoodgramError>
where
    F: FnOnce() -> Result<T, FoodgramError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| FoodgramError::Internal(anyhow::anyhow!("password hashing task: {e}")))?
}

impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, FoodgramError> {
        let password = password.to_owned();
        run_blocking(move || Self::hash_blocking(&password)).await
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, FoodgramError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        run_blocking(move || Self::verify_blocking(&password, &password_hash)).await
    }
}
