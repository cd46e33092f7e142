use foodgram_auth_types::identity::Identity;
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::user::{PASSWORD_MIN_LEN, USERNAME_MAX_LEN, validate_email, validate_username};

use crate::domain::repository::{PasswordHasher, UserRepository};
use crate::domain::types::{NewUser, User, UserProfile};
use crate::error::FoodgramError;

fn validate_person_name(name: &str) -> Result<(), FoodgramError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > USERNAME_MAX_LEN {
        return Err(FoodgramError::InvalidName);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), FoodgramError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(FoodgramError::InvalidPassword);
    }
    Ok(())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct RegisterUserUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> RegisterUserUseCase<R, H> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, FoodgramError> {
        let email = input.email.trim();
        if !validate_email(email) {
            return Err(FoodgramError::InvalidEmail);
        }
        if !validate_username(&input.username) {
            return Err(FoodgramError::InvalidUsername);
        }
        validate_person_name(&input.first_name)?;
        validate_person_name(&input.last_name)?;
        validate_password(&input.password)?;

        let new_user = NewUser {
            email: email.to_owned(),
            username: input.username,
            first_name: input.first_name.trim().to_owned(),
            last_name: input.last_name.trim().to_owned(),
            password_hash: self.hasher.hash(&input.password).await?,
        };
        let user = self
            .repo
            .create(&new_user)
            .await?
            .ok_or(FoodgramError::UserAlreadyExists)?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(
        &self,
        id: UserId,
        viewer: Option<UserId>,
    ) -> Result<UserProfile, FoodgramError> {
        self.repo
            .profile(id, viewer)
            .await?
            .ok_or(FoodgramError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, FoodgramError> {
        let page = page.clamped();
        let (profiles, count) = self.repo.list_profiles(viewer, page).await?;
        Ok(Page::new(profiles, count, page))
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct SetPasswordUseCase<R: UserRepository, H: PasswordHasher> {
    pub repo: R,
    pub hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> SetPasswordUseCase<R, H> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: SetPasswordInput,
    ) -> Result<(), FoodgramError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if !self
            .hasher
            .verify(&input.current_password, &user.password_hash)
            .await?
        {
            return Err(FoodgramError::InvalidCredentials);
        }
        validate_password(&input.new_password)?;
        let password_hash = self.hasher.hash(&input.new_password).await?;
        self.repo.update_password(user_id, &password_hash).await
    }
}

// ── SetBlocked ───────────────────────────────────────────────────────────────

pub struct SetBlockedUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetBlockedUseCase<R> {
    pub async fn execute(
        &self,
        actor: Identity,
        target: UserId,
        blocked: bool,
    ) -> Result<(), FoodgramError> {
        if !actor.is_admin() {
            return Err(FoodgramError::Forbidden);
        }
        if !self.repo.set_blocked(target, blocked).await? {
            return Err(FoodgramError::UserNotFound);
        }
        tracing::info!(admin_id = %actor.user_id, user_id = %target, blocked, "user block flag changed");
        Ok(())
    }
}
