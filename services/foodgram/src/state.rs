use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use foodgram_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbFollowRepository, DbIngredientRepository, DbRecipeMarkRepository, DbRecipeRepository,
    DbTagRepository, DbUserRepository,
};
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_mark_repo(&self) -> DbRecipeMarkRepository {
        DbRecipeMarkRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2Hasher {
        Argon2Hasher
    }
}
