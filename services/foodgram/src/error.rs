use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Foodgram service error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    // not found
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,

    // validation
    #[error("ingredient list must not be empty")]
    EmptyIngredients,
    #[error("ingredient is listed more than once")]
    DuplicateIngredient,
    #[error("ingredient amount must be a positive integer")]
    InvalidAmount,
    #[error("cooking time must be a positive integer")]
    InvalidCookingTime,
    #[error("unknown tag")]
    UnknownTag,
    #[error("invalid name")]
    InvalidName,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid username")]
    InvalidUsername,
    #[error("password is too short")]
    InvalidPassword,
    #[error("invalid color")]
    InvalidColor,
    #[error("invalid slug")]
    InvalidSlug,
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    // state conflicts
    #[error("recipe is already in favorites")]
    AlreadyFavorited,
    #[error("recipe is not in favorites")]
    NotFavorited,
    #[error("recipe is already in the shopping cart")]
    AlreadyInCart,
    #[error("recipe is not in the shopping cart")]
    NotInCart,
    #[error("cannot favorite your own recipe")]
    CannotFavoriteOwnRecipe,
    #[error("already subscribed to this author")]
    AlreadySubscribed,
    #[error("not subscribed to this author")]
    NotSubscribed,
    #[error("cannot subscribe to yourself")]
    CannotSubscribeToSelf,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user is blocked")]
    UserBlocked,

    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::EmptyIngredients => "EMPTY_INGREDIENTS",
            Self::DuplicateIngredient => "DUPLICATE_INGREDIENT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::UnknownTag => "UNKNOWN_TAG",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidColor => "INVALID_COLOR",
            Self::InvalidSlug => "INVALID_SLUG",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::NotFavorited => "NOT_FAVORITED",
            Self::AlreadyInCart => "ALREADY_IN_CART",
            Self::NotInCart => "NOT_IN_CART",
            Self::CannotFavoriteOwnRecipe => "CANNOT_FAVORITE_OWN_RECIPE",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserBlocked => "USER_BLOCKED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::RecipeNotFound
            | Self::UserNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Validation failures and state conflicts share 400.
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for FoodgramError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}
