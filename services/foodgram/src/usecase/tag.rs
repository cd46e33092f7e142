use foodgram_auth_types::identity::Identity;
use foodgram_domain::tag::{HexColor, validate_slug};

use crate::domain::repository::TagRepository;
use crate::domain::types::{NAME_MAX_LEN, NewTag, Tag};
use crate::error::FoodgramError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, FoodgramError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, slug: &str) -> Result<Tag, FoodgramError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or(FoodgramError::TagNotFound)
    }
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagInput {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(&self, actor: Identity, input: CreateTagInput) -> Result<Tag, FoodgramError> {
        if !actor.is_admin() {
            return Err(FoodgramError::Forbidden);
        }
        let name = input.name.trim();
        if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(FoodgramError::InvalidName);
        }
        let color: HexColor = input
            .color
            .parse()
            .map_err(|_| FoodgramError::InvalidColor)?;
        if !validate_slug(&input.slug) {
            return Err(FoodgramError::InvalidSlug);
        }
        let tag = NewTag {
            name: name.to_owned(),
            color,
            slug: input.slug,
        };
        self.repo
            .create(&tag)
            .await?
            .ok_or(FoodgramError::TagAlreadyExists)
    }
}
