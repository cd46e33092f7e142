use foodgram_domain::id::UserId;
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::Subscription;
use crate::error::FoodgramError;

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> SubscribeUseCase<U, F> {
    pub async fn execute(
        &self,
        user_id: UserId,
        author_id: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<Subscription, FoodgramError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if user_id == author_id {
            return Err(FoodgramError::CannotSubscribeToSelf);
        }
        if !self.follows.follow(user_id, author_id).await? {
            return Err(FoodgramError::AlreadySubscribed);
        }
        self.follows
            .subscription(user_id, author_id, recipes_limit)
            .await?
            .ok_or(FoodgramError::UserNotFound)
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    pub async fn execute(&self, user_id: UserId, author_id: UserId) -> Result<(), FoodgramError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if !self.follows.unfollow(user_id, author_id).await? {
            return Err(FoodgramError::NotSubscribed);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> ListSubscriptionsUseCase<F> {
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<Subscription>, FoodgramError> {
        let page = page.clamped();
        let (subscriptions, count) = self
            .follows
            .subscriptions(user_id, page, recipes_limit)
            .await?;
        Ok(Page::new(subscriptions, count, page))
    }
}
