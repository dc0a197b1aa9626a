use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Recipe, RecipeList, RecipeRef, Session, User};
use crate::utils::AppError;

pub type StoreResult<T> = Result<T, AppError>;

/// Result of a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// A document matched the filter
    pub matched: bool,
    /// The document actually changed
    pub modified: bool,
}

/// Document storage used by the managers.
///
/// Collection mutations are single atomic updates; callers never read a whole
/// document, change it in memory and write it back.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn find_user(&self, id: &ObjectId) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Returns `false` when the email is already registered.
    async fn insert_user(&self, user: &User) -> StoreResult<bool>;

    /// Returns the recipe with this `api_id`, creating it if none exists.
    async fn find_or_create_recipe(&self, api_id: &str, name: &str) -> StoreResult<Recipe>;

    /// Unordered; missing ids are skipped.
    async fn find_recipes(&self, ids: &[ObjectId]) -> StoreResult<Vec<Recipe>>;

    /// Removes the favorite with this `api_id`.
    async fn pull_favorite(&self, user_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome>;

    /// Prepends `entry` unless a favorite with the same `api_id` exists.
    async fn push_favorite_front(
        &self,
        user_id: &ObjectId,
        entry: &RecipeRef,
    ) -> StoreResult<UpdateOutcome>;

    async fn attach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome>;

    async fn detach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome>;

    async fn insert_list(&self, list: &RecipeList) -> StoreResult<()>;

    async fn find_list(&self, id: &ObjectId) -> StoreResult<Option<RecipeList>>;

    /// Unordered; missing ids are skipped.
    async fn find_lists(&self, ids: &[ObjectId]) -> StoreResult<Vec<RecipeList>>;

    /// Number of deleted documents
    async fn delete_list(&self, id: &ObjectId) -> StoreResult<u64>;

    async fn rename_list(&self, id: &ObjectId, name: &str) -> StoreResult<UpdateOutcome>;

    /// Appends `entry` unless the list already holds the same `api_id`.
    /// `matched == false` means the list is missing or the entry is a duplicate.
    async fn push_list_recipe(&self, list_id: &ObjectId, entry: &RecipeRef) -> StoreResult<UpdateOutcome>;

    async fn pull_list_recipe(&self, list_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome>;
}

/// Server-side session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save_session(&self, session: &Session) -> StoreResult<()>;

    async fn load_session(&self, id: &str) -> StoreResult<Option<Session>>;

    async fn destroy_session(&self, id: &str) -> StoreResult<()>;
}
