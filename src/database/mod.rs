pub mod store;
#[cfg(test)]
pub mod memory;

pub use store::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::results::UpdateResult;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

use crate::models::{Recipe, RecipeList, RecipeRef, Session, User};
use crate::utils::AppError;

const USERS: &str = "users";
const RECIPES: &str = "recipes";
const LISTS: &str = "lists";
const SESSIONS: &str = "sessions";

const DEFAULT_DB_NAME: &str = "recipe-app";
const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host/recipe-app
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes the managers rely on. Failures are logged, not
    /// fatal: an existing collection with duplicate data keeps working.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let unique = IndexOptions::builder().unique(true).build();

        let users_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique.clone())
            .build();
        self.create_index(USERS, users_email, "users(email) unique").await;

        let recipes_api_id = IndexModel::builder()
            .keys(doc! { "apiId": 1 })
            .options(unique)
            .build();
        self.create_index(RECIPES, recipes_api_id, "recipes(apiId) unique").await;

        let lists_owner = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .build();
        self.create_index(LISTS, lists_owner, "lists(owner_id)").await;

        let sessions_ttl = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .build(),
            )
            .build();
        self.create_index(SESSIONS, sessions_ttl, "sessions(expires_at) ttl").await;

        log::info!("✅ Database indexes ready");
    }

    async fn create_index(&self, collection: &str, index: IndexModel, label: &str) {
        match self.collection::<Document>(collection).create_index(index).await {
            Ok(_) => log::info!("   ✅ Index created: {}", label),
            Err(e) => log::warn!("   ⚠️  Index {} not created: {}", label, e),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS)
    }

    fn recipes(&self) -> Collection<Recipe> {
        self.collection(RECIPES)
    }

    fn lists(&self) -> Collection<RecipeList> {
        self.collection(LISTS)
    }

    fn sessions(&self) -> Collection<Session> {
        self.collection(SESSIONS)
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn outcome(result: UpdateResult) -> UpdateOutcome {
    UpdateOutcome {
        matched: result.matched_count > 0,
        modified: result.modified_count > 0,
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_user(&self, id: &ObjectId) -> StoreResult<Option<User>> {
        Ok(self.users().find_one(doc! { "_id": *id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: &User) -> StoreResult<bool> {
        match self.users().insert_one(user).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_or_create_recipe(&self, api_id: &str, name: &str) -> StoreResult<Recipe> {
        let filter = doc! { "apiId": api_id };

        let upserted = self
            .recipes()
            .find_one_and_update(filter.clone(), doc! { "$setOnInsert": { "name": name } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await;

        let recipe = match upserted {
            Ok(recipe) => recipe,
            // Lost an upsert race against the unique index; the winner's document exists now
            Err(e) if is_duplicate_key(&e) => self.recipes().find_one(filter).await?,
            Err(e) => return Err(e.into()),
        };

        recipe.ok_or_else(|| AppError::InternalError("Failed to create new recipe".to_string()))
    }

    async fn find_recipes(&self, ids: &[ObjectId]) -> StoreResult<Vec<Recipe>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .recipes()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn pull_favorite(&self, user_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
        let result = self
            .users()
            .update_one(
                doc! { "_id": *user_id },
                doc! { "$pull": { "favorites": { "api_id": api_id } } },
            )
            .await?;
        Ok(outcome(result))
    }

    async fn push_favorite_front(
        &self,
        user_id: &ObjectId,
        entry: &RecipeRef,
    ) -> StoreResult<UpdateOutcome> {
        let entry_bson = to_bson(entry)?;
        let result = self
            .users()
            .update_one(
                doc! { "_id": *user_id, "favorites.api_id": { "$ne": entry.api_id.as_str() } },
                doc! { "$push": { "favorites": { "$each": [entry_bson], "$position": 0 } } },
            )
            .await?;
        Ok(outcome(result))
    }

    async fn attach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome> {
        let result = self
            .users()
            .update_one(doc! { "_id": *user_id }, doc! { "$push": { "lists": *list_id } })
            .await?;
        Ok(outcome(result))
    }

    async fn detach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome> {
        let result = self
            .users()
            .update_one(doc! { "_id": *user_id }, doc! { "$pull": { "lists": *list_id } })
            .await?;
        Ok(outcome(result))
    }

    async fn insert_list(&self, list: &RecipeList) -> StoreResult<()> {
        self.lists().insert_one(list).await?;
        Ok(())
    }

    async fn find_list(&self, id: &ObjectId) -> StoreResult<Option<RecipeList>> {
        Ok(self.lists().find_one(doc! { "_id": *id }).await?)
    }

    async fn find_lists(&self, ids: &[ObjectId]) -> StoreResult<Vec<RecipeList>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .lists()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_list(&self, id: &ObjectId) -> StoreResult<u64> {
        let result = self.lists().delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count)
    }

    async fn rename_list(&self, id: &ObjectId, name: &str) -> StoreResult<UpdateOutcome> {
        let result = self
            .lists()
            .update_one(doc! { "_id": *id }, doc! { "$set": { "name": name } })
            .await?;
        Ok(outcome(result))
    }

    async fn push_list_recipe(&self, list_id: &ObjectId, entry: &RecipeRef) -> StoreResult<UpdateOutcome> {
        let entry_bson = to_bson(entry)?;
        let result = self
            .lists()
            .update_one(
                doc! { "_id": *list_id, "recipes.api_id": { "$ne": entry.api_id.as_str() } },
                doc! { "$push": { "recipes": entry_bson } },
            )
            .await?;
        Ok(outcome(result))
    }

    async fn pull_list_recipe(&self, list_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
        let result = self
            .lists()
            .update_one(
                doc! { "_id": *list_id },
                doc! { "$pull": { "recipes": { "api_id": api_id } } },
            )
            .await?;
        Ok(outcome(result))
    }
}

#[async_trait]
impl SessionStore for MongoDB {
    async fn save_session(&self, session: &Session) -> StoreResult<()> {
        self.sessions()
            .replace_one(doc! { "_id": session.id.as_str() }, session)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn load_session(&self, id: &str) -> StoreResult<Option<Session>> {
        Ok(self.sessions().find_one(doc! { "_id": id }).await?)
    }

    async fn destroy_session(&self, id: &str) -> StoreResult<()> {
        self.sessions().delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
