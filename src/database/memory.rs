use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{SessionStore, Store, StoreResult, UpdateOutcome};
use crate::models::{Recipe, RecipeList, RecipeRef, Session, User};
use crate::utils::AppError;

/// In-process store with the same update semantics as the MongoDB one
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<ObjectId, User>,
    recipes: HashMap<ObjectId, Recipe>,
    lists: HashMap<ObjectId, RecipeList>,
    sessions: HashMap<String, Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::DatabaseError("memory store poisoned".to_string()))
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().map(|inner| inner.recipes.len()).unwrap_or(0)
    }

    pub fn user_count(&self) -> usize {
        self.lock().map(|inner| inner.users.len()).unwrap_or(0)
    }

    pub fn list_count(&self) -> usize {
        self.lock().map(|inner| inner.lists.len()).unwrap_or(0)
    }
}

fn touched(matched: bool, modified: bool) -> UpdateOutcome {
    UpdateOutcome { matched, modified }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn find_user(&self, id: &ObjectId) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<bool> {
        let mut inner = self.lock()?;
        if inner.users.values().any(|u| u.email == user.email) {
            return Ok(false);
        }
        inner.users.insert(user.id, user.clone());
        Ok(true)
    }

    async fn find_or_create_recipe(&self, api_id: &str, name: &str) -> StoreResult<Recipe> {
        let mut inner = self.lock()?;
        if let Some(existing) = inner.recipes.values().find(|r| r.api_id == api_id) {
            return Ok(existing.clone());
        }
        let recipe = Recipe {
            id: ObjectId::new(),
            api_id: api_id.to_string(),
            name: name.to_string(),
        };
        inner.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn find_recipes(&self, ids: &[ObjectId]) -> StoreResult<Vec<Recipe>> {
        let inner = self.lock()?;
        Ok(ids.iter().filter_map(|id| inner.recipes.get(id).cloned()).collect())
    }

    async fn pull_favorite(&self, user_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        let Some(user) = inner.users.get_mut(user_id) else {
            return Ok(UpdateOutcome::default());
        };
        let before = user.favorites.len();
        user.favorites.retain(|f| f.api_id != api_id);
        Ok(touched(true, user.favorites.len() != before))
    }

    async fn push_favorite_front(
        &self,
        user_id: &ObjectId,
        entry: &RecipeRef,
    ) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.users.get_mut(user_id) {
            Some(user) if !user.favorites.iter().any(|f| f.api_id == entry.api_id) => {
                user.favorites.insert(0, entry.clone());
                Ok(touched(true, true))
            }
            _ => Ok(UpdateOutcome::default()),
        }
    }

    async fn attach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.users.get_mut(user_id) {
            Some(user) => {
                user.lists.push(*list_id);
                Ok(touched(true, true))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn detach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.users.get_mut(user_id) {
            Some(user) => {
                let before = user.lists.len();
                user.lists.retain(|id| id != list_id);
                Ok(touched(true, user.lists.len() != before))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn insert_list(&self, list: &RecipeList) -> StoreResult<()> {
        self.lock()?.lists.insert(list.id, list.clone());
        Ok(())
    }

    async fn find_list(&self, id: &ObjectId) -> StoreResult<Option<RecipeList>> {
        Ok(self.lock()?.lists.get(id).cloned())
    }

    async fn find_lists(&self, ids: &[ObjectId]) -> StoreResult<Vec<RecipeList>> {
        let inner = self.lock()?;
        Ok(ids.iter().filter_map(|id| inner.lists.get(id).cloned()).collect())
    }

    async fn delete_list(&self, id: &ObjectId) -> StoreResult<u64> {
        Ok(self.lock()?.lists.remove(id).map_or(0, |_| 1))
    }

    async fn rename_list(&self, id: &ObjectId, name: &str) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.lists.get_mut(id) {
            Some(list) => {
                let modified = list.name != name;
                list.name = name.to_string();
                Ok(touched(true, modified))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn push_list_recipe(&self, list_id: &ObjectId, entry: &RecipeRef) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.lists.get_mut(list_id) {
            Some(list) if !list.recipes.iter().any(|r| r.api_id == entry.api_id) => {
                list.recipes.push(entry.clone());
                Ok(touched(true, true))
            }
            _ => Ok(UpdateOutcome::default()),
        }
    }

    async fn pull_list_recipe(&self, list_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        match inner.lists.get_mut(list_id) {
            Some(list) => {
                let before = list.recipes.len();
                list.recipes.retain(|r| r.api_id != api_id);
                Ok(touched(true, list.recipes.len() != before))
            }
            None => Ok(UpdateOutcome::default()),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save_session(&self, session: &Session) -> StoreResult<()> {
        self.lock()?.sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn load_session(&self, id: &str) -> StoreResult<Option<Session>> {
        Ok(self.lock()?.sessions.get(id).cloned())
    }

    async fn destroy_session(&self, id: &str) -> StoreResult<()> {
        self.lock()?.sessions.remove(id);
        Ok(())
    }
}
