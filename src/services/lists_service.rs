// ==================== LISTS ====================
// Named recipe lists owned by a user

use crate::{
    database::Store,
    models::{ListView, RecipeAttrs, RecipeList, RecipeRef, User},
    services::{parse_id, recipe_service},
    utils::AppError,
};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;

const USER_NOT_FOUND: &str = "The user with the user id provided could not be found";
const LIST_NOT_FOUND: &str = "The list with this id could not be found";

#[derive(Debug)]
pub struct CreatedList {
    pub list_id: String,
    pub lists: Vec<ListView>,
}

/// Placeholder name for the next list of a user owning `list_count` lists
pub fn placeholder_name(list_count: usize) -> String {
    format!("Untitled List #{}", list_count + 1)
}

fn provided_name(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

async fn find_user(store: &dyn Store, user_oid: &ObjectId) -> Result<User, AppError> {
    store
        .find_user(user_oid)
        .await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

async fn find_list(store: &dyn Store, list_oid: &ObjectId) -> Result<RecipeList, AppError> {
    store
        .find_list(list_oid)
        .await?
        .ok_or_else(|| AppError::NotFound(LIST_NOT_FOUND.to_string()))
}

async fn view(store: &dyn Store, list: RecipeList) -> Result<ListView, AppError> {
    let recipes = recipe_service::resolve(store, &list.recipes).await?;
    Ok(ListView {
        id: list.id.to_hex(),
        name: list.name,
        recipes,
    })
}

/// Lists of `user`, in the user's order, each with recipes resolved.
/// Ids of lists that no longer exist are skipped.
async fn views_for(store: &dyn Store, user: &User) -> Result<Vec<ListView>, AppError> {
    let mut found: HashMap<ObjectId, RecipeList> = store
        .find_lists(&user.lists)
        .await?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();

    let ordered: Vec<RecipeList> = user
        .lists
        .iter()
        .filter_map(|id| found.remove(id))
        .collect();

    // One lookup for the recipes of every list
    let recipe_ids: Vec<ObjectId> = ordered
        .iter()
        .flat_map(|l| l.recipes.iter().map(|r| r.recipe_id))
        .collect();
    let recipes = store.find_recipes(&recipe_ids).await?;

    Ok(ordered
        .into_iter()
        .map(|list| ListView {
            id: list.id.to_hex(),
            recipes: recipe_service::order_by_refs(&list.recipes, &recipes),
            name: list.name,
        })
        .collect())
}

pub async fn get_one(store: &dyn Store, list_id: &str) -> Result<ListView, AppError> {
    let list_oid = parse_id(list_id, LIST_NOT_FOUND)?;
    let list = find_list(store, &list_oid).await?;
    view(store, list).await
}

pub async fn get_all(store: &dyn Store, user_id: &str) -> Result<Vec<ListView>, AppError> {
    let user_oid = parse_id(user_id, USER_NOT_FOUND)?;
    let user = find_user(store, &user_oid).await?;
    views_for(store, &user).await
}

pub async fn create(
    store: &dyn Store,
    user_id: &str,
    name: Option<&str>,
) -> Result<CreatedList, AppError> {
    let user_oid = parse_id(user_id, USER_NOT_FOUND)?;
    let user = find_user(store, &user_oid).await?;

    let list_name = provided_name(name)
        .map(str::to_string)
        .unwrap_or_else(|| placeholder_name(user.lists.len()));

    let list = RecipeList::new(user_oid, &list_name);
    store.insert_list(&list).await.map_err(|e| {
        log::error!("❌ Failed to insert list for {}: {}", user_id, e);
        AppError::InternalError("Failed to create new list".to_string())
    })?;

    let attached = store.attach_list(&user_oid, &list.id).await?;
    if !attached.matched {
        // User vanished between lookup and attach; drop the orphan
        log::warn!("⚠️  User {} gone while creating list, removing {}", user_id, list.id);
        store.delete_list(&list.id).await?;
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    }

    log::info!("📝 Created list '{}' ({}) for {}", list_name, list.id, user_id);

    Ok(CreatedList {
        list_id: list.id.to_hex(),
        lists: get_all(store, user_id).await?,
    })
}

pub async fn add_recipe(
    store: &dyn Store,
    list_id: &str,
    attrs: &RecipeAttrs,
) -> Result<ListView, AppError> {
    let recipe = recipe_service::validate(attrs, "Please provide recipe data to add to this list")?;
    let stored = recipe_service::normalize(store, &recipe).await?;

    let list_oid = parse_id(list_id, LIST_NOT_FOUND)?;
    let pushed = store
        .push_list_recipe(&list_oid, &RecipeRef::from(&stored))
        .await?;

    if !pushed.matched {
        // Either the list is gone or it already holds this apiId
        find_list(store, &list_oid).await?;
        return Err(AppError::BadRequest(
            "This recipe has already been added to this list".to_string(),
        ));
    }

    log::info!("➕ Added {} to list {}", recipe.api_id, list_id);
    get_one(store, list_id).await
}

/// Removes the entry whose apiId equals `recipe_id`; absent entries are a no-op
pub async fn delete_recipe(
    store: &dyn Store,
    list_id: &str,
    recipe_id: &str,
) -> Result<ListView, AppError> {
    let list_oid = parse_id(list_id, LIST_NOT_FOUND)?;
    let pulled = store.pull_list_recipe(&list_oid, recipe_id).await?;
    if !pulled.matched {
        return Err(AppError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    if pulled.modified {
        log::info!("➖ Removed {} from list {}", recipe_id, list_id);
    }
    get_one(store, list_id).await
}

/// Deletes a list, detaches it from its stored owner and returns the lists
/// of `user_id`
pub async fn delete_one(
    store: &dyn Store,
    user_id: &str,
    list_id: &str,
) -> Result<Vec<ListView>, AppError> {
    let delete_failed =
        || AppError::InternalError("Failed to delete list. Please try again later.".to_string());

    let list_oid = ObjectId::parse_str(list_id).map_err(|_| delete_failed())?;
    let list = store.find_list(&list_oid).await?.ok_or_else(delete_failed)?;
    if store.delete_list(&list_oid).await? == 0 {
        return Err(delete_failed());
    }

    store.detach_list(&list.owner_id, &list_oid).await?;

    log::info!("🗑️  Deleted list {} of {}", list_id, user_id);
    get_all(store, user_id).await
}

/// Deletes a list on behalf of its stored owner
pub async fn delete_owned(store: &dyn Store, list_id: &str) -> Result<Vec<ListView>, AppError> {
    let list_oid = parse_id(list_id, LIST_NOT_FOUND)?;
    let list = find_list(store, &list_oid).await?;
    delete_one(store, &list.owner_id.to_hex(), list_id).await
}

/// Renames a list; an empty name gets a placeholder from the owner's list count
pub async fn update_name(
    store: &dyn Store,
    list_id: &str,
    name: Option<&str>,
) -> Result<ListView, AppError> {
    let list_oid = parse_id(list_id, LIST_NOT_FOUND)?;
    let list = find_list(store, &list_oid).await?;

    let new_name = match provided_name(name) {
        Some(name) => name.to_string(),
        None => {
            let owned = store
                .find_user(&list.owner_id)
                .await?
                .map_or(0, |owner| owner.lists.len());
            placeholder_name(owned)
        }
    };

    let renamed = store.rename_list(&list_oid, &new_name).await?;
    if !renamed.matched {
        return Err(AppError::NotFound(LIST_NOT_FOUND.to_string()));
    }

    log::info!("✏️  Renamed list {} to '{}'", list_id, new_name);
    get_one(store, list_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::database::{StoreResult, UpdateOutcome};
    use crate::models::Recipe;
    use async_trait::async_trait;

    /// Loses the user right after lookup: every `attach_list` misses
    struct VanishingUserStore(MemoryStore);

    #[async_trait]
    impl Store for VanishingUserStore {
        async fn ping(&self) -> StoreResult<()> {
            self.0.ping().await
        }
        async fn find_user(&self, id: &ObjectId) -> StoreResult<Option<User>> {
            self.0.find_user(id).await
        }
        async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
            self.0.find_user_by_email(email).await
        }
        async fn insert_user(&self, user: &User) -> StoreResult<bool> {
            self.0.insert_user(user).await
        }
        async fn find_or_create_recipe(&self, api_id: &str, name: &str) -> StoreResult<Recipe> {
            self.0.find_or_create_recipe(api_id, name).await
        }
        async fn find_recipes(&self, ids: &[ObjectId]) -> StoreResult<Vec<Recipe>> {
            self.0.find_recipes(ids).await
        }
        async fn pull_favorite(&self, user_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
            self.0.pull_favorite(user_id, api_id).await
        }
        async fn push_favorite_front(
            &self,
            user_id: &ObjectId,
            entry: &RecipeRef,
        ) -> StoreResult<UpdateOutcome> {
            self.0.push_favorite_front(user_id, entry).await
        }
        async fn attach_list(&self, _: &ObjectId, _: &ObjectId) -> StoreResult<UpdateOutcome> {
            Ok(UpdateOutcome::default())
        }
        async fn detach_list(&self, user_id: &ObjectId, list_id: &ObjectId) -> StoreResult<UpdateOutcome> {
            self.0.detach_list(user_id, list_id).await
        }
        async fn insert_list(&self, list: &RecipeList) -> StoreResult<()> {
            self.0.insert_list(list).await
        }
        async fn find_list(&self, id: &ObjectId) -> StoreResult<Option<RecipeList>> {
            self.0.find_list(id).await
        }
        async fn find_lists(&self, ids: &[ObjectId]) -> StoreResult<Vec<RecipeList>> {
            self.0.find_lists(ids).await
        }
        async fn delete_list(&self, id: &ObjectId) -> StoreResult<u64> {
            self.0.delete_list(id).await
        }
        async fn rename_list(&self, id: &ObjectId, name: &str) -> StoreResult<UpdateOutcome> {
            self.0.rename_list(id, name).await
        }
        async fn push_list_recipe(&self, list_id: &ObjectId, entry: &RecipeRef) -> StoreResult<UpdateOutcome> {
            self.0.push_list_recipe(list_id, entry).await
        }
        async fn pull_list_recipe(&self, list_id: &ObjectId, api_id: &str) -> StoreResult<UpdateOutcome> {
            self.0.pull_list_recipe(list_id, api_id).await
        }
    }

    async fn seeded_user(store: &MemoryStore, email: &str) -> String {
        let user = User::new(email, "hash");
        store.insert_user(&user).await.unwrap();
        user.id.to_hex()
    }

    fn names(lists: &[ListView]) -> Vec<&str> {
        lists.iter().map(|l| l.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_without_name_uses_next_placeholder() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;

        create(&store, &user_id, Some("Dinners")).await.unwrap();
        create(&store, &user_id, None).await.unwrap();
        let created = create(&store, &user_id, Some("")).await.unwrap();

        assert_eq!(names(&created.lists), vec!["Dinners", "Untitled List #2", "Untitled List #3"]);
        assert_eq!(created.lists[2].id, created.list_id);
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_creates_nothing() {
        let store = MemoryStore::new();
        let missing = ObjectId::new().to_hex();

        let err = create(&store, &missing, Some("Ghost")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_removes_list_when_user_vanishes() {
        let store = VanishingUserStore(MemoryStore::new());
        let user = User::new("gone@example.com", "hash");
        store.insert_user(&user).await.unwrap();

        let err = create(&store, &user.id.to_hex(), Some("Orphan")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.0.list_count(), 0);
    }

    #[tokio::test]
    async fn test_add_recipe_and_reject_duplicate() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let created = create(&store, &user_id, Some("Soups")).await.unwrap();

        let list = add_recipe(&store, &created.list_id, &RecipeAttrs::new("10", "Miso"))
            .await
            .unwrap();
        assert_eq!(list.recipes.len(), 1);

        let err = add_recipe(&store, &created.list_id, &RecipeAttrs::new("10", "Miso"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let unchanged = get_one(&store, &created.list_id).await.unwrap();
        assert_eq!(unchanged, list);
    }

    #[tokio::test]
    async fn test_add_recipe_validation_and_missing_list() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let created = create(&store, &user_id, None).await.unwrap();

        let no_name = RecipeAttrs { api_id: Some("1".into()), name: None };
        let err = add_recipe(&store, &created.list_id, &no_name).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let missing = ObjectId::new().to_hex();
        let err = add_recipe(&store, &missing, &RecipeAttrs::new("1", "A")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_same_recipe_in_two_lists_shares_document() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let first = create(&store, &user_id, None).await.unwrap();
        let second = create(&store, &user_id, None).await.unwrap();

        let a = add_recipe(&store, &first.list_id, &RecipeAttrs::new("5", "Tacos")).await.unwrap();
        let b = add_recipe(&store, &second.list_id, &RecipeAttrs::new("5", "Tacos")).await.unwrap();

        assert_eq!(a.recipes[0].id, b.recipes[0].id);
        assert_eq!(store.recipe_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_recipe_by_api_id_and_noop_for_absent() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let created = create(&store, &user_id, None).await.unwrap();
        add_recipe(&store, &created.list_id, &RecipeAttrs::new("1", "A")).await.unwrap();
        let before = add_recipe(&store, &created.list_id, &RecipeAttrs::new("2", "B"))
            .await
            .unwrap();

        let unchanged = delete_recipe(&store, &created.list_id, "999").await.unwrap();
        assert_eq!(unchanged, before);

        let after = delete_recipe(&store, &created.list_id, "1").await.unwrap();
        let api_ids: Vec<&str> = after.recipes.iter().map(|r| r.api_id.as_str()).collect();
        assert_eq!(api_ids, vec!["2"]);

        let err = delete_recipe(&store, &ObjectId::new().to_hex(), "1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_one_detaches_from_user() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let keep = create(&store, &user_id, Some("Keep")).await.unwrap();
        let dropped = create(&store, &user_id, Some("Drop")).await.unwrap();

        let lists = delete_one(&store, &user_id, &dropped.list_id).await.unwrap();
        assert_eq!(names(&lists), vec!["Keep"]);

        let user = store
            .find_user(&ObjectId::parse_str(&user_id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.lists, vec![ObjectId::parse_str(&keep.list_id).unwrap()]);

        let err = delete_one(&store, &user_id, &dropped.list_id).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn test_delete_one_detaches_from_owner_not_path_user() {
        let store = MemoryStore::new();
        let owner_id = seeded_user(&store, "owner@example.com").await;
        let other_id = seeded_user(&store, "other@example.com").await;
        let created = create(&store, &owner_id, Some("Mine")).await.unwrap();

        delete_one(&store, &other_id, &created.list_id).await.unwrap();

        let owner = store
            .find_user(&ObjectId::parse_str(&owner_id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(owner.lists.is_empty());

        let next = create(&store, &owner_id, None).await.unwrap();
        assert_eq!(names(&next.lists), vec!["Untitled List #1"]);
    }

    #[tokio::test]
    async fn test_delete_owned_uses_list_owner() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let created = create(&store, &user_id, None).await.unwrap();

        let lists = delete_owned(&store, &created.list_id).await.unwrap();
        assert!(lists.is_empty());
        assert!(get_all(&store, &user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_name_and_placeholder() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        create(&store, &user_id, Some("One")).await.unwrap();
        let created = create(&store, &user_id, Some("Two")).await.unwrap();

        let renamed = update_name(&store, &created.list_id, Some("Brunch")).await.unwrap();
        assert_eq!(renamed.name, "Brunch");

        let placeholder = update_name(&store, &created.list_id, Some("")).await.unwrap();
        assert_eq!(placeholder.name, "Untitled List #3");

        let err = update_name(&store, &ObjectId::new().to_hex(), Some("x")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_name_placeholder_when_owner_is_gone() {
        let store = MemoryStore::new();
        let orphan = RecipeList::new(ObjectId::new(), "Leftovers");
        store.insert_list(&orphan).await.unwrap();

        let renamed = update_name(&store, &orphan.id.to_hex(), None).await.unwrap();
        assert_eq!(renamed.name, "Untitled List #1");
    }

    #[tokio::test]
    async fn test_get_all_resolves_recipes_per_list() {
        let store = MemoryStore::new();
        let user_id = seeded_user(&store, "a@example.com").await;
        let first = create(&store, &user_id, Some("First")).await.unwrap();
        let second = create(&store, &user_id, Some("Second")).await.unwrap();
        add_recipe(&store, &first.list_id, &RecipeAttrs::new("1", "A")).await.unwrap();
        add_recipe(&store, &second.list_id, &RecipeAttrs::new("2", "B")).await.unwrap();
        add_recipe(&store, &second.list_id, &RecipeAttrs::new("3", "C")).await.unwrap();

        let lists = get_all(&store, &user_id).await.unwrap();
        assert_eq!(names(&lists), vec!["First", "Second"]);
        assert_eq!(lists[0].recipes.len(), 1);
        let second_ids: Vec<&str> = lists[1].recipes.iter().map(|r| r.api_id.as_str()).collect();
        assert_eq!(second_ids, vec!["2", "3"]);
    }

    #[test]
    fn test_placeholder_name() {
        assert_eq!(placeholder_name(0), "Untitled List #1");
        assert_eq!(placeholder_name(2), "Untitled List #3");
    }
}
