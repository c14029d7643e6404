use chrono::Utc;
use toolhub_core::snapshot::LoadOrigin;
use toolhub_core::store::{Lookup, Placement};
use toolhub_core::users::{seed_users, NewUser, User, UserPatch};

use super::{Repository, ServiceConfig};
use crate::error::Result;
use crate::storage::{Slots, USERS_SLOT};

/// User queries and mutations
///
/// New users are appended to the end of the collection.
#[derive(Debug)]
pub struct UserService<S> {
    repo: Repository<User, S>,
}

impl<S: Slots> UserService<S> {
    pub fn new(slots: S, config: ServiceConfig) -> Self {
        Self {
            repo: Repository::new(USERS_SLOT, slots, seed_users, config),
        }
    }

    pub fn slots(&self) -> &S {
        self.repo.slots()
    }

    pub async fn load_origin(&self) -> Option<LoadOrigin> {
        self.repo.load_origin().await
    }

    pub async fn get_all(&self) -> Vec<User> {
        self.repo.read(|store| store.all()).await
    }

    pub async fn get_by_id(&self, id: &str) -> Lookup<User> {
        self.repo.read(|store| store.find(id)).await
    }

    /// First user whose email matches exactly
    pub async fn get_by_email(&self, email: &str) -> Lookup<User> {
        self.repo
            .read(|store| Lookup::from(store.filter(|u| u.email == email).into_iter().next()))
            .await
    }

    pub async fn get_admins(&self) -> Vec<User> {
        self.repo.read(|store| store.filter(|u| u.is_admin)).await
    }

    pub async fn create(&self, new: NewUser) -> Result<User> {
        self.repo
            .mutate(|store, ids| {
                let user = User::from_new(new, ids.next(), Utc::now());
                store.insert(user.clone(), Placement::Back);
                (user, true)
            })
            .await
    }

    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<Lookup<User>> {
        self.repo
            .mutate(|store, _| {
                let updated = store.update(id, |user| user.apply(patch));
                let changed = updated.is_found();
                (updated, changed)
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.repo
            .mutate(|store, _| {
                let removed = store.remove(id);
                (removed, removed)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlots;

    fn service() -> UserService<MemorySlots> {
        UserService::new(MemorySlots::new(), ServiceConfig::instant())
    }

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_create_appends() {
        let users = service();
        let created = users.create(new_user("Ann")).await.unwrap();

        let all = users.get_all().await;
        assert_eq!(all.len(), 4);
        assert_eq!(all.last(), Some(&created));
        assert_eq!(all[0].id, "1");
    }

    #[tokio::test]
    async fn test_create_then_get_by_id() {
        let users = service();
        let input = new_user("Bob");

        let created = users.create(input.clone()).await.unwrap();

        assert_eq!(created.name, input.name);
        assert_eq!(created.email, input.email);
        assert_eq!(created.is_admin, input.is_admin);
        assert_eq!(users.get_by_id(&created.id).await, Lookup::Found(created));
    }

    #[tokio::test]
    async fn test_get_admins() {
        let users = service();
        let mut admin = new_user("Root");
        admin.is_admin = true;
        let created = users.create(admin).await.unwrap();

        let admins: Vec<String> = users.get_admins().await.into_iter().map(|u| u.id).collect();
        assert_eq!(admins, vec!["1".to_string(), created.id]);
    }

    #[tokio::test]
    async fn test_get_by_email_is_exact() {
        let users = service();

        assert_eq!(
            users.get_by_email("jane@example.com").await.map(|u| u.id),
            Lookup::Found("2".to_string())
        );
        assert_eq!(users.get_by_email("JANE@example.com").await, Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_update_revokes_admin() {
        let users = service();

        let updated = users
            .update(
                "1",
                UserPatch {
                    is_admin: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.map(|u| u.is_admin), Lookup::Found(false));
        assert!(users.get_admins().await.is_empty());
        assert_eq!(users.slots().write_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let users = service();

        assert_eq!(users.get_by_id("99").await, Lookup::NotFound);
        assert_eq!(
            users.update("99", UserPatch::default()).await.unwrap(),
            Lookup::NotFound
        );
        assert!(!users.delete("99").await.unwrap());
        assert_eq!(users.slots().write_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let users = service();

        assert!(users.delete("2").await.unwrap());
        assert_eq!(users.get_by_id("2").await, Lookup::NotFound);
        assert_eq!(users.get_all().await.len(), 2);
        assert_eq!(users.slots().write_count(), 1);
    }
}
