use crate::core::UserRepository;
use crate::domain::model::{NewUser, User};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct UserTable {
    users: HashMap<u64, User>,
    next_id: u64,
}

/// Process-local user store. Ids start at 1 and are never reused.
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(UserTable {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user(&self, id: u64) -> Option<User> {
        self.table.read().await.users.get(&id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.table
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut table = self.table.write().await;
        if table.users.values().any(|u| u.username == user.username) {
            return Err(FeedError::DuplicateUser {
                username: user.username,
            });
        }

        let id = table.next_id;
        table.next_id += 1;
        let created = User {
            id,
            username: user.username,
            password: user.password,
        };
        table.users.insert(id, created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryUserRepository::new();

        let alice = repo.create_user(new_user("alice")).await.unwrap();
        let bob = repo.create_user(new_user("bob")).await.unwrap();
        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);

        assert_eq!(repo.get_user(2).await, Some(bob));
        assert_eq!(repo.get_user_by_username("alice").await, Some(alice));
        assert_eq!(repo.get_user(3).await, None);
        assert_eq!(repo.get_user_by_username("carol").await, None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(new_user("alice")).await.unwrap();

        let err = repo.create_user(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, FeedError::DuplicateUser { .. }));

        let next = repo.create_user(new_user("bob")).await.unwrap();
        assert_eq!(next.id, 2);
    }
}
