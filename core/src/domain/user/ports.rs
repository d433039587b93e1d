use std::sync::{Arc, Mutex};

use crate::domain::{
    common::CoreError,
    user::entities::{InsertUserInput, User, UserId},
};

pub trait UserRepository: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Persists a new user and returns it with its generated identifier.
    ///
    /// Implementations backed by a store with a uniqueness constraint on
    /// `username` should return the existing row when the username is
    /// already taken, so that racing find-or-create callers converge.
    fn save(&self, input: InsertUserInput) -> impl Future<Output = Result<User, CoreError>> + Send;
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository already holding a user with the given username.
    pub fn with_user(username: &str) -> Self {
        let repository = Self::new();
        repository.push(User {
            id: UserId::from(uuid::Uuid::new_v4()),
            username: username.to_string(),
            created_at: chrono::Utc::now(),
        });
        repository
    }

    pub fn push(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();

        let user = users.iter().find(|u| u.username == username).cloned();

        Ok(user)
    }

    async fn save(&self, input: InsertUserInput) -> Result<User, CoreError> {
        let mut users = self.users.lock().unwrap();

        if let Some(existing) = users.iter().find(|u| u.username == input.username) {
            return Ok(existing.clone());
        }

        let new_user = User {
            id: UserId::from(uuid::Uuid::new_v4()),
            username: input.username,
            created_at: chrono::Utc::now(),
        };

        users.push(new_user.clone());

        Ok(new_user)
    }
}
