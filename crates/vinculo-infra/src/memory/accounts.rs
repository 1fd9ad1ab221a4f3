use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use vinculo_core::domain::{AdminProfile, User};
use vinculo_core::error::RepoError;
use vinculo_core::ports::{BaseRepository, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email && u.id != user.id) {
            return Err(RepoError::Constraint(format!(
                "email '{}' already registered",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = email.trim().to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAdminProfileRepository {
    profiles: RwLock<HashMap<Uuid, AdminProfile>>,
}

impl InMemoryAdminProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<AdminProfile, Uuid> for InMemoryAdminProfileRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<AdminProfile>, RepoError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn save(&self, profile: AdminProfile) -> Result<AdminProfile, RepoError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), RepoError> {
        self.profiles
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
