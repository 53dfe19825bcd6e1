use crate::storage::{load_json, save_json, StorageError};
use crate::user_models::User;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failures on the registration and login paths.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("failed to process password: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StorageError),
}

/// User collection backed by a JSON file on disk.
pub struct UserStorage {
    path: PathBuf,
    users: RwLock<Vec<User>>,
}

impl UserStorage {
    /// Opens the store at `path`, loading any existing users.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let users = load_json(&path)?;

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    /// Creates a user with a bcrypt-hashed password.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        let user = User::new(username.to_string(), password_hash);
        users.push(user.clone());
        save_json(&self.path, &users)?;
        Ok(user)
    }

    /// Checks credentials, returning the user on success.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn verify_login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let users = self.users.read().await;

        let Some(user) = users.iter().find(|u| u.username == username) else {
            return Err(AuthError::InvalidCredentials);
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.clone())
    }
}
