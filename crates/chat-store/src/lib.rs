//! SQLite persistence layer for the chat data model.
//!
//! This crate provides async storage for users, conversations, messages, and
//! conversation membership using SQLx with SQLite, plus the repository
//! facade and change-notification layer the view crates build on.
//!
//! # Example
//!
//! ```no_run
//! use chat_store::{models::User, repository::ChatRepository, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let store = Store::connect("sqlite:chat.db?mode=rwc").await?;
//!     store.migrate().await?;
//!
//!     let repo = ChatRepository::new(&store);
//!     repo.insert_user(&User {
//!         id: "user_1".to_string(),
//!         username: "ava.martin101".to_string(),
//!         display_name: "Ava Martin".to_string(),
//!         avatar_url: None,
//!         is_online: true,
//!         last_seen: chat_store::now_ms(),
//!         status_message: None,
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod conversation;
pub mod error;
pub mod events;
pub mod message;
pub mod models;
pub mod participant;
pub mod repository;
pub mod user;

pub use error::{Result, StoreError};
pub use events::{ChangeNotifier, StoreEvent};
pub use models::{
    Conversation, CurrentUser, Message, MessageStatus, MessageType, Participant,
    ParticipantRole, User,
};
pub use repository::ChatRepository;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Current time as epoch milliseconds, the timestamp unit used throughout
/// the schema.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 8;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`,
    /// or `sqlite::memory:` for tests. Foreign keys are always enabled so
    /// participant and message rows cascade with their parents.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// Call once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    async fn test_store() -> Store {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn user_round_trip_and_replace() {
        let store = test_store().await;

        let alice = User {
            id: "user_1".to_string(),
            username: "alice.wright101".to_string(),
            display_name: "Alice Wright".to_string(),
            avatar_url: Some("https://example.com/a.png".to_string()),
            is_online: true,
            last_seen: 42,
            status_message: Some("Coffee break ☕".to_string()),
        };
        user::insert_user(store.pool(), &alice).await.unwrap();

        let fetched = user::get_user(store.pool(), "user_1").await.unwrap().unwrap();
        assert_eq!(fetched, alice);

        // Same primary key, new payload: second write wins outright.
        let replacement = User {
            display_name: "Alice W.".to_string(),
            is_online: false,
            ..alice.clone()
        };
        user::insert_user(store.pool(), &replacement).await.unwrap();

        let fetched = user::get_user(store.pool(), "user_1").await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
        assert_eq!(user::count_users(store.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn online_filter_and_presence_update() {
        let store = test_store().await;

        for (id, online) in [("u1", true), ("u2", false), ("u3", true)] {
            let u = User {
                id: id.to_string(),
                username: format!("{id}.name"),
                display_name: id.to_uppercase(),
                avatar_url: None,
                is_online: online,
                last_seen: 0,
                status_message: None,
            };
            user::insert_user(store.pool(), &u).await.unwrap();
        }

        let online = user::list_online_users(store.pool()).await.unwrap();
        assert_eq!(online.len(), 2);

        user::set_online_status(store.pool(), "u1", false, 999)
            .await
            .unwrap();
        let u1 = user::get_user(store.pool(), "u1").await.unwrap().unwrap();
        assert!(!u1.is_online);
        assert_eq!(u1.last_seen, 999);
    }
}
