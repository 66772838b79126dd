//! User query operations.
//!
//! Inserts use replace-on-conflict semantics: a row with an existing id
//! fully replaces the old row, no merge.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::User;

const USER_COLUMNS: &str =
    "id, username, display_name, avatar_url, is_online, last_seen, status_message";

/// Insert a user, replacing any existing row with the same id.
///
/// Uses an upsert rather than `INSERT OR REPLACE`: the latter deletes the
/// conflicting row first, which would fire cascade deletes on dependents.
pub async fn insert_user(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users
            (id, username, display_name, avatar_url, is_online, last_seen, status_message)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            username = excluded.username,
            display_name = excluded.display_name,
            avatar_url = excluded.avatar_url,
            is_online = excluded.is_online,
            last_seen = excluded.last_seen,
            status_message = excluded.status_message
        "#,
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.display_name)
    .bind(&user.avatar_url)
    .bind(user.is_online)
    .bind(user.last_seen)
    .bind(&user.status_message)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert many users. Each row is atomic; the batch is not.
pub async fn insert_users(pool: &SqlitePool, users: &[User]) -> Result<()> {
    for user in users {
        insert_user(pool, user).await?;
    }
    Ok(())
}

/// Point lookup by id.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// All users, in id order.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Users currently flagged online.
pub async fn list_online_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE is_online = 1 ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Update presence for a user.
pub async fn set_online_status(
    pool: &SqlitePool,
    id: &str,
    is_online: bool,
    last_seen: i64,
) -> Result<()> {
    sqlx::query("UPDATE users SET is_online = ?, last_seen = ? WHERE id = ?")
        .bind(is_online)
        .bind(last_seen)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete every user row. Used only by the reset/reseed path.
pub async fn delete_all_users(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(())
}
