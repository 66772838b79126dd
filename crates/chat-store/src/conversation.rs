//! Conversation query operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Conversation;

const CONVERSATION_COLUMNS: &str = "id, title, is_group, created_at, updated_at, \
     last_message_id, last_message_text, last_message_timestamp, unread_count, \
     is_pinned, is_muted, avatar_url, last_viewed_at";

/// Insert a conversation, replacing any existing row with the same id.
///
/// Upsert, not `INSERT OR REPLACE`: a REPLACE deletes the old row first and
/// would cascade-delete the conversation's messages and participants.
pub async fn insert_conversation(pool: &SqlitePool, conversation: &Conversation) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO conversations
            (id, title, is_group, created_at, updated_at,
             last_message_id, last_message_text, last_message_timestamp,
             unread_count, is_pinned, is_muted, avatar_url, last_viewed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            is_group = excluded.is_group,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at,
            last_message_id = excluded.last_message_id,
            last_message_text = excluded.last_message_text,
            last_message_timestamp = excluded.last_message_timestamp,
            unread_count = excluded.unread_count,
            is_pinned = excluded.is_pinned,
            is_muted = excluded.is_muted,
            avatar_url = excluded.avatar_url,
            last_viewed_at = excluded.last_viewed_at
        "#,
    )
    .bind(&conversation.id)
    .bind(&conversation.title)
    .bind(conversation.is_group)
    .bind(conversation.created_at)
    .bind(conversation.updated_at)
    .bind(&conversation.last_message_id)
    .bind(&conversation.last_message_text)
    .bind(conversation.last_message_timestamp)
    .bind(conversation.unread_count)
    .bind(conversation.is_pinned)
    .bind(conversation.is_muted)
    .bind(&conversation.avatar_url)
    .bind(conversation.last_viewed_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert many conversations. Each row is atomic; the batch is not.
pub async fn insert_conversations(
    pool: &SqlitePool,
    conversations: &[Conversation],
) -> Result<()> {
    for conversation in conversations {
        insert_conversation(pool, conversation).await?;
    }
    Ok(())
}

/// Point lookup by id.
pub async fn get_conversation(pool: &SqlitePool, id: &str) -> Result<Option<Conversation>> {
    let conversation = sqlx::query_as::<_, Conversation>(&format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(conversation)
}

/// All conversations, most recent message first.
pub async fn list_conversations(pool: &SqlitePool) -> Result<Vec<Conversation>> {
    let conversations = sqlx::query_as::<_, Conversation>(&format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations ORDER BY last_message_timestamp DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(conversations)
}

/// Conversations with unread messages, most recent first.
pub async fn list_unread_conversations(pool: &SqlitePool) -> Result<Vec<Conversation>> {
    let conversations = sqlx::query_as::<_, Conversation>(&format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations \
         WHERE unread_count > 0 ORDER BY last_message_timestamp DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(conversations)
}

/// Pinned conversations, most recent first.
pub async fn list_pinned_conversations(pool: &SqlitePool) -> Result<Vec<Conversation>> {
    let conversations = sqlx::query_as::<_, Conversation>(&format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations \
         WHERE is_pinned = 1 ORDER BY last_message_timestamp DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(conversations)
}

/// Refresh the denormalized last-message summary.
pub async fn update_last_message(
    pool: &SqlitePool,
    conversation_id: &str,
    message_id: &str,
    message_text: &str,
    timestamp: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE conversations
        SET last_message_id = ?,
            last_message_text = ?,
            last_message_timestamp = ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(message_id)
    .bind(message_text)
    .bind(timestamp)
    .bind(timestamp)
    .bind(conversation_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Clear the denormalized summary (used when no non-deleted message remains).
pub async fn clear_last_message(pool: &SqlitePool, conversation_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE conversations
        SET last_message_id = NULL,
            last_message_text = NULL,
            last_message_timestamp = NULL
        WHERE id = ?
        "#,
    )
    .bind(conversation_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Set the stored unread counter.
pub async fn update_unread_count(
    pool: &SqlitePool,
    conversation_id: &str,
    count: i64,
) -> Result<()> {
    sqlx::query("UPDATE conversations SET unread_count = ? WHERE id = ?")
        .bind(count)
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Pin or unpin a conversation.
pub async fn update_pinned(pool: &SqlitePool, conversation_id: &str, pinned: bool) -> Result<()> {
    sqlx::query("UPDATE conversations SET is_pinned = ? WHERE id = ?")
        .bind(pinned)
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Mute or unmute a conversation.
pub async fn update_muted(pool: &SqlitePool, conversation_id: &str, muted: bool) -> Result<()> {
    sqlx::query("UPDATE conversations SET is_muted = ? WHERE id = ?")
        .bind(muted)
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Advance `last_viewed_at`. The column only moves forward: an older
/// timestamp than the stored one is ignored.
pub async fn advance_last_viewed(
    pool: &SqlitePool,
    conversation_id: &str,
    timestamp: i64,
) -> Result<()> {
    sqlx::query("UPDATE conversations SET last_viewed_at = MAX(last_viewed_at, ?) WHERE id = ?")
        .bind(timestamp)
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Explicit reset of `last_viewed_at`, the only way to move it backward.
pub async fn reset_last_viewed(pool: &SqlitePool, conversation_id: &str) -> Result<()> {
    sqlx::query("UPDATE conversations SET last_viewed_at = 0 WHERE id = ?")
        .bind(conversation_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete a conversation. Participants and messages cascade.
pub async fn delete_conversation(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM conversations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete every conversation row. Used only by the reset/reseed path.
pub async fn delete_all_conversations(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM conversations").execute(pool).await?;
    Ok(())
}
