//! Message query operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Message, MessageType};

const MESSAGE_COLUMNS: &str = "id, conversation_id, sender_id, content, timestamp, \
     message_type, media_url, thumbnail_url, file_name, file_size, duration_secs, \
     link_url, link_title, link_description, link_image_url, \
     is_read, is_delivered, is_edited, edited_at, reply_to_message_id, is_deleted, reactions";

/// Insert a message, replacing any existing row with the same id.
pub async fn insert_message(pool: &SqlitePool, message: &Message) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO messages
            (id, conversation_id, sender_id, content, timestamp,
             message_type, media_url, thumbnail_url, file_name, file_size, duration_secs,
             link_url, link_title, link_description, link_image_url,
             is_read, is_delivered, is_edited, edited_at, reply_to_message_id,
             is_deleted, reactions)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            conversation_id = excluded.conversation_id,
            sender_id = excluded.sender_id,
            content = excluded.content,
            timestamp = excluded.timestamp,
            message_type = excluded.message_type,
            media_url = excluded.media_url,
            thumbnail_url = excluded.thumbnail_url,
            file_name = excluded.file_name,
            file_size = excluded.file_size,
            duration_secs = excluded.duration_secs,
            link_url = excluded.link_url,
            link_title = excluded.link_title,
            link_description = excluded.link_description,
            link_image_url = excluded.link_image_url,
            is_read = excluded.is_read,
            is_delivered = excluded.is_delivered,
            is_edited = excluded.is_edited,
            edited_at = excluded.edited_at,
            reply_to_message_id = excluded.reply_to_message_id,
            is_deleted = excluded.is_deleted,
            reactions = excluded.reactions
        "#,
    )
    .bind(&message.id)
    .bind(&message.conversation_id)
    .bind(&message.sender_id)
    .bind(&message.content)
    .bind(message.timestamp)
    .bind(message.message_type)
    .bind(&message.media_url)
    .bind(&message.thumbnail_url)
    .bind(&message.file_name)
    .bind(message.file_size)
    .bind(message.duration_secs)
    .bind(&message.link_url)
    .bind(&message.link_title)
    .bind(&message.link_description)
    .bind(&message.link_image_url)
    .bind(message.is_read)
    .bind(message.is_delivered)
    .bind(message.is_edited)
    .bind(message.edited_at)
    .bind(&message.reply_to_message_id)
    .bind(message.is_deleted)
    .bind(&message.reactions)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert many messages. Each row is atomic; the batch is not.
pub async fn insert_messages(pool: &SqlitePool, messages: &[Message]) -> Result<()> {
    for message in messages {
        insert_message(pool, message).await?;
    }
    Ok(())
}

/// Point lookup by id.
pub async fn get_message(pool: &SqlitePool, id: &str) -> Result<Option<Message>> {
    let message = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

/// All messages of a conversation in chronological order, soft-deleted rows
/// included. Display layers decide what to hide.
pub async fn list_for_conversation(
    pool: &SqlitePool,
    conversation_id: &str,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? ORDER BY timestamp ASC"
    ))
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// The newest `limit` messages of a conversation, newest first.
pub async fn list_latest(
    pool: &SqlitePool,
    conversation_id: &str,
    limit: i64,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? ORDER BY timestamp DESC LIMIT ?"
    ))
    .bind(conversation_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Up to `limit` messages strictly older than `before`, newest first.
/// Pagination path for scrolling back through history.
pub async fn list_before(
    pool: &SqlitePool,
    conversation_id: &str,
    before: i64,
    limit: i64,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? AND timestamp < ? \
         ORDER BY timestamp DESC LIMIT ?"
    ))
    .bind(conversation_id)
    .bind(before)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Substring search over message content, newest first. Matching follows
/// SQLite `LIKE '%term%'`: case-insensitive for ASCII.
pub async fn search(
    pool: &SqlitePool,
    conversation_id: &str,
    query: &str,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? AND content LIKE '%' || ? || '%' \
         ORDER BY timestamp DESC"
    ))
    .bind(conversation_id)
    .bind(query)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Messages of one type within a conversation, chronological order.
pub async fn list_with_type(
    pool: &SqlitePool,
    conversation_id: &str,
    message_type: MessageType,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? AND message_type = ? ORDER BY timestamp ASC"
    ))
    .bind(conversation_id)
    .bind(message_type)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Replies referencing the given message.
pub async fn list_replies(pool: &SqlitePool, message_id: &str) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE reply_to_message_id = ? ORDER BY timestamp ASC"
    ))
    .bind(message_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// The newest non-deleted message of a conversation, if any. Source of
/// truth for rebuilding the denormalized conversation summary.
pub async fn latest_visible(
    pool: &SqlitePool,
    conversation_id: &str,
) -> Result<Option<Message>> {
    let message = sqlx::query_as::<_, Message>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages \
         WHERE conversation_id = ? AND is_deleted = 0 \
         ORDER BY timestamp DESC LIMIT 1"
    ))
    .bind(conversation_id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

/// Count messages that are unread from the viewer's perspective: sent by
/// someone else, newer than `last_viewed_at`, and not soft-deleted.
pub async fn count_unread_since(
    pool: &SqlitePool,
    conversation_id: &str,
    viewer_id: &str,
    last_viewed_at: i64,
) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM messages
        WHERE conversation_id = ?
          AND sender_id != ?
          AND timestamp > ?
          AND is_deleted = 0
        "#,
    )
    .bind(conversation_id)
    .bind(viewer_id)
    .bind(last_viewed_at)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Flag a single message as read.
pub async fn mark_read(pool: &SqlitePool, message_id: &str) -> Result<()> {
    sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ?")
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Flag a single message as delivered.
pub async fn mark_delivered(pool: &SqlitePool, message_id: &str) -> Result<()> {
    sqlx::query("UPDATE messages SET is_delivered = 1 WHERE id = ?")
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Flag every message in a conversation as read.
pub async fn mark_all_read(pool: &SqlitePool, conversation_id: &str) -> Result<()> {
    sqlx::query("UPDATE messages SET is_read = 1 WHERE conversation_id = ?")
        .bind(conversation_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Replace content and record the edit.
pub async fn edit_message(
    pool: &SqlitePool,
    message_id: &str,
    new_content: &str,
    edited_at: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE messages
        SET content = ?, is_edited = 1, edited_at = ?
        WHERE id = ?
        "#,
    )
    .bind(new_content)
    .bind(edited_at)
    .bind(message_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Soft-delete a message. The row persists but drops out of unread counts
/// and last-message summaries.
pub async fn soft_delete(pool: &SqlitePool, message_id: &str) -> Result<()> {
    sqlx::query("UPDATE messages SET is_deleted = 1 WHERE id = ?")
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete all messages of one conversation.
pub async fn delete_for_conversation(pool: &SqlitePool, conversation_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM messages WHERE conversation_id = ?")
        .bind(conversation_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every message row. Used only by the reset/reseed path.
pub async fn delete_all_messages(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM messages").execute(pool).await?;
    Ok(())
}
