//! Conversation membership operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Participant;

const PARTICIPANT_COLUMNS: &str = "conversation_id, user_id, joined_at, role, \
     last_read_message_id, last_read_timestamp";

/// Insert a membership row, replacing any existing row for the same
/// (conversation, user) pair.
pub async fn insert_participant(pool: &SqlitePool, participant: &Participant) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO conversation_participants
            (conversation_id, user_id, joined_at, role,
             last_read_message_id, last_read_timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(conversation_id, user_id) DO UPDATE SET
            joined_at = excluded.joined_at,
            role = excluded.role,
            last_read_message_id = excluded.last_read_message_id,
            last_read_timestamp = excluded.last_read_timestamp
        "#,
    )
    .bind(&participant.conversation_id)
    .bind(&participant.user_id)
    .bind(participant.joined_at)
    .bind(participant.role)
    .bind(&participant.last_read_message_id)
    .bind(participant.last_read_timestamp)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert many membership rows. Each row is atomic; the batch is not.
pub async fn insert_participants(pool: &SqlitePool, participants: &[Participant]) -> Result<()> {
    for participant in participants {
        insert_participant(pool, participant).await?;
    }
    Ok(())
}

/// Point lookup by the composite (conversation, user) key.
pub async fn get_participant(
    pool: &SqlitePool,
    conversation_id: &str,
    user_id: &str,
) -> Result<Option<Participant>> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM conversation_participants \
         WHERE conversation_id = ? AND user_id = ?"
    ))
    .bind(conversation_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(participant)
}

/// All members of a conversation, in join order.
pub async fn list_for_conversation(
    pool: &SqlitePool,
    conversation_id: &str,
) -> Result<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(&format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM conversation_participants \
         WHERE conversation_id = ? ORDER BY joined_at, user_id"
    ))
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

/// All memberships of one user.
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Participant>> {
    let participants = sqlx::query_as::<_, Participant>(&format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM conversation_participants \
         WHERE user_id = ? ORDER BY conversation_id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

/// Record the last message a member has read.
pub async fn update_read_position(
    pool: &SqlitePool,
    conversation_id: &str,
    user_id: &str,
    message_id: &str,
    timestamp: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE conversation_participants
        SET last_read_message_id = ?, last_read_timestamp = ?
        WHERE conversation_id = ? AND user_id = ?
        "#,
    )
    .bind(message_id)
    .bind(timestamp)
    .bind(conversation_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete every membership row. Used only by the reset/reseed path.
pub async fn delete_all_participants(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM conversation_participants")
        .execute(pool)
        .await?;
    Ok(())
}
