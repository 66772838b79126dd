//! Chat data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Stable user id (e.g. "user_17").
    pub id: String,
    /// Unique handle.
    pub username: String,
    /// Name shown in conversation lists and headers.
    pub display_name: String,
    /// Avatar image URL, if any.
    pub avatar_url: Option<String>,
    /// Current presence flag.
    pub is_online: bool,
    /// Last-seen timestamp, epoch milliseconds.
    pub last_seen: i64,
    /// Optional free-form status line.
    pub status_message: Option<String>,
}

/// A chat thread, either 1:1 or group.
///
/// The `last_message_*` columns are a denormalized summary of the newest
/// non-deleted message. Message rows stay authoritative; the summary is a
/// cache that [`crate::repository::ChatRepository::repair_conversation_summary`]
/// can rebuild at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    pub id: String,
    /// Set for group chats; 1:1 chats resolve their title from the other
    /// participant at display time.
    pub title: Option<String>,
    pub is_group: bool,
    /// Creation timestamp, epoch milliseconds.
    pub created_at: i64,
    /// Last mutation timestamp, epoch milliseconds.
    pub updated_at: i64,
    pub last_message_id: Option<String>,
    pub last_message_text: Option<String>,
    pub last_message_timestamp: Option<i64>,
    pub unread_count: i64,
    pub is_pinned: bool,
    pub is_muted: bool,
    /// Group avatar URL, if any.
    pub avatar_url: Option<String>,
    /// When the user last viewed this conversation. Moves only forward,
    /// except through an explicit reset.
    pub last_viewed_at: i64,
}

/// Membership role inside a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Admin,
    Moderator,
    Member,
}

/// A membership row linking a user to a conversation.
///
/// The (conversation_id, user_id) pair is the primary key; either parent
/// cascade-deletes its membership rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub conversation_id: String,
    pub user_id: String,
    /// Join timestamp, epoch milliseconds.
    pub joined_at: i64,
    pub role: ParticipantRole,
    pub last_read_message_id: Option<String>,
    pub last_read_timestamp: Option<i64>,
}

/// Kind of a message, stored alongside the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Image,
    Video,
    Audio,
    File,
    Link,
    Location,
    Sticker,
    Gif,
    VoiceNote,
    /// Notices like "User joined" or call records.
    System,
}

/// Delivery status of a message.
///
/// Not persisted: derived from the `is_delivered`/`is_read` flags via
/// [`Message::status`]. `Sent` is the pre-persist state of a message that
/// has not yet been acknowledged by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
    Failed,
}

/// A single message row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    /// Send timestamp, epoch milliseconds. Orders messages within a
    /// conversation.
    pub timestamp: i64,
    pub message_type: MessageType,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_name: Option<String>,
    /// Attachment size in bytes.
    pub file_size: Option<i64>,
    /// Audio/video duration in seconds.
    pub duration_secs: Option<i64>,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub link_description: Option<String>,
    pub link_image_url: Option<String>,
    pub is_read: bool,
    pub is_delivered: bool,
    pub is_edited: bool,
    pub edited_at: Option<i64>,
    pub reply_to_message_id: Option<String>,
    /// Soft-delete flag. Deleted rows persist but are excluded from unread
    /// counts and last-message summaries.
    pub is_deleted: bool,
    /// Serialized reaction payload (JSON), if any.
    pub reactions: Option<String>,
}

impl Message {
    /// Create a plain text message with default flags.
    pub fn text(
        id: impl Into<String>,
        conversation_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_id: conversation_id.into(),
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp,
            message_type: MessageType::Text,
            media_url: None,
            thumbnail_url: None,
            file_name: None,
            file_size: None,
            duration_secs: None,
            link_url: None,
            link_title: None,
            link_description: None,
            link_image_url: None,
            is_read: false,
            is_delivered: true,
            is_edited: false,
            edited_at: None,
            reply_to_message_id: None,
            is_deleted: false,
            reactions: None,
        }
    }

    /// Set the message type, leaving everything else untouched.
    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    /// Status derived from the delivery flags.
    ///
    /// Not-delivered maps to `Failed`; a delivered message is `Read` once
    /// the read flag is set, `Delivered` otherwise.
    pub fn status(&self) -> MessageStatus {
        if !self.is_delivered {
            MessageStatus::Failed
        } else if self.is_read {
            MessageStatus::Read
        } else {
            MessageStatus::Delivered
        }
    }

    /// One-line summary used for the conversation's denormalized
    /// `last_message_text`, derived from the message type and metadata.
    pub fn summary_text(&self) -> String {
        match self.message_type {
            MessageType::Image => "📷 Photo".to_string(),
            MessageType::Video => "📹 Video".to_string(),
            MessageType::Audio => "🎵 Audio".to_string(),
            MessageType::File => {
                format!("📎 {}", self.file_name.as_deref().unwrap_or("File"))
            }
            MessageType::Link => {
                format!("🔗 {}", self.link_title.as_deref().unwrap_or("Link"))
            }
            MessageType::Location => self.content.clone(),
            MessageType::Sticker => "Sticker".to_string(),
            MessageType::Gif => "GIF".to_string(),
            MessageType::VoiceNote => "🎤 Voice message".to_string(),
            MessageType::System | MessageType::Text => self.content.clone(),
        }
    }
}

/// The authenticated user on whose behalf queries run.
///
/// Threaded explicitly through generator and view-state calls; there is no
/// global current-user constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(String);

impl CurrentUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_derivation_follows_flag_chain() {
        let mut msg = Message::text("m1", "c1", "u1", "hi", 10);
        msg.is_delivered = false;
        assert_eq!(msg.status(), MessageStatus::Failed);

        msg.is_delivered = true;
        msg.is_read = false;
        assert_eq!(msg.status(), MessageStatus::Delivered);

        msg.is_read = true;
        assert_eq!(msg.status(), MessageStatus::Read);
    }

    #[test]
    fn summary_text_uses_type_and_metadata() {
        let text = Message::text("m1", "c1", "u1", "see you soon", 10);
        assert_eq!(text.summary_text(), "see you soon");

        let mut file = Message::text("m2", "c1", "u1", "sending the deck", 11)
            .with_type(MessageType::File);
        file.file_name = Some("slides.pptx".to_string());
        assert_eq!(file.summary_text(), "📎 slides.pptx");

        let mut link = Message::text("m3", "c1", "u1", "worth a read", 12)
            .with_type(MessageType::Link);
        link.link_title = Some("Release notes".to_string());
        assert_eq!(link.summary_text(), "🔗 Release notes");

        let photo = Message::text("m4", "c1", "u1", "", 13).with_type(MessageType::Image);
        assert_eq!(photo.summary_text(), "📷 Photo");
    }
}
