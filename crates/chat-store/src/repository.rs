//! Repository facade over the per-entity query modules.
//!
//! [`ChatRepository`] composes the DAO functions behind one handle, publishes
//! a [`StoreEvent`] after every successful write, and owns the few compound
//! operations the data layer needs: the send path, mark-as-read, full reset,
//! and summary repair.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::events::{ChangeNotifier, StoreEvent};
use crate::models::{Conversation, CurrentUser, Message, MessageType, Participant, User};
use crate::{conversation, message, participant, user, Store};

#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl ChatRepository {
    pub fn new(store: &Store) -> Self {
        Self {
            pool: store.pool().clone(),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a live subscription to store changes. Dropping the receiver
    /// cancels it.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.notifier.subscribe()
    }

    // --- users -----------------------------------------------------------

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        user::insert_user(&self.pool, user).await?;
        self.notifier.publish(StoreEvent::Users);
        Ok(())
    }

    pub async fn insert_users(&self, users: &[User]) -> Result<()> {
        user::insert_users(&self.pool, users).await?;
        self.notifier.publish(StoreEvent::Users);
        Ok(())
    }

    pub async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        user::get_user(&self.pool, id).await
    }

    pub async fn all_users(&self) -> Result<Vec<User>> {
        user::list_users(&self.pool).await
    }

    pub async fn online_users(&self) -> Result<Vec<User>> {
        user::list_online_users(&self.pool).await
    }

    pub async fn count_users(&self) -> Result<i64> {
        user::count_users(&self.pool).await
    }

    pub async fn set_online_status(
        &self,
        user_id: &str,
        is_online: bool,
        last_seen: i64,
    ) -> Result<()> {
        user::set_online_status(&self.pool, user_id, is_online, last_seen).await?;
        self.notifier.publish(StoreEvent::Users);
        Ok(())
    }

    // --- conversations ---------------------------------------------------

    pub async fn insert_conversation(&self, conversation: &Conversation) -> Result<()> {
        conversation::insert_conversation(&self.pool, conversation).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    pub async fn insert_conversations(&self, conversations: &[Conversation]) -> Result<()> {
        conversation::insert_conversations(&self.pool, conversations).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    pub async fn conversation_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        conversation::get_conversation(&self.pool, id).await
    }

    pub async fn all_conversations(&self) -> Result<Vec<Conversation>> {
        conversation::list_conversations(&self.pool).await
    }

    pub async fn unread_conversations(&self) -> Result<Vec<Conversation>> {
        conversation::list_unread_conversations(&self.pool).await
    }

    pub async fn pinned_conversations(&self) -> Result<Vec<Conversation>> {
        conversation::list_pinned_conversations(&self.pool).await
    }

    pub async fn set_pinned(&self, conversation_id: &str, pinned: bool) -> Result<()> {
        conversation::update_pinned(&self.pool, conversation_id, pinned).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    pub async fn set_muted(&self, conversation_id: &str, muted: bool) -> Result<()> {
        conversation::update_muted(&self.pool, conversation_id, muted).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    /// Clear the viewer's unread state: bump `last_viewed_at` (forward-only)
    /// and zero the stored counter. Both changes persist so a reload keeps
    /// the conversation read.
    pub async fn mark_conversation_read(&self, conversation_id: &str, now: i64) -> Result<()> {
        conversation::advance_last_viewed(&self.pool, conversation_id, now).await?;
        conversation::update_unread_count(&self.pool, conversation_id, 0).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    /// Move `last_viewed_at` back to zero, making all incoming messages
    /// unread again.
    pub async fn reset_last_viewed(&self, conversation_id: &str) -> Result<()> {
        conversation::reset_last_viewed(&self.pool, conversation_id).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    pub async fn set_unread_count(&self, conversation_id: &str, count: i64) -> Result<()> {
        conversation::update_unread_count(&self.pool, conversation_id, count).await?;
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    /// Delete a conversation; membership and message rows cascade.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        conversation::delete_conversation(&self.pool, conversation_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        self.notifier.publish(StoreEvent::Participants {
            conversation_id: conversation_id.to_string(),
        });
        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    // --- participants ----------------------------------------------------

    pub async fn insert_participant(&self, participant: &Participant) -> Result<()> {
        participant::insert_participant(&self.pool, participant).await?;
        self.notifier.publish(StoreEvent::Participants {
            conversation_id: participant.conversation_id.clone(),
        });
        Ok(())
    }

    pub async fn insert_participants(&self, participants: &[Participant]) -> Result<()> {
        participant::insert_participants(&self.pool, participants).await?;
        for conversation_id in participants
            .iter()
            .map(|p| p.conversation_id.as_str())
            .collect::<std::collections::BTreeSet<_>>()
        {
            self.notifier.publish(StoreEvent::Participants {
                conversation_id: conversation_id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn participant_by_key(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> Result<Option<Participant>> {
        participant::get_participant(&self.pool, conversation_id, user_id).await
    }

    pub async fn participants_of(&self, conversation_id: &str) -> Result<Vec<Participant>> {
        participant::list_for_conversation(&self.pool, conversation_id).await
    }

    pub async fn conversations_of_user(&self, user_id: &str) -> Result<Vec<Participant>> {
        participant::list_for_user(&self.pool, user_id).await
    }

    pub async fn update_read_position(
        &self,
        conversation_id: &str,
        user_id: &str,
        message_id: &str,
        timestamp: i64,
    ) -> Result<()> {
        participant::update_read_position(&self.pool, conversation_id, user_id, message_id, timestamp)
            .await?;
        self.notifier.publish(StoreEvent::Participants {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    // --- messages --------------------------------------------------------

    pub async fn message_by_id(&self, id: &str) -> Result<Option<Message>> {
        message::get_message(&self.pool, id).await
    }

    pub async fn conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        message::list_for_conversation(&self.pool, conversation_id).await
    }

    pub async fn latest_messages(&self, conversation_id: &str, limit: i64) -> Result<Vec<Message>> {
        message::list_latest(&self.pool, conversation_id, limit).await
    }

    pub async fn messages_before(
        &self,
        conversation_id: &str,
        before: i64,
        limit: i64,
    ) -> Result<Vec<Message>> {
        message::list_before(&self.pool, conversation_id, before, limit).await
    }

    pub async fn search_messages(&self, conversation_id: &str, query: &str) -> Result<Vec<Message>> {
        message::search(&self.pool, conversation_id, query).await
    }

    pub async fn messages_with_type(
        &self,
        conversation_id: &str,
        message_type: MessageType,
    ) -> Result<Vec<Message>> {
        message::list_with_type(&self.pool, conversation_id, message_type).await
    }

    pub async fn replies_to(&self, message_id: &str) -> Result<Vec<Message>> {
        message::list_replies(&self.pool, message_id).await
    }

    pub async fn insert_messages(&self, messages: &[Message]) -> Result<()> {
        message::insert_messages(&self.pool, messages).await?;
        for conversation_id in messages
            .iter()
            .map(|m| m.conversation_id.as_str())
            .collect::<std::collections::BTreeSet<_>>()
        {
            self.notifier.publish(StoreEvent::Messages {
                conversation_id: conversation_id.to_string(),
            });
        }
        Ok(())
    }

    /// Insert a message, then refresh the owning conversation's denormalized
    /// summary.
    ///
    /// Deliberately not transactional: message durability takes precedence
    /// over summary accuracy. If the summary update fails after the insert
    /// succeeded, the message is kept, the error surfaces, and
    /// [`Self::repair_conversation_summary`] reconciles later.
    pub async fn send_message(&self, msg: &Message) -> Result<()> {
        message::insert_message(&self.pool, msg).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: msg.conversation_id.clone(),
        });

        if let Err(err) = conversation::update_last_message(
            &self.pool,
            &msg.conversation_id,
            &msg.id,
            &msg.summary_text(),
            msg.timestamp,
        )
        .await
        {
            tracing::warn!(
                conversation_id = %msg.conversation_id,
                message_id = %msg.id,
                error = %err,
                "message stored but summary update failed, pending repair"
            );
            return Err(err);
        }

        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    pub async fn mark_message_read(&self, conversation_id: &str, message_id: &str) -> Result<()> {
        message::mark_read(&self.pool, message_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    pub async fn mark_message_delivered(
        &self,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<()> {
        message::mark_delivered(&self.pool, message_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    pub async fn mark_all_messages_read(&self, conversation_id: &str) -> Result<()> {
        message::mark_all_read(&self.pool, conversation_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    pub async fn edit_message(
        &self,
        conversation_id: &str,
        message_id: &str,
        new_content: &str,
        edited_at: i64,
    ) -> Result<()> {
        message::edit_message(&self.pool, message_id, new_content, edited_at).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    /// Soft-delete a message. When the deleted row was the conversation's
    /// last message, the summary is rebuilt from the newest surviving one.
    pub async fn soft_delete_message(
        &self,
        conversation_id: &str,
        message_id: &str,
        viewer: &CurrentUser,
    ) -> Result<()> {
        message::soft_delete(&self.pool, message_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });

        let summary_stale = conversation::get_conversation(&self.pool, conversation_id)
            .await?
            .is_some_and(|c| c.last_message_id.as_deref() == Some(message_id));
        if summary_stale {
            self.repair_conversation_summary(conversation_id, viewer).await?;
        }
        Ok(())
    }

    // --- maintenance -----------------------------------------------------

    /// Rebuild one conversation's denormalized summary and unread count
    /// from its message rows. The summary is a cache; this is the repair
    /// pass for any suspected inconsistency.
    pub async fn repair_conversation_summary(
        &self,
        conversation_id: &str,
        viewer: &CurrentUser,
    ) -> Result<()> {
        let Some(conv) = conversation::get_conversation(&self.pool, conversation_id).await? else {
            tracing::debug!(conversation_id, "repair skipped, conversation missing");
            return Ok(());
        };

        match message::latest_visible(&self.pool, conversation_id).await? {
            Some(latest) => {
                conversation::update_last_message(
                    &self.pool,
                    conversation_id,
                    &latest.id,
                    &latest.summary_text(),
                    latest.timestamp,
                )
                .await?;
            }
            None => {
                conversation::clear_last_message(&self.pool, conversation_id).await?;
            }
        }

        let unread = message::count_unread_since(
            &self.pool,
            conversation_id,
            viewer.id(),
            conv.last_viewed_at,
        )
        .await?;
        conversation::update_unread_count(&self.pool, conversation_id, unread).await?;

        self.notifier.publish(StoreEvent::Conversations);
        Ok(())
    }

    /// Repair every conversation. Run at startup as a safety net.
    pub async fn repair_all_summaries(&self, viewer: &CurrentUser) -> Result<()> {
        let conversations = conversation::list_conversations(&self.pool).await?;
        tracing::info!(count = conversations.len(), "repairing conversation summaries");
        for conv in conversations {
            self.repair_conversation_summary(&conv.id, viewer).await?;
        }
        Ok(())
    }

    pub async fn clear_conversation_messages(&self, conversation_id: &str) -> Result<()> {
        message::delete_for_conversation(&self.pool, conversation_id).await?;
        self.notifier.publish(StoreEvent::Messages {
            conversation_id: conversation_id.to_string(),
        });
        Ok(())
    }

    /// Remove every row from every table, dependents first.
    pub async fn clear_all_data(&self) -> Result<()> {
        message::delete_all_messages(&self.pool).await?;
        participant::delete_all_participants(&self.pool).await?;
        conversation::delete_all_conversations(&self.pool).await?;
        user::delete_all_users(&self.pool).await?;
        tracing::info!("cleared all chat data");
        self.notifier.publish(StoreEvent::Conversations);
        self.notifier.publish(StoreEvent::Users);
        Ok(())
    }
}
