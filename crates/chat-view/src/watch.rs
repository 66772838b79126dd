//! Live projections driven by store events.
//!
//! Each watcher subscribes to the repository's change feed, re-derives its
//! projection whenever a relevant event arrives, and publishes the result on
//! a `tokio::sync::watch` channel. Dropping a watcher aborts its task; that
//! is the cancellation story for read subscriptions.

use chat_store::{ChatRepository, CurrentUser, Message, StoreEvent};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::chat_list::{load_chat_list, ChatListItem};
use crate::error::Result;
use crate::unread::{compute_unread, UnreadState};

/// Live view of the conversation list.
pub struct ChatListWatcher {
    rx: watch::Receiver<Vec<ChatListItem>>,
    handle: JoinHandle<()>,
}

impl ChatListWatcher {
    /// Build the initial list, then keep it fresh in a background task.
    ///
    /// The event subscription opens before the initial load so a write that
    /// lands mid-load still triggers a rebuild.
    pub async fn spawn(repo: ChatRepository, viewer: CurrentUser) -> Result<Self> {
        let mut events = repo.subscribe();
        let initial = load_chat_list(&repo, &viewer).await?;
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    // Every scope feeds the list (titles, previews, unread),
                    // so any event triggers a rebuild. A lagged subscriber
                    // just re-queries; no replay needed.
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        match load_chat_list(&repo, &viewer).await {
                            Ok(items) => {
                                if tx.send(items).is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "chat list rebuild failed");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(Self { rx, handle })
    }

    /// Snapshot of the current list.
    pub fn current(&self) -> Vec<ChatListItem> {
        self.rx.borrow().clone()
    }

    /// Wait for the next refresh. Returns `false` once the watcher stopped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl Drop for ChatListWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Derived state for one open conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationSnapshot {
    /// Messages in chronological order, soft-deleted rows excluded.
    pub messages: Vec<Message>,
    pub unread: UnreadState,
}

/// Load the snapshot for one conversation.
pub async fn load_conversation_snapshot(
    repo: &ChatRepository,
    conversation_id: &str,
    viewer: &CurrentUser,
) -> Result<ConversationSnapshot> {
    let last_viewed_at = repo
        .conversation_by_id(conversation_id)
        .await?
        .map(|c| c.last_viewed_at)
        .unwrap_or(0);

    let all = repo.conversation_messages(conversation_id).await?;
    let unread = compute_unread(&all, viewer, last_viewed_at);
    let messages = all.into_iter().filter(|m| !m.is_deleted).collect();

    Ok(ConversationSnapshot { messages, unread })
}

/// Live view of one open conversation.
pub struct ConversationWatcher {
    rx: watch::Receiver<ConversationSnapshot>,
    handle: JoinHandle<()>,
}

impl ConversationWatcher {
    pub async fn spawn(
        repo: ChatRepository,
        conversation_id: String,
        viewer: CurrentUser,
    ) -> Result<Self> {
        let mut events = repo.subscribe();
        let initial = load_conversation_snapshot(&repo, &conversation_id, &viewer).await?;
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            loop {
                let relevant = match events.recv().await {
                    Ok(StoreEvent::Messages { conversation_id: id }) => id == conversation_id,
                    // `last_viewed_at` lives on the conversation row.
                    Ok(StoreEvent::Conversations) => true,
                    Ok(_) => false,
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }

                match load_conversation_snapshot(&repo, &conversation_id, &viewer).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            conversation_id = %conversation_id,
                            error = %err,
                            "conversation rebuild failed"
                        );
                    }
                }
            }
        });

        Ok(Self { rx, handle })
    }

    pub fn current(&self) -> ConversationSnapshot {
        self.rx.borrow().clone()
    }

    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl Drop for ConversationWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_store::{now_ms, Conversation, Participant, ParticipantRole, Store, User};

    async fn test_repo() -> ChatRepository {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.migrate().await.unwrap();
        ChatRepository::new(&store)
    }

    async fn seed_direct_chat(repo: &ChatRepository) {
        let users = ["me", "peer"].map(|id| User {
            id: id.to_string(),
            username: format!("{id}.handle"),
            display_name: id.to_uppercase(),
            avatar_url: None,
            is_online: false,
            last_seen: 0,
            status_message: None,
        });
        repo.insert_users(&users).await.unwrap();

        repo.insert_conversation(&Conversation {
            id: "c1".to_string(),
            title: None,
            is_group: false,
            created_at: 0,
            updated_at: 0,
            last_message_id: None,
            last_message_text: None,
            last_message_timestamp: None,
            unread_count: 0,
            is_pinned: false,
            is_muted: false,
            avatar_url: None,
            last_viewed_at: 0,
        })
        .await
        .unwrap();

        let members = ["me", "peer"].map(|id| Participant {
            conversation_id: "c1".to_string(),
            user_id: id.to_string(),
            joined_at: 0,
            role: ParticipantRole::Member,
            last_read_message_id: None,
            last_read_timestamp: None,
        });
        repo.insert_participants(&members).await.unwrap();
    }

    #[tokio::test]
    async fn chat_list_watcher_sees_new_messages() {
        let repo = test_repo().await;
        seed_direct_chat(&repo).await;

        let mut watcher = ChatListWatcher::spawn(repo.clone(), CurrentUser::new("me"))
            .await
            .unwrap();
        assert_eq!(watcher.current().len(), 1);
        assert!(watcher.current()[0].last_message_timestamp.is_none());

        repo.send_message(&Message::text("m1", "c1", "peer", "hello", now_ms()))
            .await
            .unwrap();

        // One refresh per published event; wait until the summary lands.
        while watcher.current()[0].last_message_timestamp.is_none() {
            assert!(watcher.changed().await);
        }
        let rows = watcher.current();
        assert_eq!(rows[0].preview_text, "hello");
        assert_eq!(rows[0].title, "PEER");
    }

    #[tokio::test]
    async fn conversation_watcher_tracks_unread_and_mark_read() {
        let repo = test_repo().await;
        seed_direct_chat(&repo).await;
        let viewer = CurrentUser::new("me");

        let mut watcher =
            ConversationWatcher::spawn(repo.clone(), "c1".to_string(), viewer.clone())
                .await
                .unwrap();
        assert_eq!(watcher.current().unread, UnreadState::default());

        let sent_at = now_ms();
        repo.send_message(&Message::text("m1", "c1", "peer", "ping", sent_at))
            .await
            .unwrap();
        while watcher.current().unread.count == 0 {
            assert!(watcher.changed().await);
        }
        assert_eq!(
            watcher.current().unread.first_unread_message_id.as_deref(),
            Some("m1")
        );

        repo.mark_conversation_read("c1", sent_at + 1).await.unwrap();
        while watcher.current().unread.count != 0 {
            assert!(watcher.changed().await);
        }
        assert!(watcher.current().unread.first_unread_message_id.is_none());
    }

    #[tokio::test]
    async fn dropping_a_watcher_cancels_its_subscription() {
        let repo = test_repo().await;
        seed_direct_chat(&repo).await;

        let watcher = ChatListWatcher::spawn(repo.clone(), CurrentUser::new("me"))
            .await
            .unwrap();
        drop(watcher);

        // Writers are unaffected by the dropped subscriber.
        repo.send_message(&Message::text("m1", "c1", "peer", "still fine", now_ms()))
            .await
            .unwrap();
    }
}
