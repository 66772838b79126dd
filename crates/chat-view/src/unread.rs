//! Unread-state computation for an open conversation.

use chat_store::{CurrentUser, Message};

/// Derived unread state for one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnreadState {
    /// Number of unread incoming messages.
    pub count: usize,
    /// The chronologically earliest unread message, where the view should
    /// place its "new messages" divider.
    pub first_unread_message_id: Option<String>,
}

/// Compute the unread set: messages from other senders, newer than
/// `last_viewed_at`, not soft-deleted.
///
/// The input does not need to be pre-sorted; messages are ordered by
/// timestamp before the first unread is picked.
pub fn compute_unread(
    messages: &[Message],
    viewer: &CurrentUser,
    last_viewed_at: i64,
) -> UnreadState {
    let mut unread: Vec<&Message> = messages
        .iter()
        .filter(|m| {
            m.sender_id != viewer.id() && m.timestamp > last_viewed_at && !m.is_deleted
        })
        .collect();
    unread.sort_by_key(|m| m.timestamp);

    UnreadState {
        count: unread.len(),
        first_unread_message_id: unread.first().map(|m| m.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, sender: &str, timestamp: i64) -> Message {
        Message::text(id, "c1", sender, "body", timestamp)
    }

    #[test]
    fn unread_excludes_own_and_already_viewed_messages() {
        let viewer = CurrentUser::new("me");
        let messages = vec![msg("m1", "a", 10), msg("m2", "me", 20), msg("m3", "a", 30)];

        let state = compute_unread(&messages, &viewer, 15);

        assert_eq!(state.count, 1);
        assert_eq!(state.first_unread_message_id.as_deref(), Some("m3"));
    }

    #[test]
    fn empty_unread_set_resets_both_fields() {
        let viewer = CurrentUser::new("me");
        let messages = vec![msg("m1", "a", 10), msg("m2", "a", 12)];

        let state = compute_unread(&messages, &viewer, 50);

        assert_eq!(state, UnreadState::default());
    }

    #[test]
    fn first_unread_is_chronologically_earliest() {
        let viewer = CurrentUser::new("me");
        // Deliberately out of order.
        let messages = vec![msg("m3", "a", 30), msg("m2", "a", 20), msg("m4", "a", 40)];

        let state = compute_unread(&messages, &viewer, 15);

        assert_eq!(state.count, 3);
        assert_eq!(state.first_unread_message_id.as_deref(), Some("m2"));
    }

    #[test]
    fn soft_deleted_messages_never_count() {
        let viewer = CurrentUser::new("me");
        let mut latest = msg("m2", "a", 40);
        latest.is_deleted = true;
        let messages = vec![msg("m1", "a", 30), latest];

        let state = compute_unread(&messages, &viewer, 15);

        assert_eq!(state.count, 1);
        assert_eq!(state.first_unread_message_id.as_deref(), Some("m1"));
    }
}
