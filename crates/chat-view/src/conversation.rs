//! Header state for an open conversation: resolved title and avatar,
//! participant directory for group chats, presence line for 1:1 chats.

use std::collections::HashMap;

use chat_store::{Conversation, CurrentUser, Participant, User};

/// Placeholder shown when the other participant's user record is missing.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Display info for one group member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Everything the conversation header needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationHeader {
    pub title: String,
    pub avatar_url: Option<String>,
    pub is_group: bool,
    /// Sender directory for group chats, keyed by user id.
    pub participants: HashMap<String, ParticipantInfo>,
    /// "last seen ..." line for 1:1 chats with an offline peer.
    pub presence: Option<String>,
}

/// Resolve the display title and avatar for a conversation.
///
/// Group chats use their explicit title and avatar. 1:1 chats take both
/// from the sole other participant; a missing membership or user record
/// degrades to [`UNKNOWN_USER`] rather than failing.
pub fn resolve_title_and_avatar(
    conversation: &Conversation,
    participants: &[Participant],
    users_by_id: &HashMap<String, User>,
    viewer: &CurrentUser,
) -> (String, Option<String>) {
    if let Some(title) = conversation.title.as_ref().filter(|t| !t.is_empty()) {
        return (title.clone(), conversation.avatar_url.clone());
    }

    let other = participants
        .iter()
        .find(|p| p.user_id != viewer.id())
        .and_then(|p| users_by_id.get(&p.user_id));

    match other {
        Some(user) => (user.display_name.clone(), user.avatar_url.clone()),
        None => (UNKNOWN_USER.to_string(), conversation.avatar_url.clone()),
    }
}

/// Build the header for an open conversation.
pub fn resolve_header(
    conversation: &Conversation,
    participants: &[Participant],
    users_by_id: &HashMap<String, User>,
    viewer: &CurrentUser,
    now: i64,
) -> ConversationHeader {
    let (title, avatar_url) =
        resolve_title_and_avatar(conversation, participants, users_by_id, viewer);

    if conversation.is_group {
        let directory = participants
            .iter()
            .filter_map(|p| {
                users_by_id.get(&p.user_id).map(|user| {
                    (
                        p.user_id.clone(),
                        ParticipantInfo {
                            user_id: p.user_id.clone(),
                            display_name: user.display_name.clone(),
                            avatar_url: user.avatar_url.clone(),
                        },
                    )
                })
            })
            .collect();

        ConversationHeader {
            title,
            avatar_url,
            is_group: true,
            participants: directory,
            presence: None,
        }
    } else {
        let presence = participants
            .iter()
            .find(|p| p.user_id != viewer.id())
            .and_then(|p| users_by_id.get(&p.user_id))
            .map(|user| {
                if user.is_online {
                    "online".to_string()
                } else {
                    format_last_seen(user.last_seen, now)
                }
            });

        ConversationHeader {
            title,
            avatar_url,
            is_group: false,
            participants: HashMap::new(),
            presence,
        }
    }
}

/// Human-readable "last seen" line.
pub fn format_last_seen(last_seen: i64, now: i64) -> String {
    let diff = now.saturating_sub(last_seen);
    let minutes = diff / (1000 * 60);
    let hours = diff / (1000 * 60 * 60);
    let days = diff / (1000 * 60 * 60 * 24);

    if minutes < 1 {
        "last seen just now".to_string()
    } else if minutes < 60 {
        format!(
            "last seen {} {} ago",
            minutes,
            if minutes == 1 { "minute" } else { "minutes" }
        )
    } else if hours < 24 {
        format!(
            "last seen {} {} ago",
            hours,
            if hours == 1 { "hour" } else { "hours" }
        )
    } else if days < 7 {
        format!(
            "last seen {} {} ago",
            days,
            if days == 1 { "day" } else { "days" }
        )
    } else {
        "last seen recently".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_store::ParticipantRole;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            username: format!("{id}.handle"),
            display_name: name.to_string(),
            avatar_url: Some(format!("https://example.com/{id}.png")),
            is_online: false,
            last_seen: 0,
            status_message: None,
        }
    }

    fn member(conversation_id: &str, user_id: &str) -> Participant {
        Participant {
            conversation_id: conversation_id.to_string(),
            user_id: user_id.to_string(),
            joined_at: 0,
            role: ParticipantRole::Member,
            last_read_message_id: None,
            last_read_timestamp: None,
        }
    }

    fn direct_conversation(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
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
        }
    }

    #[test]
    fn group_title_wins_over_participants() {
        let mut conv = direct_conversation("c1");
        conv.is_group = true;
        conv.title = Some("Weekend Hikers".to_string());
        conv.avatar_url = Some("https://example.com/group.png".to_string());

        let users: HashMap<String, User> =
            [("u2".to_string(), user("u2", "Maya Chen"))].into();
        let participants = vec![member("c1", "u1"), member("c1", "u2")];

        let (title, avatar) = resolve_title_and_avatar(
            &conv,
            &participants,
            &users,
            &CurrentUser::new("u1"),
        );
        assert_eq!(title, "Weekend Hikers");
        assert_eq!(avatar.as_deref(), Some("https://example.com/group.png"));
    }

    #[test]
    fn direct_chat_resolves_other_participant() {
        let conv = direct_conversation("c1");
        let users: HashMap<String, User> =
            [("u2".to_string(), user("u2", "Maya Chen"))].into();
        let participants = vec![member("c1", "u1"), member("c1", "u2")];

        let (title, avatar) = resolve_title_and_avatar(
            &conv,
            &participants,
            &users,
            &CurrentUser::new("u1"),
        );
        assert_eq!(title, "Maya Chen");
        assert_eq!(avatar.as_deref(), Some("https://example.com/u2.png"));
    }

    #[test]
    fn missing_participant_record_degrades_to_placeholder() {
        let conv = direct_conversation("c1");
        // User record for u2 absent from the directory.
        let users: HashMap<String, User> = HashMap::new();
        let participants = vec![member("c1", "u1"), member("c1", "u2")];

        let (title, _) = resolve_title_and_avatar(
            &conv,
            &participants,
            &users,
            &CurrentUser::new("u1"),
        );
        assert_eq!(title, UNKNOWN_USER);
    }

    #[test]
    fn last_seen_formatting_buckets() {
        let now = 1_000_000_000;
        assert_eq!(format_last_seen(now - 30_000, now), "last seen just now");
        assert_eq!(
            format_last_seen(now - 60_000, now),
            "last seen 1 minute ago"
        );
        assert_eq!(
            format_last_seen(now - 5 * 60_000, now),
            "last seen 5 minutes ago"
        );
        assert_eq!(
            format_last_seen(now - 3 * 3_600_000, now),
            "last seen 3 hours ago"
        );
        assert_eq!(
            format_last_seen(now - 2 * 86_400_000, now),
            "last seen 2 days ago"
        );
        assert_eq!(
            format_last_seen(now - 30 * 86_400_000, now),
            "last seen recently"
        );
    }
}
