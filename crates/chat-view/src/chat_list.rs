//! Conversation-list projection: row models, ordering, filters.

use std::collections::HashMap;

use chat_store::{ChatRepository, Conversation, CurrentUser, Message, User};

use crate::conversation::resolve_title_and_avatar;
use crate::error::Result;
use crate::preview::{classify, PreviewKind};

/// Placeholder preview for a conversation without any message yet.
const EMPTY_PREVIEW: &str = "Start a conversation";

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatListItem {
    pub conversation_id: String,
    pub title: String,
    pub avatar_url: Option<String>,
    pub preview_kind: PreviewKind,
    pub preview_text: String,
    pub last_message_timestamp: Option<i64>,
    pub unread_count: i64,
    pub is_group: bool,
    pub is_pinned: bool,
    pub is_muted: bool,
}

impl ChatListItem {
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}

/// List filter tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatFilter {
    #[default]
    All,
    Unread,
    Favourites,
    Groups,
}

/// Aggregate counters shown alongside the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatListCounts {
    pub total_unread: i64,
    pub groups: usize,
}

/// Build list rows from raw store data. Classification uses the
/// authoritative last-message row where one exists; the denormalized text
/// is only the display string.
pub fn build_chat_list(
    conversations: &[Conversation],
    participants_by_conversation: &HashMap<String, Vec<chat_store::Participant>>,
    users_by_id: &HashMap<String, User>,
    last_message_by_conversation: &HashMap<String, Message>,
    viewer: &CurrentUser,
) -> Vec<ChatListItem> {
    let empty = Vec::new();
    let mut items: Vec<ChatListItem> = conversations
        .iter()
        .map(|conv| {
            let participants = participants_by_conversation
                .get(&conv.id)
                .unwrap_or(&empty);
            let (title, avatar_url) =
                resolve_title_and_avatar(conv, participants, users_by_id, viewer);

            let preview_kind = last_message_by_conversation
                .get(&conv.id)
                .map(classify)
                .unwrap_or(PreviewKind::Text);
            let preview_text = conv
                .last_message_text
                .clone()
                .unwrap_or_else(|| EMPTY_PREVIEW.to_string());

            ChatListItem {
                conversation_id: conv.id.clone(),
                title,
                avatar_url,
                preview_kind,
                preview_text,
                last_message_timestamp: conv.last_message_timestamp,
                unread_count: conv.unread_count,
                is_group: conv.is_group,
                is_pinned: conv.is_pinned,
                is_muted: conv.is_muted,
            }
        })
        .collect();

    order_chat_list(&mut items);
    items
}

/// Order rows pinned-first: pinned rows keep their incoming relative order,
/// the rest sort by last-message timestamp descending. The sort is stable,
/// so equal timestamps preserve their prior relative order.
pub fn order_chat_list(items: &mut Vec<ChatListItem>) {
    let (pinned, mut unpinned): (Vec<ChatListItem>, Vec<ChatListItem>) =
        items.drain(..).partition(|item| item.is_pinned);

    unpinned.sort_by(|a, b| b.last_message_timestamp.cmp(&a.last_message_timestamp));

    items.extend(pinned);
    items.extend(unpinned);
}

/// Apply a filter tab to the full row set.
pub fn filter_chat_list(items: &[ChatListItem], filter: ChatFilter) -> Vec<ChatListItem> {
    items
        .iter()
        .filter(|item| match filter {
            ChatFilter::All => true,
            ChatFilter::Unread => item.has_unread(),
            ChatFilter::Favourites => item.is_pinned,
            ChatFilter::Groups => item.is_group,
        })
        .cloned()
        .collect()
}

/// Aggregate counters over the full row set.
pub fn count_chat_list(items: &[ChatListItem]) -> ChatListCounts {
    ChatListCounts {
        total_unread: items.iter().map(|i| i.unread_count).sum(),
        groups: items.iter().filter(|i| i.is_group).count(),
    }
}

/// Load everything the list needs from the repository and build the rows.
pub async fn load_chat_list(repo: &ChatRepository, viewer: &CurrentUser) -> Result<Vec<ChatListItem>> {
    let conversations = repo.all_conversations().await?;
    let users_by_id: HashMap<String, User> = repo
        .all_users()
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();

    let mut participants_by_conversation = HashMap::new();
    let mut last_message_by_conversation = HashMap::new();
    for conv in &conversations {
        let participants = repo.participants_of(&conv.id).await?;
        participants_by_conversation.insert(conv.id.clone(), participants);

        if let Some(last_id) = conv.last_message_id.as_deref() {
            if let Some(last) = repo.message_by_id(last_id).await? {
                last_message_by_conversation.insert(conv.id.clone(), last);
            }
        }
    }

    Ok(build_chat_list(
        &conversations,
        &participants_by_conversation,
        &users_by_id,
        &last_message_by_conversation,
        viewer,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, timestamp: Option<i64>, pinned: bool) -> ChatListItem {
        ChatListItem {
            conversation_id: id.to_string(),
            title: id.to_string(),
            avatar_url: None,
            preview_kind: PreviewKind::Text,
            preview_text: "hi".to_string(),
            last_message_timestamp: timestamp,
            unread_count: 0,
            is_group: false,
            is_pinned: pinned,
            is_muted: false,
        }
    }

    fn ids(items: &[ChatListItem]) -> Vec<&str> {
        items.iter().map(|i| i.conversation_id.as_str()).collect()
    }

    #[test]
    fn pinned_rows_lead_in_their_existing_order() {
        let mut items = vec![
            item("a", Some(10), false),
            item("p1", Some(5), true),
            item("b", Some(30), false),
            item("p2", Some(50), true),
            item("c", Some(20), false),
        ];

        order_chat_list(&mut items);

        assert_eq!(ids(&items), vec!["p1", "p2", "b", "c", "a"]);
    }

    #[test]
    fn equal_timestamps_keep_prior_relative_order() {
        let mut items = vec![
            item("x", Some(10), false),
            item("y", Some(10), false),
            item("z", Some(10), false),
        ];

        order_chat_list(&mut items);

        assert_eq!(ids(&items), vec!["x", "y", "z"]);
    }

    #[test]
    fn rows_without_messages_sort_last() {
        let mut items = vec![
            item("empty", None, false),
            item("newest", Some(99), false),
            item("older", Some(1), false),
        ];

        order_chat_list(&mut items);

        assert_eq!(ids(&items), vec!["newest", "older", "empty"]);
    }

    #[test]
    fn filters_select_expected_subsets() {
        let mut unread = item("u", Some(10), false);
        unread.unread_count = 3;
        let mut group = item("g", Some(20), false);
        group.is_group = true;
        let pinned = item("p", Some(30), true);
        let items = vec![unread.clone(), group.clone(), pinned.clone()];

        assert_eq!(filter_chat_list(&items, ChatFilter::All).len(), 3);
        assert_eq!(ids(&filter_chat_list(&items, ChatFilter::Unread)), vec!["u"]);
        assert_eq!(
            ids(&filter_chat_list(&items, ChatFilter::Favourites)),
            vec!["p"]
        );
        assert_eq!(ids(&filter_chat_list(&items, ChatFilter::Groups)), vec!["g"]);

        let counts = count_chat_list(&items);
        assert_eq!(counts.total_unread, 3);
        assert_eq!(counts.groups, 1);
    }
}
