//! UI-facing projections over the chat store.
//!
//! This crate derives display state from raw repository data:
//!
//! - [`chat_list`] - conversation-list rows, pinned-first ordering, filters
//! - [`conversation`] - header state, title/avatar resolution, presence
//! - [`preview`] - list-preview classification from the message type
//! - [`unread`] - unread counts and the first-unread pointer
//! - [`watch`] - live projections that re-derive on store events
//!
//! Projections are pure functions where possible; the [`watch`] module wires
//! them to the repository's change feed.

pub mod chat_list;
pub mod conversation;
pub mod error;
pub mod preview;
pub mod unread;
pub mod watch;

pub use chat_list::{
    build_chat_list, count_chat_list, filter_chat_list, load_chat_list, order_chat_list,
    ChatFilter, ChatListCounts, ChatListItem,
};
pub use conversation::{
    format_last_seen, resolve_header, resolve_title_and_avatar, ConversationHeader,
    ParticipantInfo, UNKNOWN_USER,
};
pub use error::{Result, ViewError};
pub use preview::{classify, PreviewKind};
pub use unread::{compute_unread, UnreadState};
pub use watch::{
    load_conversation_snapshot, ChatListWatcher, ConversationSnapshot, ConversationWatcher,
};
