//! Dataset generation.
//!
//! Structure is deterministic given the same [`SeedConfig`]: user counts,
//! conversation shapes, membership, and timestamp layout all derive from
//! indices. Only the surface text varies with the seeded RNG, so tests
//! assert structural invariants rather than literal content.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

use chat_store::{
    Conversation, CurrentUser, Message, MessageType, Participant, ParticipantRole, User,
};

use crate::pools;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
/// Spacing between consecutive regular messages.
const MESSAGE_STEP_MS: i64 = 5 * MINUTE_MS;

/// Target shape of the generated dataset.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub users: usize,
    pub conversations: usize,
    pub messages_per_conversation: usize,
    /// The designated viewer; participates in every generated conversation.
    pub current_user: CurrentUser,
    /// Seed for content selection. Changing it varies text, not structure.
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 100,
            conversations: 50,
            messages_per_conversation: 30,
            current_user: CurrentUser::new("user_1"),
            rng_seed: 7,
        }
    }
}

/// Everything one seeding run produces. `conversations` carries the
/// pre-reconciliation rows; [`reconcile`] derives the final summaries.
#[derive(Debug, Clone)]
pub struct SeedDataset {
    pub users: Vec<User>,
    pub conversations: Vec<Conversation>,
    pub participants: Vec<Participant>,
    pub messages: Vec<Message>,
}

/// Generate the full dataset (users, conversations, membership, messages).
pub fn generate_dataset(config: &SeedConfig, now: i64) -> SeedDataset {
    let mut rng = StdRng::seed_from_u64(config.rng_seed);

    let users = generate_users(config, now);
    let conversations = generate_conversations(config, now);
    let participants = generate_participants(&conversations, &users, config);
    let messages = generate_messages(&conversations, &participants, config, &mut rng);

    SeedDataset {
        users,
        conversations,
        participants,
        messages,
    }
}

/// Generate `config.users` user rows with index-driven structure.
pub fn generate_users(config: &SeedConfig, now: i64) -> Vec<User> {
    (1..=config.users)
        .map(|i| {
            let first = pools::FIRST_NAMES[i % pools::FIRST_NAMES.len()];
            let last = pools::LAST_NAMES[i % pools::LAST_NAMES.len()];
            let is_online = i % 3 == 0;

            User {
                id: format!("user_{i}"),
                username: format!(
                    "{}.{}{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    100 + i
                ),
                display_name: format!("{first} {last}"),
                avatar_url: Some(pools::AVATAR_URLS[i % pools::AVATAR_URLS.len()].to_string()),
                is_online,
                last_seen: if is_online { now } else { now - HOUR_MS * i as i64 },
                status_message: pools::STATUS_MESSAGES[i % pools::STATUS_MESSAGES.len()]
                    .map(str::to_string),
            }
        })
        .collect()
}

/// Generate conversation rows: every 3rd is a group, a few carry a
/// `last_viewed_at` placed to guarantee unread messages, every 9th is
/// pinned and every 10th muted.
pub fn generate_conversations(config: &SeedConfig, now: i64) -> Vec<Conversation> {
    let mut used_titles: HashSet<String> = HashSet::new();

    (1..=config.conversations)
        .map(|i| {
            let is_group = i % 3 == 0;

            let title = is_group.then(|| {
                let base = pools::GROUP_NAMES[(i / 3) % pools::GROUP_NAMES.len()];
                let mut candidate = base.to_string();
                let mut suffix = 1;
                while !used_titles.insert(candidate.clone()) {
                    suffix += 1;
                    candidate = format!("{base} {suffix}");
                }
                candidate
            });

            Conversation {
                id: format!("conv_{i}"),
                title,
                is_group,
                created_at: now - 2 * HOUR_MS,
                updated_at: now - MINUTE_MS * i as i64,
                last_message_id: None,
                last_message_text: None,
                last_message_timestamp: None,
                unread_count: 0,
                is_pinned: i % 9 == 0,
                is_muted: i % 10 == 0,
                avatar_url: is_group
                    .then(|| pools::AVATAR_URLS[(i * 3) % pools::AVATAR_URLS.len()].to_string()),
                last_viewed_at: last_viewed_for(i, now),
            }
        })
        .collect()
}

/// Membership: the current user joins every conversation; groups take 2-7
/// additional members rotating through the remaining users, 1:1 chats take
/// exactly one.
pub fn generate_participants(
    conversations: &[Conversation],
    users: &[User],
    config: &SeedConfig,
) -> Vec<Participant> {
    let current = config.current_user.id();
    let available: Vec<&User> = users.iter().filter(|u| u.id != current).collect();
    let mut participants = Vec::new();

    for (index, conv) in conversations.iter().enumerate() {
        let i = index + 1;

        participants.push(Participant {
            conversation_id: conv.id.clone(),
            user_id: current.to_string(),
            joined_at: conv.created_at,
            role: if i % 3 == 0 {
                ParticipantRole::Admin
            } else {
                ParticipantRole::Member
            },
            last_read_message_id: None,
            last_read_timestamp: None,
        });

        if available.is_empty() {
            continue;
        }

        if conv.is_group {
            let count = (2 + i % 6).min(available.len());
            let start = i % available.len();
            for (pos, user) in available.iter().cycle().skip(start).take(count).enumerate() {
                participants.push(Participant {
                    conversation_id: conv.id.clone(),
                    user_id: user.id.clone(),
                    joined_at: conv.created_at + HOUR_MS * (pos as i64 + 1),
                    role: match pos {
                        0 => ParticipantRole::Admin,
                        1 => ParticipantRole::Moderator,
                        _ => ParticipantRole::Member,
                    },
                    last_read_message_id: None,
                    last_read_timestamp: None,
                });
            }
        } else {
            let other = available[(i - 1) % available.len()];
            participants.push(Participant {
                conversation_id: conv.id.clone(),
                user_id: other.id.clone(),
                joined_at: conv.created_at,
                role: ParticipantRole::Member,
                last_read_message_id: None,
                last_read_timestamp: None,
            });
        }
    }

    participants
}

/// Messages with monotonically increasing timestamps per conversation.
///
/// Conversations with a guaranteed-unread quota get their regular flow
/// placed entirely before `last_viewed_at` and an unread tail from other
/// senders after it.
pub fn generate_messages(
    conversations: &[Conversation],
    participants: &[Participant],
    config: &SeedConfig,
    rng: &mut StdRng,
) -> Vec<Message> {
    let current = config.current_user.id();
    let mut messages = Vec::new();

    for (index, conv) in conversations.iter().enumerate() {
        let i = index + 1;
        let others: Vec<&str> = participants
            .iter()
            .filter(|p| p.conversation_id == conv.id && p.user_id != current)
            .map(|p| p.user_id.as_str())
            .collect();
        if others.is_empty() {
            continue;
        }

        let unread_tail = guaranteed_unread(i).min(config.messages_per_conversation);
        let regular_count = config.messages_per_conversation - unread_tail;

        // Regular flow ends before last_viewed_at when an unread tail
        // follows, otherwise at the conversation's recency tier.
        let newest_regular = if unread_tail > 0 {
            conv.last_viewed_at - MESSAGE_STEP_MS
        } else {
            conv.updated_at
        };

        let mut prev_id: Option<String> = None;
        for k in 1..=regular_count {
            let timestamp = newest_regular - ((regular_count - k) as i64) * MESSAGE_STEP_MS;
            let sender = if k % 2 == 0 {
                current
            } else {
                others[(k / 2) % others.len()]
            };

            let mut msg = Message::text(
                Uuid::new_v4().to_string(),
                conv.id.clone(),
                sender,
                pick_content(rng, k),
                timestamp,
            );
            msg.is_read = true;
            decorate_message(&mut msg, k, rng);
            if k > 1 && k % 8 == 0 {
                msg.reply_to_message_id = prev_id.clone();
            }

            prev_id = Some(msg.id.clone());
            messages.push(msg);
        }

        for j in 1..=unread_tail {
            let mut msg = Message::text(
                Uuid::new_v4().to_string(),
                conv.id.clone(),
                others[j % others.len()],
                pick_content(rng, j),
                conv.last_viewed_at + j as i64 * MINUTE_MS,
            );
            msg.is_read = false;
            messages.push(msg);
        }
    }

    messages
}

/// Recompute each conversation's denormalized summary and unread count from
/// the generated messages. Soft-deleted messages are excluded from both.
pub fn reconcile(
    conversations: &[Conversation],
    messages: &[Message],
    current_user: &CurrentUser,
) -> Vec<Conversation> {
    conversations
        .iter()
        .map(|conv| {
            let visible: Vec<&Message> = messages
                .iter()
                .filter(|m| m.conversation_id == conv.id && !m.is_deleted)
                .collect();

            let unread = visible
                .iter()
                .filter(|m| {
                    m.sender_id != current_user.id() && m.timestamp > conv.last_viewed_at
                })
                .count() as i64;

            let mut updated = conv.clone();
            updated.unread_count = unread;
            if let Some(last) = visible.iter().max_by_key(|m| m.timestamp) {
                updated.last_message_id = Some(last.id.clone());
                updated.last_message_text = Some(last.summary_text());
                updated.last_message_timestamp = Some(last.timestamp);
                updated.updated_at = last.timestamp;
            }
            updated
        })
        .collect()
}

/// How many unread messages specific conversations are guaranteed to carry.
/// Keeps the top of the seeded list visibly "live".
fn guaranteed_unread(index: usize) -> usize {
    match index {
        1 => 2,
        2 => 5,
        3 => 15,
        7 => 1,
        12 => 3,
        _ => 0,
    }
}

fn last_viewed_for(index: usize, now: i64) -> i64 {
    match index {
        1 => now - 2 * MINUTE_MS,
        2 => now - 5 * MINUTE_MS,
        3 => now - 15 * MINUTE_MS,
        7 => now - MINUTE_MS,
        12 => now - 3 * MINUTE_MS,
        _ => now - 30_000 * index as i64,
    }
}

fn pick_content(rng: &mut StdRng, k: usize) -> String {
    let pool = match k % 7 {
        0 => pools::LONG_MESSAGES,
        1 | 4 => pools::SHORT_MESSAGES,
        _ => pools::MEDIUM_MESSAGES,
    };
    pool.choose(rng).expect("pool is non-empty").to_string()
}

/// Turn some regular messages into media/file/link/voice-note entries so
/// the full type set shows up in seeded data.
fn decorate_message(msg: &mut Message, k: usize, rng: &mut StdRng) {
    if k % 19 == 0 {
        msg.message_type = MessageType::VoiceNote;
        msg.duration_secs = Some(5 + (k % 50) as i64);
    } else if k % 17 == 0 {
        msg.message_type = MessageType::Link;
        msg.link_url = Some("https://example.com/articles/latest".to_string());
        msg.link_title = Some(
            pools::LINK_TITLES
                .choose(rng)
                .expect("pool is non-empty")
                .to_string(),
        );
        msg.link_description = Some(
            pools::LINK_DESCRIPTIONS
                .choose(rng)
                .expect("pool is non-empty")
                .to_string(),
        );
    } else if k % 13 == 0 {
        msg.message_type = MessageType::File;
        msg.file_name = Some(
            pools::FILE_NAMES
                .choose(rng)
                .expect("pool is non-empty")
                .to_string(),
        );
        msg.file_size = Some(10_000 + (k * 997) as i64);
    } else if k % 11 == 0 {
        msg.message_type = MessageType::Image;
        msg.media_url = Some(format!("https://example.com/media/{}.jpg", msg.id));
        msg.thumbnail_url = Some(format!("https://example.com/media/{}_thumb.jpg", msg.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn small_config() -> SeedConfig {
        SeedConfig {
            users: 30,
            conversations: 12,
            messages_per_conversation: 20,
            ..SeedConfig::default()
        }
    }

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn generates_requested_user_count_with_unique_ids() {
        let config = SeedConfig::default();
        let users = generate_users(&config, NOW);

        assert_eq!(users.len(), 100);
        let ids: HashSet<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.contains("user_1"));
        assert!(users.iter().any(|u| u.is_online));
        assert!(users.iter().any(|u| !u.is_online));
    }

    #[test]
    fn every_conversation_has_current_user_and_a_second_participant() {
        let config = small_config();
        let dataset = generate_dataset(&config, NOW);

        for conv in &dataset.conversations {
            let members: Vec<&Participant> = dataset
                .participants
                .iter()
                .filter(|p| p.conversation_id == conv.id)
                .collect();

            let distinct: HashSet<&str> =
                members.iter().map(|p| p.user_id.as_str()).collect();
            assert!(
                distinct.len() >= 2,
                "conversation {} has fewer than 2 distinct participants",
                conv.id
            );
            assert_eq!(
                members
                    .iter()
                    .filter(|p| p.user_id == config.current_user.id())
                    .count(),
                1,
                "conversation {} must contain the current user exactly once",
                conv.id
            );
        }
    }

    #[test]
    fn group_titles_are_unique() {
        let config = SeedConfig {
            conversations: 60,
            ..small_config()
        };
        let conversations = generate_conversations(&config, NOW);

        let titles: Vec<&String> =
            conversations.iter().filter_map(|c| c.title.as_ref()).collect();
        let distinct: HashSet<&String> = titles.iter().copied().collect();
        assert_eq!(titles.len(), distinct.len());
    }

    #[test]
    fn reconcile_gives_every_conversation_a_valid_last_message() {
        let config = small_config();
        let dataset = generate_dataset(&config, NOW);
        let reconciled = reconcile(
            &dataset.conversations,
            &dataset.messages,
            &config.current_user,
        );

        let by_id: HashMap<&str, &Message> =
            dataset.messages.iter().map(|m| (m.id.as_str(), m)).collect();

        for conv in &reconciled {
            let last_id = conv
                .last_message_id
                .as_deref()
                .unwrap_or_else(|| panic!("conversation {} has no last message", conv.id));
            let last = by_id[last_id];
            assert_eq!(conv.last_message_timestamp, Some(last.timestamp));
            assert_eq!(conv.last_message_text.as_deref(), Some(last.summary_text().as_str()));
        }
    }

    #[test]
    fn reconcile_matches_unread_definition_and_guarantees() {
        let config = small_config();
        let dataset = generate_dataset(&config, NOW);
        let reconciled = reconcile(
            &dataset.conversations,
            &dataset.messages,
            &config.current_user,
        );

        for conv in &reconciled {
            let expected = dataset
                .messages
                .iter()
                .filter(|m| {
                    m.conversation_id == conv.id
                        && m.sender_id != config.current_user.id()
                        && m.timestamp > conv.last_viewed_at
                        && !m.is_deleted
                })
                .count() as i64;
            assert_eq!(conv.unread_count, expected, "conversation {}", conv.id);
        }

        let unread_of = |id: &str| {
            reconciled
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.unread_count)
                .unwrap()
        };
        assert_eq!(unread_of("conv_1"), 2);
        assert_eq!(unread_of("conv_2"), 5);
        assert_eq!(unread_of("conv_4"), 0);
    }

    #[test]
    fn timestamps_increase_within_each_conversation() {
        let config = small_config();
        let dataset = generate_dataset(&config, NOW);

        for conv in &dataset.conversations {
            let stamps: Vec<i64> = dataset
                .messages
                .iter()
                .filter(|m| m.conversation_id == conv.id)
                .map(|m| m.timestamp)
                .collect();
            assert!(!stamps.is_empty(), "conversation {} has no messages", conv.id);
            assert!(
                stamps.windows(2).all(|w| w[0] < w[1]),
                "timestamps out of order in {}",
                conv.id
            );
        }
    }

    #[test]
    fn soft_deleted_latest_message_is_skipped_by_reconcile() {
        let config = small_config();
        let mut dataset = generate_dataset(&config, NOW);

        // Delete the chronologically latest message of conv_1.
        let latest_id = dataset
            .messages
            .iter()
            .filter(|m| m.conversation_id == "conv_1")
            .max_by_key(|m| m.timestamp)
            .unwrap()
            .id
            .clone();
        for m in &mut dataset.messages {
            if m.id == latest_id {
                m.is_deleted = true;
            }
        }

        let reconciled = reconcile(
            &dataset.conversations,
            &dataset.messages,
            &config.current_user,
        );
        let conv = reconciled.iter().find(|c| c.id == "conv_1").unwrap();
        assert_ne!(conv.last_message_id.as_deref(), Some(latest_id.as_str()));
        // The deleted message was one of the guaranteed-unread tail.
        assert_eq!(conv.unread_count, 1);
    }

    #[test]
    fn same_config_reproduces_the_same_structure() {
        let config = small_config();
        let a = generate_dataset(&config, NOW);
        let b = generate_dataset(&config, NOW);

        assert_eq!(a.users, b.users);
        let shape = |d: &SeedDataset| {
            d.conversations
                .iter()
                .map(|c| {
                    (
                        c.id.clone(),
                        c.title.clone(),
                        c.is_group,
                        d.participants
                            .iter()
                            .filter(|p| p.conversation_id == c.id)
                            .count(),
                        d.messages
                            .iter()
                            .filter(|m| m.conversation_id == c.id)
                            .count(),
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&a), shape(&b));
    }
}
