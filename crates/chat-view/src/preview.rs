//! List-preview classification.
//!
//! Previews are classified from the authoritative message type and its
//! structured metadata, not from display text. The only textual inspection
//! left is for system notices, which fold call records into the preview
//! categories.

use chat_store::{Message, MessageType};
use serde::{Deserialize, Serialize};

/// Marker used by system notices for a call the viewer missed.
const MISSED_CALL_NOTICE: &str = "Missed Call";
/// Marker used by system notices for an answered call.
const CALL_NOTICE: &str = "Call";

/// Coarse preview category for a conversation-list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    Text,
    Photo,
    Video,
    Audio,
    File,
    Location,
    Sticker,
    Gif,
    VoiceNote,
    Document,
    Call,
    MissedCall,
}

/// Classify a message for list display.
pub fn classify(message: &Message) -> PreviewKind {
    match message.message_type {
        MessageType::Image => PreviewKind::Photo,
        MessageType::Video => PreviewKind::Video,
        MessageType::Audio => PreviewKind::Audio,
        MessageType::File => PreviewKind::File,
        MessageType::Location => PreviewKind::Location,
        MessageType::Sticker => PreviewKind::Sticker,
        MessageType::Gif => PreviewKind::Gif,
        MessageType::VoiceNote => PreviewKind::VoiceNote,
        MessageType::Link => PreviewKind::Document,
        MessageType::System => classify_system_notice(&message.content),
        MessageType::Text => PreviewKind::Text,
    }
}

fn classify_system_notice(content: &str) -> PreviewKind {
    if content.contains(MISSED_CALL_NOTICE) {
        PreviewKind::MissedCall
    } else if content.contains(CALL_NOTICE) {
        PreviewKind::Call
    } else {
        PreviewKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(message_type: MessageType, content: &str) -> Message {
        Message::text("m1", "c1", "u1", content, 1).with_type(message_type)
    }

    #[test]
    fn classification_follows_authoritative_type() {
        assert_eq!(
            classify(&message_of(MessageType::Image, "ignored text")),
            PreviewKind::Photo
        );
        assert_eq!(
            classify(&message_of(MessageType::VoiceNote, "")),
            PreviewKind::VoiceNote
        );
        assert_eq!(
            classify(&message_of(MessageType::Link, "check this")),
            PreviewKind::Document
        );
        assert_eq!(
            classify(&message_of(MessageType::Text, "📷 Photo")),
            PreviewKind::Text,
            "text content must not be re-interpreted as media"
        );
    }

    #[test]
    fn system_notices_fold_call_records() {
        assert_eq!(
            classify(&message_of(MessageType::System, "Missed Call at 14:02")),
            PreviewKind::MissedCall
        );
        assert_eq!(
            classify(&message_of(MessageType::System, "Call ended")),
            PreviewKind::Call
        );
        assert_eq!(
            classify(&message_of(MessageType::System, "Maya joined the group")),
            PreviewKind::Text
        );
    }
}
