//! Synthetic seed dataset generator for the chat store.
//!
//! Produces a self-consistent demo dataset: users, a mix of 1:1 and group
//! conversations that all include the designated current user, membership
//! rows, and messages with monotonically increasing timestamps drawn from
//! the full type set. A reconciliation pass derives each conversation's
//! last-message summary and unread count before anything is persisted.
//!
//! Given the same [`SeedConfig`], the dataset has the same structure; only
//! text content varies with the RNG seed.

pub mod generator;
pub mod pools;
pub mod seeder;

pub use generator::{
    generate_conversations, generate_dataset, generate_messages, generate_participants,
    generate_users, reconcile, SeedConfig, SeedDataset,
};
pub use seeder::Seeder;
