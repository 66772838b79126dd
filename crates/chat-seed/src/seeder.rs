//! First-run population and reset.

use chat_store::{now_ms, ChatRepository, Result};

use crate::generator::{generate_dataset, reconcile, SeedConfig};

/// Drives the repository with generated data: populate on first run,
/// reset-and-reseed on demand.
pub struct Seeder {
    repo: ChatRepository,
    config: SeedConfig,
}

impl Seeder {
    pub fn new(repo: ChatRepository, config: SeedConfig) -> Self {
        Self { repo, config }
    }

    /// Populate the store when it is empty. Returns whether seeding ran.
    pub async fn initialize(&self) -> Result<bool> {
        if self.repo.count_users().await? > 0 {
            tracing::debug!("store already populated, skipping seed");
            return Ok(false);
        }
        self.populate().await?;
        Ok(true)
    }

    /// Clear every table and repopulate from scratch.
    pub async fn reset_and_reseed(&self) -> Result<()> {
        tracing::info!("resetting chat data");
        self.repo.clear_all_data().await?;
        self.populate().await
    }

    async fn populate(&self) -> Result<()> {
        let now = now_ms();
        let dataset = generate_dataset(&self.config, now);

        tracing::info!(
            users = dataset.users.len(),
            conversations = dataset.conversations.len(),
            participants = dataset.participants.len(),
            messages = dataset.messages.len(),
            "populating chat store"
        );

        // Parents before dependents, to satisfy the foreign keys.
        self.repo.insert_users(&dataset.users).await?;
        self.repo.insert_conversations(&dataset.conversations).await?;
        self.repo.insert_participants(&dataset.participants).await?;
        self.repo.insert_messages(&dataset.messages).await?;

        // Reconciliation pass: rewrite each conversation with its derived
        // last-message summary and unread count.
        let reconciled = reconcile(
            &dataset.conversations,
            &dataset.messages,
            &self.config.current_user,
        );
        self.repo.insert_conversations(&reconciled).await?;

        tracing::info!("seeding complete");
        Ok(())
    }
}
