//! Collaborator store traits
//!
//! The controller reaches every external subsystem (credentials, parental
//! locks, user settings, catalog/history) through these injected traits.
//! Nothing in the controller reads global storage.

use async_trait::async_trait;
use strix_common::types::{Credentials, MediaKind};

use crate::error::Result;

/// Secure retrieval of the stored Xtream server credentials
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns `None` when no credentials are stored or they are unreadable
    async fn credentials(&self) -> Option<Credentials>;
}

/// Parental-lock queries and PIN verification
#[async_trait]
pub trait LockStore: Send + Sync {
    async fn is_content_locked(&self, content_id: i64) -> bool;

    async fn is_category_locked(&self, category_id: i64) -> bool;

    /// True when the supplied PIN matches the configured one
    async fn verify_pin(&self, pin: &str) -> bool;
}

/// User preference getters consulted by the controller
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// When enabled, live HLS sources are rewritten to their
    /// highest-resolution variant
    async fn prefer_highest_quality(&self) -> bool;
}

/// Catalog-side watch history and favorites
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Upsert the resume position for a piece of content
    async fn update_history(
        &self,
        content_id: i64,
        kind: MediaKind,
        position_ms: u64,
        duration_ms: u64,
    ) -> Result<()>;

    /// Drop the history entry (content considered finished)
    async fn remove_from_history(&self, content_id: i64) -> Result<()>;

    /// Stored resume offset, read once at session startup
    async fn resume_position(&self, content_id: i64) -> Result<Option<u64>>;

    async fn is_favorite(&self, content_id: i64, kind: MediaKind) -> Result<bool>;

    async fn add_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()>;

    async fn remove_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()>;
}
