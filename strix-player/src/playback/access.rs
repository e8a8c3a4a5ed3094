//! Parental-lock gating for source resolution
//!
//! Locked content suspends URI resolution until the session has been
//! authorized once. Authorization is held in memory only; a new session
//! always starts unauthorized.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::stores::LockStore;

/// Gate consulted before every URI resolution
pub struct AccessGate {
    locks: Arc<dyn LockStore>,
    authorized_this_session: AtomicBool,
}

impl AccessGate {
    pub fn new(locks: Arc<dyn LockStore>) -> Self {
        Self {
            locks,
            authorized_this_session: AtomicBool::new(false),
        }
    }

    /// Whether the content id is PIN-locked at all
    pub async fn check_locked(&self, content_id: i64) -> bool {
        self.locks.is_content_locked(content_id).await
    }

    /// Errors with `LockedUnauthorized` when the content is locked and the
    /// session has not yet been authorized
    pub async fn ensure_access(&self, content_id: i64) -> Result<()> {
        if self.is_authorized() {
            return Ok(());
        }
        if self.locks.is_content_locked(content_id).await {
            debug!(content_id, "content locked, resolution suspended");
            return Err(Error::LockedUnauthorized(content_id));
        }
        Ok(())
    }

    /// Verify a PIN; a correct PIN authorizes the rest of the session.
    /// A wrong PIN is never fatal, the caller simply re-prompts.
    pub async fn authorize(&self, pin: &str) -> bool {
        if self.locks.verify_pin(pin).await {
            self.authorized_this_session.store(true, Ordering::Release);
            info!("parental lock authorized for this session");
            true
        } else {
            debug!("PIN verification failed");
            false
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized_this_session.load(Ordering::Acquire)
    }
}
