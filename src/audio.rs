//! Audio-cue playback collaborator seam.
//!
//! The breathing session plays a short cue on each entry into the
//! Exhale phase. Playback is strictly fire-and-forget: the task is
//! detached, no result is observed, and a failure is surfaced only as
//! advisory logging — it must never interrupt the session.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Plays the fixed exhale cue asset.
#[async_trait]
pub trait CuePlayer: Send + Sync {
    /// Play the cue once.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails; callers go through
    /// [`fire_cue`], which logs and swallows it.
    async fn play(&self) -> Result<()>;
}

/// Play the cue on a detached task, swallowing any failure.
///
/// There is no cancellation contract: once started, the task runs to
/// completion or failure on its own.
pub fn fire_cue(cue: Arc<dyn CuePlayer>) {
    tokio::spawn(async move {
        if let Err(e) = cue.play().await {
            warn!("exhale cue playback failed (non-fatal): {e}");
        }
    });
}

/// Cue player that logs instead of playing audio.
#[derive(Debug, Default, Clone)]
pub struct NullCue;

#[async_trait]
impl CuePlayer for NullCue {
    async fn play(&self) -> Result<()> {
        debug!("exhale cue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::error::CompanionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCue {
        plays: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CuePlayer for CountingCue {
        async fn play(&self) -> Result<()> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CompanionError::Audio("speaker unplugged".to_owned()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn fire_cue_runs_detached() {
        let cue = Arc::new(CountingCue {
            plays: AtomicUsize::new(0),
            fail: false,
        });
        fire_cue(Arc::clone(&cue) as Arc<dyn CuePlayer>);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(cue.plays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cue_failure_is_swallowed() {
        let cue = Arc::new(CountingCue {
            plays: AtomicUsize::new(0),
            fail: true,
        });
        // Must not panic or propagate anywhere.
        fire_cue(Arc::clone(&cue) as Arc<dyn CuePlayer>);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(cue.plays.load(Ordering::SeqCst), 1);
    }
}
