//! Identity/session collaborator.
//!
//! The board only needs two things from the identity provider: whether the
//! session has finished loading (the readiness gate for every fetch) and the
//! signed-in user's role, which the header uses to pick its links.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Role stored in the user's profile metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candidate" => Ok(Role::Candidate),
            "recruiter" => Ok(Role::Recruiter),
            _ => Err("expected 'candidate' or 'recruiter'".to_string()),
        }
    }
}

/// Who is using the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionProfile {
    pub signed_in: bool,
    pub role: Option<Role>,
}

impl SessionProfile {
    #[must_use]
    pub fn can_post_jobs(&self) -> bool {
        self.signed_in && self.role == Some(Role::Recruiter)
    }

    /// Label for the personal jobs link
    #[must_use]
    pub fn my_jobs_label(&self) -> &'static str {
        match self.role {
            Some(Role::Candidate) => "My Applications",
            _ => "My Jobs",
        }
    }
}

/// Session handle: profile plus a readiness signal observers subscribe to.
/// Clones share the readiness signal.
#[derive(Debug, Clone)]
pub struct Session {
    profile: SessionProfile,
    ready: Arc<watch::Sender<bool>>,
}

impl Session {
    /// Create a session that is not ready yet
    pub fn new(profile: SessionProfile) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            profile,
            ready: Arc::new(ready),
        }
    }

    /// Create a session that is already ready (headless commands)
    pub fn ready(profile: SessionProfile) -> Self {
        let (ready, _) = watch::channel(true);
        Self {
            profile,
            ready: Arc::new(ready),
        }
    }

    #[must_use]
    pub fn profile(&self) -> SessionProfile {
        self.profile
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    pub fn subscribe_ready(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.send_if_modified(|current| {
            let changed = *current != ready;
            *current = ready;
            changed
        });
    }
}

/// Spawn the task that stands in for the identity provider finishing its load
pub fn spawn_session_loader(
    session: Session,
    delay: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                tracing::info!("Session ready after {:?}", delay);
                session.set_ready(true);
            }
        }
    })
}
