//! Process-wide connection state.
//!
//! Resolved once at startup and handed to every repository. There is no
//! transition back to `Unconfigured` at runtime.

use std::fmt;
use std::sync::Arc;

use crate::store::DocumentStore;

/// Whether this process talks to a live document store.
#[derive(Clone)]
pub enum ConnectionState {
    /// No store configured or reachable; repositories serve fallback data.
    Unconfigured,
    /// A live store shared by all repositories.
    Configured(Arc<dyn DocumentStore>),
}

impl ConnectionState {
    pub fn configured(store: Arc<dyn DocumentStore>) -> Self {
        ConnectionState::Configured(store)
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ConnectionState::Configured(_))
    }

    /// The live store, if any.
    pub fn store(&self) -> Option<&Arc<dyn DocumentStore>> {
        match self {
            ConnectionState::Configured(store) => Some(store),
            ConnectionState::Unconfigured => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Configured(_) => "configured",
            ConnectionState::Unconfigured => "unconfigured",
        }
    }
}

impl fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Unconfigured => write!(f, "Unconfigured"),
            ConnectionState::Configured(store) => {
                f.debug_tuple("Configured").field(&store.backend()).finish()
            }
        }
    }
}
