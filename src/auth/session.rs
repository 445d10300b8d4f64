//! Persisted session storage
//!
//! The browser original kept the logged-in user under a single
//! localStorage key; [`SessionStore`] is that contract as a trait, so
//! embedders can plug in whatever storage the host application has.

use std::sync::Mutex;

/// Storage for one serialized current-user value.
///
/// Absence means "logged out". Implementations must tolerate concurrent
/// reads; writes only happen from login and logout.
pub trait SessionStore: Send + Sync {
    /// Load the stored session value, if any
    fn load(&self) -> Option<String>;

    /// Save the session value, replacing any previous one
    fn save(&self, value: &str);

    /// Clear the stored session value
    fn clear(&self);
}

/// In-memory session store, the default when no persistence is wired in
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }

    fn save(&self, value: &str) {
        *self.value.lock().unwrap() = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }
}
