//! Authentication and session tracking for the Saveurs API
//!
//! The API itself is stateless; the only client-held state is the current
//! user, kept in a shared slot that is set at login, cleared at logout, and
//! rehydrated at startup from the configured [`SessionStore`].

mod session;

use std::sync::{Arc, Mutex};

use crate::data::DataClient;
use crate::error::Error;
use crate::models::{NewUser, User};

pub use session::{MemorySessionStore, SessionStore};

/// Session context for the Saveurs client.
///
/// Exactly one writer exists for the current-user slot (login/logout);
/// every gated action only reads it.
#[derive(Clone)]
pub struct Auth {
    data: DataClient,
    store: Arc<dyn SessionStore>,
    current_user: Arc<Mutex<Option<User>>>,
    persist_session: bool,
}

impl Auth {
    /// Create the session context, rehydrating the current user from the
    /// store; a corrupt stored value is discarded and cleared
    pub(crate) fn new(data: DataClient, store: Arc<dyn SessionStore>, persist_session: bool) -> Self {
        let current_user = match store.load() {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    log::info!("restored session for {}", user.username);
                    Some(user)
                }
                Err(err) => {
                    log::warn!("discarding unreadable stored session: {}", err);
                    store.clear();
                    None
                }
            },
            None => None,
        };

        Self {
            data,
            store,
            current_user: Arc::new(Mutex::new(current_user)),
            persist_session,
        }
    }

    /// Register a new user and log them in
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let user = self
            .data
            .register_user(&NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.set_current_user(user.clone());
        Ok(user)
    }

    /// Log a user in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = self.data.login_user(email, password).await?;
        self.set_current_user(user.clone());
        Ok(user)
    }

    /// Log the current user out, clearing the slot and the store.
    /// A no-op when nobody is logged in.
    pub fn logout(&self) {
        let mut current = self.current_user.lock().unwrap();
        if current.take().is_some() {
            log::info!("user logged out");
        }
        self.store.clear();
    }

    /// Get the currently logged-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.current_user.lock().unwrap().clone()
    }

    /// True if a user is logged in
    pub fn is_authenticated(&self) -> bool {
        self.current_user.lock().unwrap().is_some()
    }

    /// The current user, or [`Error::Unauthenticated`]; the gate every
    /// login-required operation passes through before touching the network
    pub(crate) fn require_user(&self) -> Result<User, Error> {
        self.current_user()
            .ok_or(Error::Unauthenticated)
    }

    fn set_current_user(&self, user: User) {
        if self.persist_session {
            match serde_json::to_string(&user) {
                Ok(raw) => self.store.save(&raw),
                Err(err) => log::warn!("failed to persist session: {}", err),
            }
        }

        log::info!("user logged in: {}", user.username);
        let mut current = self.current_user.lock().unwrap();
        *current = Some(user);
    }
}
