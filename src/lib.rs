//! Saveurs Rust Client Library
//!
//! A Rust client for the Saveurs restaurant and recipe discovery API,
//! providing the generic collection data-access layer plus the auth
//! session, favorites and reviews modules built on top of it.
//!
//! ```no_run
//! use saveurs_client::{Saveurs, models::ItemType};
//!
//! # async fn run() -> Result<(), saveurs_client::error::Error> {
//! let saveurs = Saveurs::new("http://localhost:3000");
//!
//! saveurs.auth().login("marie@example.com", "secret").await?;
//! let now_favorite = saveurs.favorites().toggle("recipe-42", ItemType::Recipe).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod models;
pub mod reviews;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::{Auth, MemorySessionStore, SessionStore};
use crate::config::ClientOptions;
use crate::data::DataClient;
use crate::error::Error;
use crate::favorites::FavoritesClient;
use crate::reviews::ReviewsClient;

/// The main entry point for the Saveurs client
pub struct Saveurs {
    /// The base URL of the Saveurs API server
    pub url: String,
    /// HTTP client shared by every sub-client
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    data: DataClient,
    auth: Auth,
    favorites: FavoritesClient,
    reviews: ReviewsClient,
}

impl Saveurs {
    /// Create a new Saveurs client with default options and an in-memory
    /// session store
    ///
    /// # Example
    ///
    /// ```
    /// use saveurs_client::Saveurs;
    ///
    /// let saveurs = Saveurs::new("http://localhost:3000");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new Saveurs client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use saveurs_client::{Saveurs, config::ClientOptions};
    /// use std::time::Duration;
    ///
    /// let options = ClientOptions::default()
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let saveurs = Saveurs::new_with_options("http://localhost:3000", options);
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Self {
        Self::new_with_session_store(url, options, Arc::new(MemorySessionStore::new()))
    }

    /// Create a new Saveurs client with a custom session store; the
    /// current user is rehydrated from it at construction
    pub fn new_with_session_store(
        url: &str,
        options: ClientOptions,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|err| {
            log::warn!(
                "failed to build HTTP client, falling back to defaults: {}",
                err
            );
            Client::new()
        });

        let data = DataClient::new(url, http_client.clone());
        let auth = Auth::new(data.clone(), store, options.persist_session);
        let favorites = FavoritesClient::new(data.clone(), auth.clone());
        let reviews = ReviewsClient::new(data.clone(), auth.clone());

        Self {
            url: url.to_string(),
            http_client,
            options,
            data,
            auth,
            favorites,
            reviews,
        }
    }

    /// The session context for registration, login and logout
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// The generic collection data-access client
    pub fn data(&self) -> &DataClient {
        &self.data
    }

    /// The favorites client for the current user
    pub fn favorites(&self) -> &FavoritesClient {
        &self.favorites
    }

    /// The reviews client for the current user
    pub fn reviews(&self) -> &ReviewsClient {
        &self.reviews
    }

    /// Check that the API server is reachable
    pub async fn check_connection(&self) -> Result<(), Error> {
        self.data.ping().await
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::models::ItemType;
    pub use crate::Saveurs;
}
