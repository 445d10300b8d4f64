//! Favorites for recipes and restaurants
//!
//! A favorite is a marker record keyed by (user, item, item type); toggling
//! applies add-if-absent / remove-if-present semantics. The store enforces
//! no uniqueness on that key, so the check-then-act sequence in [`toggle`]
//! is serialized per key: two in-process toggles can never both observe
//! "not favorite" and double-insert. Toggles racing from another process
//! can still duplicate; that is accepted (the persistence layer is an
//! external collaborator here).
//!
//! [`toggle`]: FavoritesClient::toggle

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::auth::Auth;
use crate::data::DataClient;
use crate::error::Error;
use crate::models::{ItemType, Recipe, Restaurant};

type ToggleKey = (String, String, ItemType);

/// Client for favorite toggling and lookups
#[derive(Clone)]
pub struct FavoritesClient {
    data: DataClient,
    auth: Auth,
    toggle_locks: Arc<Mutex<HashMap<ToggleKey, Arc<tokio::sync::Mutex<()>>>>>,
}

impl FavoritesClient {
    pub(crate) fn new(data: DataClient, auth: Auth) -> Self {
        Self {
            data,
            auth,
            toggle_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn toggle_lock(&self, key: ToggleKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.toggle_locks.lock().unwrap();
        locks.entry(key).or_default().clone()
    }

    /// Toggle the favorite status of an item for the current user.
    ///
    /// Returns the new status: `Ok(true)` if the item is now a favorite,
    /// `Ok(false)` if it no longer is. Fails with
    /// [`Error::Unauthenticated`] before any network call when nobody is
    /// logged in.
    pub async fn toggle(&self, item_id: &str, item_type: ItemType) -> Result<bool, Error> {
        let user = self.auth.require_user()?;

        let lock = self.toggle_lock((user.id.clone(), item_id.to_string(), item_type));
        let _guard = lock.lock().await;

        if self.data.is_favorite(&user.id, item_id, item_type).await? {
            self.data.remove_favorite(&user.id, item_id, item_type).await?;
            Ok(false)
        } else {
            self.data.add_favorite(&user.id, item_id, item_type).await?;
            Ok(true)
        }
    }

    /// Is this item a favorite of the current user? `Ok(false)` when
    /// nobody is logged in.
    pub async fn is_user_favorite(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<bool, Error> {
        let user = match self.auth.current_user() {
            Some(user) => user,
            None => return Ok(false),
        };

        self.data.is_favorite(&user.id, item_id, item_type).await
    }

    /// The current user's favorite recipes; empty (never an error) when
    /// nobody is logged in
    pub async fn favorite_recipes(&self) -> Result<Vec<Recipe>, Error> {
        let user = match self.auth.current_user() {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };

        self.data.favorite_recipes(&user.id).await
    }

    /// The current user's favorite restaurants; empty (never an error)
    /// when nobody is logged in
    pub async fn favorite_restaurants(&self) -> Result<Vec<Restaurant>, Error> {
        let user = match self.auth.current_user() {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };

        self.data.favorite_restaurants(&user.id).await
    }
}
