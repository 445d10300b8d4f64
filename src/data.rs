//! Generic data-access client for the Saveurs API
//!
//! Translates logical operations against a named collection into one HTTP
//! request each, uniformly for all collections, plus the handful of
//! specialized routes (registration, login, favorites, reviews) the API
//! exposes outside the collection surface.
//!
//! Failures are logged with request context by the fetch layer and returned
//! unchanged; there are no retries and no local recovery.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::models::{Favorite, ItemType, NewReview, NewUser, Recipe, Restaurant, Review, User};

/// Client for the collection-generic REST surface
#[derive(Debug, Clone)]
pub struct DataClient {
    base_url: String,
    client: Client,
}

/// Shape of the favorites point-lookup response
#[derive(Deserialize)]
struct FavoriteCheck {
    #[serde(rename = "isFavorite")]
    is_favorite: bool,
}

impl DataClient {
    pub(crate) fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Check that the API is reachable by listing users and discarding
    /// the body
    pub async fn ping(&self) -> Result<(), Error> {
        Fetch::get(&self.client, &self.api_url("/users"))
            .execute_ack()
            .await
    }

    /// Get all records in a collection
    pub async fn get_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, Error> {
        Fetch::get(&self.client, &self.api_url(&format!("/{}", collection)))
            .execute()
            .await
    }

    /// Get a single record by id; a missing record surfaces as an
    /// [`Error::Api`] with a 404 status (see [`Error::is_not_found`])
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<T, Error> {
        Fetch::get(&self.client, &self.api_url(&format!("/{}/{}", collection, id)))
            .execute()
            .await
    }

    /// Add a record to a collection, returning the created record
    pub async fn add<T: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        item: &T,
    ) -> Result<R, Error> {
        Fetch::post(&self.client, &self.api_url(&format!("/{}", collection)))
            .json(item)?
            .execute()
            .await
    }

    /// Update a record, which must carry a non-empty `id`; fails with
    /// [`Error::MissingIdentifier`] before any network call otherwise
    pub async fn update<T: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        item: &T,
    ) -> Result<R, Error> {
        let value = serde_json::to_value(item)?;
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingIdentifier)?;

        Fetch::put(&self.client, &self.api_url(&format!("/{}/{}", collection, id)))
            .json(item)?
            .execute()
            .await
    }

    /// Delete a record by id; a 204 No Content response yields `None`
    pub async fn remove(&self, collection: &str, id: &str) -> Result<Option<Value>, Error> {
        Fetch::delete(&self.client, &self.api_url(&format!("/{}/{}", collection, id)))
            .execute_opt()
            .await
    }

    /// Get the records whose `field` equals `value` exactly; this is an
    /// equality-only query-string filter, no ranges or compound predicates
    pub async fn query_by_index<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, Error> {
        Fetch::get(&self.client, &self.api_url(&format!("/{}", collection)))
            .query(field, value)
            .execute()
            .await
    }

    /// Register a new user
    pub async fn register_user(&self, user: &NewUser) -> Result<User, Error> {
        Fetch::post(&self.client, &self.api_url("/users/register"))
            .json(user)?
            .execute()
            .await
    }

    /// Log a user in with email and password
    pub async fn login_user(&self, email: &str, password: &str) -> Result<User, Error> {
        Fetch::post(&self.client, &self.api_url("/users/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))?
            .execute()
            .await
    }

    fn favorites_url(&self, user_id: &str, item_type: ItemType) -> String {
        self.api_url(&format!(
            "/users/{}/favorites/{}",
            user_id,
            item_type.path_segment()
        ))
    }

    /// Mark an item as a favorite of a user
    pub async fn add_favorite(
        &self,
        user_id: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Favorite, Error> {
        let url = format!("{}/{}", self.favorites_url(user_id, item_type), item_id);
        Fetch::post(&self.client, &url).execute().await
    }

    /// Remove an item from a user's favorites
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<(), Error> {
        let url = format!("{}/{}", self.favorites_url(user_id, item_type), item_id);
        Fetch::delete(&self.client, &url).execute_ack().await
    }

    /// Get a user's favorite recipes
    pub async fn favorite_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, Error> {
        Fetch::get(&self.client, &self.favorites_url(user_id, ItemType::Recipe))
            .execute()
            .await
    }

    /// Get a user's favorite restaurants
    pub async fn favorite_restaurants(&self, user_id: &str) -> Result<Vec<Restaurant>, Error> {
        Fetch::get(&self.client, &self.favorites_url(user_id, ItemType::Restaurant))
            .execute()
            .await
    }

    /// Point lookup: is this item a favorite of this user?
    pub async fn is_favorite(
        &self,
        user_id: &str,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<bool, Error> {
        let url = self.api_url(&format!("/users/{}/favorites/check", user_id));
        let check: FavoriteCheck = Fetch::get(&self.client, &url)
            .query("item_id", item_id)
            .query("item_type", item_type.as_str())
            .execute()
            .await?;
        Ok(check.is_favorite)
    }

    /// Submit a review, returning the created record
    pub async fn add_review(&self, review: &NewReview) -> Result<Review, Error> {
        Fetch::post(&self.client, &self.api_url("/reviews"))
            .json(review)?
            .execute()
            .await
    }

    /// Get the reviews for a recipe or restaurant
    pub async fn reviews_for(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Vec<Review>, Error> {
        Fetch::get(&self.client, &self.api_url("/reviews"))
            .query("item_id", item_id)
            .query("item_type", item_type.as_str())
            .execute()
            .await
    }
}
