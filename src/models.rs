//! Record types exchanged with the Saveurs API
//!
//! The backing store is a document database, so identifiers are opaque
//! strings and may arrive under `_id`; every record type accepts that
//! spelling via a serde alias.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed rating shown for recipes that have not been rated yet
pub const DEFAULT_RECIPE_RATING: f64 = 4.0;

/// Discriminator between the two record kinds that share the
/// favorites and reviews mechanisms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Recipe,
    Restaurant,
}

impl ItemType {
    /// Wire value used in query strings and review records
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Recipe => "recipe",
            ItemType::Restaurant => "restaurant",
        }
    }

    /// Plural path segment used by the favorites routes
    pub fn path_segment(&self) -> &'static str {
        match self {
            ItemType::Recipe => "recipes",
            ItemType::Restaurant => "restaurants",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user, as returned by the API (never carries a password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration payload; the password is hashed server-side
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A restaurant listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_range: String,
    pub description: String,
    pub image: String,
}

/// A recipe listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, rename = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Rating to display for this recipe, falling back to
    /// [`DEFAULT_RECIPE_RATING`] when it has not been rated
    pub fn display_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RECIPE_RATING)
    }
}

/// A marker record linking a user to an item they have flagged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub item_id: String,
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A rating-plus-comment record for a recipe or restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub rating: i32,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// Review submission payload; the server assigns the id and timestamp
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub user_id: String,
    pub item_id: String,
    pub item_type: ItemType,
    pub rating: i32,
    pub comment: String,
}
