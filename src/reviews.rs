//! Reviews and rating aggregation for recipes and restaurants

use crate::auth::Auth;
use crate::data::DataClient;
use crate::error::Error;
use crate::models::{ItemType, NewReview, Review};

/// Client for creating and reading reviews
#[derive(Clone)]
pub struct ReviewsClient {
    data: DataClient,
    auth: Auth,
}

impl ReviewsClient {
    pub(crate) fn new(data: DataClient, auth: Auth) -> Self {
        Self { data, auth }
    }

    /// Submit a review as the current user, returning the server-assigned
    /// review id.
    ///
    /// Fails locally, before any network call, with
    /// [`Error::Unauthenticated`] when nobody is logged in and with
    /// [`Error::InvalidRating`] when the rating falls outside 1..=5.
    pub async fn add_review(
        &self,
        item_id: &str,
        item_type: ItemType,
        rating: i32,
        comment: &str,
    ) -> Result<String, Error> {
        let user = self.auth.require_user()?;

        if !(1..=5).contains(&rating) {
            return Err(Error::InvalidRating(rating));
        }

        let created = self
            .data
            .add_review(&NewReview {
                user_id: user.id,
                item_id: item_id.to_string(),
                item_type,
                rating,
                comment: comment.to_string(),
            })
            .await?;

        Ok(created.id)
    }

    /// The reviews for an item, newest first; records without a date sort
    /// last, ties keep their server order
    pub async fn item_reviews(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<Vec<Review>, Error> {
        let mut reviews = self.data.reviews_for(item_id, item_type).await?;
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(reviews)
    }
}

/// Arithmetic mean of the ratings in `reviews`.
///
/// Exactly `0.0` for an empty slice, never NaN; an item with no reviews
/// displays as unrated, not as an error.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: i64 = reviews.iter().map(|review| i64::from(review.rating)).sum();
    sum as f64 / reviews.len() as f64
}

/// Filled and empty star counts for displaying a rating.
///
/// The rating is clamped to [0, 5] first, so out-of-range values can
/// never produce more than five stars or a negative count.
pub fn star_counts(rating: f64) -> (u32, u32) {
    let clamped = rating.clamp(0.0, 5.0);
    let filled = clamped.floor() as u32;
    (filled, 5 - filled)
}

/// Render a rating as a five-character star string, e.g. `★★★★☆`
pub fn format_stars(rating: f64) -> String {
    let (filled, empty) = star_counts(rating);
    let mut stars = String::with_capacity(5 * '★'.len_utf8());
    for _ in 0..filled {
        stars.push('★');
    }
    for _ in 0..empty {
        stars.push('☆');
    }
    stars
}
