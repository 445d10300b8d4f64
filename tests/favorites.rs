use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saveurs_client::auth::{MemorySessionStore, SessionStore};
use saveurs_client::config::ClientOptions;
use saveurs_client::error::Error;
use saveurs_client::models::ItemType;
use saveurs_client::Saveurs;

/// Client with user u1 already logged in via a pre-populated store
fn logged_in_client(url: &str) -> Saveurs {
    let store = Arc::new(MemorySessionStore::new());
    store.save(r#"{"id":"u1","username":"marie","email":"marie@example.com"}"#);
    Saveurs::new_with_session_store(url, ClientOptions::default(), store)
}

fn favorite_json(item_id: &str, item_type: &str) -> serde_json::Value {
    json!({
        "_id": "fav1",
        "user_id": "u1",
        "item_id": item_id,
        "item_type": item_type,
        "created_at": "2024-04-01T12:00:00Z"
    })
}

#[tokio::test]
async fn toggling_a_non_favorite_adds_it_and_returns_true() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u1/favorites/check"))
        .and(query_param("item_id", "r1"))
        .and(query_param("item_type", "recipe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFavorite": false })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users/u1/favorites/recipes/r1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(favorite_json("r1", "recipe")))
        .expect(1)
        .mount(&server)
        .await;

    let saveurs = logged_in_client(&server.uri());
    let now_favorite = saveurs.favorites().toggle("r1", ItemType::Recipe).await.unwrap();
    assert!(now_favorite);
}

#[tokio::test]
async fn toggling_an_existing_favorite_removes_it_and_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u1/favorites/check"))
        .and(query_param("item_id", "rest1"))
        .and(query_param("item_type", "restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFavorite": true })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/u1/favorites/restaurants/rest1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "removed" })))
        .expect(1)
        .mount(&server)
        .await;

    let saveurs = logged_in_client(&server.uri());
    let now_favorite = saveurs
        .favorites()
        .toggle("rest1", ItemType::Restaurant)
        .await
        .unwrap();
    assert!(!now_favorite);
}

#[tokio::test]
async fn unauthenticated_toggle_fails_without_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let saveurs = Saveurs::new(&server.uri());
    let err = saveurs
        .favorites()
        .toggle("r1", ItemType::Recipe)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthenticated));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// Two toggles for the same key starting from "not favorite": the per-key
// guard serializes them, so the second observes the first's insert and
// removes it. Exactly one add and one remove are issued; a double insert
// cannot happen in-process.
#[tokio::test]
async fn concurrent_toggles_for_one_item_are_serialized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u1/favorites/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFavorite": false })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/u1/favorites/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFavorite": true })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users/u1/favorites/recipes/r1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(favorite_json("r1", "recipe")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/u1/favorites/recipes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "removed" })))
        .expect(1)
        .mount(&server)
        .await;

    let saveurs = logged_in_client(&server.uri());
    let favorites = saveurs.favorites();

    let (first, second) = tokio::join!(
        favorites.toggle("r1", ItemType::Recipe),
        favorites.toggle("r1", ItemType::Recipe),
    );

    let mut results = [first.unwrap(), second.unwrap()];
    results.sort();
    assert_eq!(results, [false, true]);
}

#[tokio::test]
async fn favorite_reads_return_empty_when_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let saveurs = Saveurs::new(&server.uri());

    assert!(saveurs.favorites().favorite_recipes().await.unwrap().is_empty());
    assert!(saveurs
        .favorites()
        .favorite_restaurants()
        .await
        .unwrap()
        .is_empty());
    assert!(!saveurs
        .favorites()
        .is_user_favorite("r1", ItemType::Recipe)
        .await
        .unwrap());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn favorite_recipes_fan_out_through_the_user_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u1/favorites/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "r1",
                "name": "Crepes",
                "description": "thin pancakes",
                "category": "dessert",
                "image": "crepes.jpg",
                "prepTime": 10,
                "cookTime": 15,
                "servings": 4,
                "difficulty": "easy",
                "ingredients": ["flour", "eggs", "milk"],
                "instructions": ["whisk", "fry"]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let saveurs = logged_in_client(&server.uri());
    let recipes = saveurs.favorites().favorite_recipes().await.unwrap();

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Crepes");
}
