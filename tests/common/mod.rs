#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use tokio::net::TcpListener;

use thingful_api::auth::{basic_auth_header, hash_password};
use thingful_api::database::{MemoryStore, Review, Thing, User};
use thingful_api::{app, AppState};

/// Every fixture user shares this password
pub const PASSWORD: &str = "password";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve `store` on an ephemeral port for the lifetime of the test runtime
pub async fn spawn_app(store: MemoryStore) -> Result<TestServer> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    let router = app(AppState::new(store));

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

/// Server seeded with users, things and reviews
pub async fn seeded_app() -> Result<TestServer> {
    let users = make_users();
    let things = make_things(&users);
    let reviews = make_reviews(&users, &things);
    spawn_app(MemoryStore::seeded(users, things, reviews)).await
}

pub fn auth_header(user: &User) -> String {
    basic_auth_header(&user.user_name, PASSWORD)
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2029, 1, 22, 16, 28, 32).unwrap()
}

pub fn make_users() -> Vec<User> {
    let hash = hash_password(PASSWORD, 4).expect("hash fixture password");
    let rows = [
        (1, "test-user-1", "Test user 1", Some("TU1")),
        (2, "test-user-2", "Test user 2", Some("TU2")),
        (3, "test-user-3", "Test user 3", None),
        (4, "test-user-4", "Test user 4", Some("TU4")),
    ];
    rows.into_iter()
        .map(|(id, user_name, full_name, nickname)| User {
            id,
            user_name: user_name.to_string(),
            password_hash: hash.clone(),
            full_name: full_name.to_string(),
            nickname: nickname.map(str::to_string),
            date_created: created_at(),
        })
        .collect()
}

pub fn make_things(users: &[User]) -> Vec<Thing> {
    let bodies = [
        "Lorem ipsum dolor sit amet, consectetur adipisicing elit.",
        "Natus consequuntur deserunt commodi, nobis qui inventore corrupti iusto aliquid debitis unde non.",
        "Cupiditate, quam consectetur fugiat ut odio. Dolore sint laboriosam distinctio.",
        "Iste sapiente quis corrupti vero ducimus fugit, reiciendis provident possimus.",
    ];
    bodies
        .iter()
        .enumerate()
        .map(|(i, content)| {
            let id = i as i32 + 1;
            Thing {
                id,
                title: format!("Thing {}", id),
                url: "http://placehold.it/500x500".to_string(),
                content: content.to_string(),
                owner_user_id: users[i % users.len()].id,
                date_created: created_at(),
            }
        })
        .collect()
}

pub fn make_reviews(users: &[User], things: &[Thing]) -> Vec<Review> {
    // (thing index, user index, rating)
    let rows = [
        (0, 1, 2),
        (0, 2, 3),
        (0, 3, 1),
        (0, 0, 5),
        (1, 2, 1),
        (2, 3, 4),
        (2, 0, 5),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, &(thing, user, rating))| Review {
            id: i as i32 + 1,
            text: format!("This is review {}", i + 1),
            rating,
            thing_id: things[thing].id,
            user_id: users[user].id,
            date_created: created_at(),
        })
        .collect()
}

/// A thing whose content and title carry script payloads. Only the content
/// is sanitized on output; the title is returned as stored.
pub fn make_malicious_thing(owner: &User) -> Thing {
    Thing {
        id: 911,
        title: "Naughty naughty very naughty <script>alert(\"xss\");</script>".to_string(),
        url: "http://placehold.it/500x500".to_string(),
        content: "<script>alert('xss');</script>Plain text".to_string(),
        owner_user_id: owner.id,
        date_created: created_at(),
    }
}

fn expected_user(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "user_name": user.user_name,
        "full_name": user.full_name,
        "nickname": user.nickname,
        "date_created": user.date_created,
    })
}

/// Public view of `thing` as the API should render it
pub fn expected_thing(users: &[User], thing: &Thing, reviews: &[Review]) -> serde_json::Value {
    let owner = users
        .iter()
        .find(|u| u.id == thing.owner_user_id)
        .expect("fixture thing has an owner");
    let ratings: Vec<f64> = reviews
        .iter()
        .filter(|r| r.thing_id == thing.id)
        .map(|r| f64::from(r.rating))
        .collect();
    let rating = if ratings.is_empty() {
        0
    } else {
        (ratings.iter().sum::<f64>() / ratings.len() as f64).round() as i64
    };

    serde_json::json!({
        "id": thing.id,
        "title": thing.title,
        "url": thing.url,
        "content": thing.content,
        "rating": rating,
        "number_of_reviews": ratings.len(),
        "date_created": thing.date_created,
        "owner": expected_user(owner),
    })
}

/// Public views of the reviews of `thing_id`, in insertion order
pub fn expected_reviews(users: &[User], thing_id: i32, reviews: &[Review]) -> serde_json::Value {
    let views: Vec<serde_json::Value> = reviews
        .iter()
        .filter(|r| r.thing_id == thing_id)
        .map(|review| {
            let author = users
                .iter()
                .find(|u| u.id == review.user_id)
                .expect("fixture review has an author");
            serde_json::json!({
                "id": review.id,
                "text": review.text,
                "rating": review.rating,
                "date_created": review.date_created,
                "thing_id": review.thing_id,
                "user": expected_user(author),
            })
        })
        .collect();
    serde_json::Value::Array(views)
}
