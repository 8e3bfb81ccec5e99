#![allow(dead_code)]

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

/// Secret the test router verifies tokens with.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// A caller known to the user repository, with a valid token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

pub fn mint_token(user_id: Uuid, exp: i64) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "user_id": user_id, "exp": exp }),
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}

pub fn valid_token(user_id: Uuid) -> String {
    mint_token(user_id, chrono::Utc::now().timestamp() + 3600)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
