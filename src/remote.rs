//! # Remote Wall Creation
//!
//! Thin blocking client for the external wall-creation endpoint. The service
//! issues a wall id on creation: a form-encoded request carrying a `title`
//! field, answered with a JSON body containing an `id` (either at the top
//! level or nested under `wall`, and either a string or a number).
//!
//! This client sits outside the store proper. When a remote id is obtained,
//! callers pass it to
//! [`WallStore::create_wall`](crate::store::wall_store::WallStore::create_wall),
//! which otherwise falls back to local id generation.

use crate::error::{Result, WallzError};
use crate::model::WallId;
use serde::Deserialize;

/// Environment variable naming the service base URL, e.g.
/// `https://walls.example.com/api`.
pub const BASE_URL_ENV: &str = "WALLZ_API_BASE_URL";

pub struct CreateWallClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl CreateWallClient {
    /// Build a client against an explicit base URL. Trailing slashes are
    /// trimmed so path joining stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Build a client from [`BASE_URL_ENV`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value)),
            _ => Err(WallzError::Remote(format!(
                "API base URL is not configured; set {}",
                BASE_URL_ENV
            ))),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to create a wall named `title`; returns the id it
    /// issued.
    pub fn create_wall(&self, title: &str) -> Result<WallId> {
        let url = format!("{}/wall", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[("title", title)])
            .send()
            .map_err(|err| WallzError::Remote(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| WallzError::Remote(err.to_string()))?;

        if !status.is_success() {
            return Err(WallzError::Remote(error_message(status.as_u16(), &body)));
        }
        parse_created_id(&body)
    }
}

#[derive(Deserialize)]
struct CreateWallResponse {
    #[serde(default)]
    id: Option<IdValue>,
    #[serde(default)]
    wall: Option<WallRef>,
}

#[derive(Deserialize)]
struct WallRef {
    #[serde(default)]
    id: Option<IdValue>,
}

/// Some deployments return the id as a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    fn into_wall_id(self) -> WallId {
        match self {
            IdValue::Text(s) => WallId::new(s),
            IdValue::Number(n) => WallId::new(n.to_string()),
        }
    }
}

fn parse_created_id(body: &str) -> Result<WallId> {
    let missing = || WallzError::Remote("response did not contain an id".to_string());
    let parsed: CreateWallResponse =
        serde_json::from_str(body).map_err(|_| missing())?;
    let id = parsed
        .id
        .or_else(|| parsed.wall.and_then(|w| w.id))
        .ok_or_else(missing)?;
    Ok(id.into_wall_id())
}

/// Prefer a `message`/`error` field from a JSON error body, then the raw
/// body, then the bare status code.
fn error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrBody {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}
