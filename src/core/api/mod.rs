//! Game-master backend port: wire types, errors, and the [`GameMaster`] trait.
//!
//! The backend is an opaque HTTP/JSON service with two endpoints,
//! `POST /create-character` and `POST /game-turn`. [`http::HttpGameMaster`]
//! is the production adapter; tests substitute `MockGameMaster`.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::character::Character;
use super::stats::Stats;

pub use http::HttpGameMaster;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx reply. `message` comes from the error body when present,
    /// otherwise from the HTTP status text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx reply whose `status` field was not `"success"`.
    #[error("{0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Wire types
// ============================================================================

/// Body of `POST /create-character`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub stats: Stats,
    pub inventory: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reply of `POST /create-character`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateCharacterResponse {
    pub status: String,
    #[serde(default)]
    pub character: Option<Character>,
    #[serde(default)]
    pub initial_message: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A creation reply that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCharacter {
    pub character: Character,
    pub initial_message: Option<String>,
}

impl CreateCharacterResponse {
    /// Accept only `status == "success"` with a character payload.
    pub fn into_created(self) -> Result<CreatedCharacter> {
        if self.status != "success" {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("backend reported status '{}'", self.status));
            return Err(ApiError::Rejected(message));
        }
        match self.character {
            Some(character) => Ok(CreatedCharacter {
                character,
                initial_message: self.initial_message.filter(|m| !m.trim().is_empty()),
            }),
            None => Err(ApiError::MalformedResponse(
                "no character data was received from the backend".to_string(),
            )),
        }
    }
}

/// Body of `POST /game-turn`, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TurnRequest {
    Action { player_action: String },
    Roll { modifier_stat: String },
}

/// Reply of `POST /game-turn`. The dice fields only appear on roll replies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TurnResponse {
    pub story: String,
    #[serde(default)]
    pub character: Option<Character>,
    #[serde(default)]
    pub require_roll: Option<bool>,
    #[serde(default)]
    pub roll_stat: Option<String>,
    #[serde(default)]
    pub roll_stat_ko: Option<String>,
    #[serde(default)]
    pub dice1: Option<u8>,
    #[serde(default)]
    pub dice2: Option<u8>,
    #[serde(default)]
    pub total: Option<i32>,
    #[serde(default)]
    pub modifier: Option<i32>,
    #[serde(default)]
    pub roll_outcome: Option<String>,
}

impl TurnResponse {
    /// `(stat, localized name)` when the backend asks for another roll.
    pub fn roll_request(&self) -> Option<(&str, Option<&str>)> {
        if !self.require_roll.unwrap_or(false) {
            return None;
        }
        let stat = self.roll_stat.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((stat, self.roll_stat_ko.as_deref()))
    }

    pub fn dice(&self) -> Option<(u8, u8)> {
        Some((self.dice1?, self.dice2?))
    }
}

// ============================================================================
// Port
// ============================================================================

/// The remote game master.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameMaster: Send + Sync {
    async fn create_character(
        &self,
        request: &CreateCharacterRequest,
    ) -> Result<CreateCharacterResponse>;

    async fn game_turn(&self, request: &TurnRequest) -> Result<TurnResponse>;
}
