use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::{
    ApiError, CreateCharacterRequest, CreateCharacterResponse, GameMaster, Result, TurnRequest,
    TurnResponse,
};

const CREATE_CHARACTER_PATH: &str = "create-character";
const GAME_TURN_PATH: &str = "game-turn";

/// Body fields checked, in order, for a human-readable error message.
const ERROR_FIELDS: &[&str] = &["message", "error", "story"];

/// reqwest-backed [`GameMaster`].
///
/// The client keeps a cookie store so the backend's session cookie set on
/// character creation is sent with every later turn.
pub struct HttpGameMaster {
    client: Client,
    base_url: Url,
}

impl HttpGameMaster {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            log::warn!("{url} returned {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl GameMaster for HttpGameMaster {
    async fn create_character(
        &self,
        request: &CreateCharacterRequest,
    ) -> Result<CreateCharacterResponse> {
        self.post_json(CREATE_CHARACTER_PATH, request).await
    }

    async fn game_turn(&self, request: &TurnRequest) -> Result<TurnResponse> {
        self.post_json(GAME_TURN_PATH, request).await
    }
}

/// Accept only absolute `http`/`https` URLs.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ApiError::InvalidUrl(format!(
            "{raw}: expected an http(s) URL with a host"
        ))),
    }
}

/// Best-effort message for a non-2xx reply: the first non-empty string in
/// [`ERROR_FIELDS`], else the status text.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ERROR_FIELDS.iter().find_map(|field| {
                value
                    .get(field)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        });

    from_body.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("HTTP {}", status.as_u16()),
    })
}
