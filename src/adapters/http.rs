use crate::core::{ConfigProvider, IdentityProvider, RecommendationSource};
use crate::domain::model::{Florist, RecommendRequest, Session};
use crate::utils::error::{GaehwaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const UNNAMED_FLORIST: &str = "이름 없는 플로리스트";
const DEFAULT_RATING: f32 = 4.8;

fn build_client(timeout_seconds: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn lenient_rating(value: &Value) -> Option<f32> {
    let rating = match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    rating.filter(|n| n.is_finite())
}

/// 伺服器回傳的欄位都可能缺漏或型別不對，逐欄套用預設值
fn florist_from_value(raw: &Value, index: usize) -> Florist {
    static MISSING: Value = Value::Null;
    let field = |name: &str| raw.get(name).unwrap_or(&MISSING);

    let tags = match field("tags") {
        Value::Array(items) => items.iter().filter_map(lenient_string).collect(),
        _ => Vec::new(),
    };
    let image_url = match field("imageUrl") {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };

    Florist {
        id: lenient_string(field("id")).unwrap_or_else(|| format!("f{}", index)),
        name: lenient_string(field("name")).unwrap_or_else(|| UNNAMED_FLORIST.to_string()),
        rating: Some(lenient_rating(field("rating")).unwrap_or(DEFAULT_RATING)),
        tags,
        image_url,
    }
}

/// `florists` 不是陣列時視為空清單
fn florists_from_payload(payload: &Value) -> Vec<Florist> {
    match payload.get("florists") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, raw)| florist_from_value(raw, idx))
            .collect(),
        _ => Vec::new(),
    }
}

pub struct HttpRecommendationClient {
    client: Client,
    endpoint: String,
}

impl HttpRecommendationClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds())?,
            endpoint: join_url(config.backend_url(), "recommend/florists"),
        })
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationClient {
    async fn fetch_florists(&self, request: &RecommendRequest) -> Result<Vec<Florist>> {
        tracing::debug!("Requesting recommendations from: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        tracing::debug!("Recommendation response status: {}", response.status());
        if !response.status().is_success() {
            tracing::warn!("Recommendation server answered {}", response.status());
            return Ok(Vec::new());
        }

        // 本文不是 JSON 視同連線失敗，由上層附上提示
        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Unreadable recommendation payload: {}", e);
            GaehwaError::SerializationError(e)
        })?;

        Ok(florists_from_payload(&payload))
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

pub struct HttpAuthClient {
    client: Client,
    endpoint: String,
}

impl HttpAuthClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds())?,
            endpoint: join_url(config.backend_url(), "auth/login"),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpAuthClient {
    async fn exchange(&self, id_token: &str) -> Result<Session> {
        tracing::debug!("Exchanging identity token at: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "id_token": id_token }))
            .send()
            .await
            .map_err(|e| GaehwaError::AuthError {
                message: format!("could not reach auth server: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GaehwaError::AuthError {
                message: format!("auth server answered {}", status),
            });
        }

        let body: LoginResponse = response.json().await.map_err(|e| GaehwaError::AuthError {
            message: format!("malformed auth response: {}", e),
        })?;

        let access_token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GaehwaError::AuthError {
                message: "auth response has no access_token".to_string(),
            })?;
        let display_name = body
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| GaehwaError::AuthError {
                message: "auth response has no name".to_string(),
            })?;

        Ok(Session {
            access_token,
            refresh_token: body.refresh_token,
            display_name,
            avatar_url: body.avatar_url,
        })
    }
}
