use std::time::Duration;

use super::{client::DdnsApiClient, models::*};
use crate::error::{Error, Result, Stage};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};

const REGISTER_PATH: &str = "/fast/ip2a";
const UPDATE_PATH: &str = "/fast/updateRecord";
const ACCESS_SALT_HEADER: &str = "accesssalt";

/// Applied to both calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FastApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl DdnsApiClient for FastApiClient {
    async fn register(&self, access_salt: &str) -> Result<SessionState> {
        let url = self.register_url()?;
        debug!("GET {}", url);
        debug!(
            "{} header: {}",
            ACCESS_SALT_HEADER,
            if access_salt.is_empty() { "empty" } else { "set" }
        );

        let response = self
            .client
            .get(url)
            .headers(Self::build_headers(access_salt)?)
            .send()
            .await
            .map_err(|source| Error::Transport {
                stage: Stage::Register,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                stage: Stage::Register,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|source| Error::Body {
            stage: Stage::Register,
            source,
        })?;
        debug!("Registration response: {} bytes", text.len());

        let state: SessionState = serde_json::from_str(&text).map_err(|source| Error::Decode {
            stage: Stage::Register,
            source,
        })?;

        if state.token().is_empty() {
            return Err(Error::EmptyToken {
                stage: Stage::Register,
            });
        }

        Ok(state)
    }

    async fn update(&self, token: &str) -> Result<()> {
        let url = self.update_url(token)?;
        debug!("GET {}{}", self.base_url, UPDATE_PATH);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                stage: Stage::Update,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                stage: Stage::Update,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

impl FastApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self::from_reqwest(base_url, client))
    }

    pub fn from_reqwest(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn register_url(&self) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, REGISTER_PATH)).map_err(|e| {
            Error::InvalidRequest {
                stage: Stage::Register,
                reason: e.to_string(),
            }
        })
    }

    pub fn update_url(&self, token: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}{}", self.base_url, UPDATE_PATH),
            &[("token", token)],
        )
        .map_err(|e| Error::InvalidRequest {
            stage: Stage::Update,
            reason: e.to_string(),
        })
    }

    fn build_headers(access_salt: &str) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(access_salt).map_err(|e| Error::InvalidRequest {
            stage: Stage::Register,
            reason: format!("invalid {} header value: {}", ACCESS_SALT_HEADER, e),
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(ACCESS_SALT_HEADER), value);
        Ok(headers)
    }
}
