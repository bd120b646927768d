//! HTTP client for content API requests.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use spacetravel_core::error::{ApiError, SchemaError, TransportError};
use spacetravel_core::{ApiUrl, Error, Result};

use crate::endpoints::ErrorResponse;

/// HTTP client bound to one content API root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given API root.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("spacetravel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, api })
    }

    /// GET `url` with `params` and decode a JSON body.
    #[instrument(skip(self, params), fields(api = %self.api))]
    pub async fn get_json<Q, R>(&self, url: &str, params: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = self.get(url, params).await?;
        serde_json::from_slice(&body).map_err(|e| {
            SchemaError::Response {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// GET `url` with `params` and return the raw body of a success response.
    #[instrument(skip(self, params), fields(api = %self.api))]
    pub async fn get<Q>(&self, url: &str, params: &Q) -> Result<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// GET an absolute URL exactly as given.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get_url(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "GET opaque URL");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        trace!(status = %status, "Content API response");

        if status.is_success() {
            let body = response.bytes().await.map_err(transport_error)?;
            Ok(body.to_vec())
        } else {
            Err(Error::Api(self.parse_error_response(response).await))
        }
    }

    /// Parse an `{ error, message }` body, tolerating anything else.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ApiError::new(status.as_u16(), body.error, body.message),
            Err(_) => ApiError::new(
                status.as_u16(),
                None,
                status.canonical_reason().map(String::from),
            ),
        }
    }
}

/// Map a reqwest failure onto the transport error kinds.
fn transport_error(e: reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection {
            message: e.to_string(),
        }
    } else {
        TransportError::Http {
            message: e.to_string(),
        }
    };
    Error::Transport(kind)
}
