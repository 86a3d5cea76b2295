//! Remote call gateway — one HTTP GET per API call, envelope decoding.
//!
//! The gateway's contract is deliberately narrow: issue the request,
//! decode the `{response}` / `{error}` envelope, hand the result back.
//! Retrying and error classification are layered on top (see
//! [`request_with_retry`](super::request_with_retry)).

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::VkApiConfig;
use crate::error::{Error, Result};

/// A structured error reported by the VK API inside a 200 response.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteError {
    /// Numeric error code
    #[serde(rename = "error_code")]
    pub code: i64,
    /// Human-readable message from the API
    #[serde(rename = "error_msg")]
    pub message: String,
}

/// The `response` member of a successful `wall.get`/`execute` call.
#[derive(Clone, Debug, Deserialize)]
pub struct WallPayload {
    /// Total number of posts on the wall, as reported by the API
    pub count: u64,
    /// Raw wall items; decoded per-item so one malformed post cannot
    /// fail the whole batch
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// Decoded outcome of one API call.
#[derive(Debug)]
pub enum ApiOutcome {
    /// The call succeeded and carried a payload
    Payload(WallPayload),
    /// The API refused the call with a structured error
    Remote(RemoteError),
}

/// Full response envelope: exactly one of the two members is present.
#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<WallPayload>,
    error: Option<RemoteError>,
}

/// Abstraction over the remote API transport.
///
/// Production code uses [`HttpGateway`]; orchestration tests substitute
/// a scripted implementation.
#[async_trait]
pub trait VkGateway: Send + Sync {
    /// Perform one API call. `params` are the method-specific query
    /// parameters; version and credentials are the gateway's concern.
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<ApiOutcome>;
}

/// `reqwest`-backed gateway against the real VK API.
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: url::Url,
    version: String,
    access_token: String,
}

impl HttpGateway {
    /// Build a gateway from endpoint configuration.
    pub fn new(config: &VkApiConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid API base URL {:?}: {e}", config.base_url),
            key: Some("base_url".into()),
        })?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            version: config.version.clone(),
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl VkGateway for HttpGateway {
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<ApiOutcome> {
        let url = self.base_url.join(method).map_err(|e| Error::Config {
            message: format!("cannot form URL for method {method:?}: {e}"),
            key: Some("base_url".into()),
        })?;

        tracing::debug!(method = method, "Issuing VK API request");

        let envelope: Envelope = self
            .client
            .get(url)
            .query(&[
                ("v", self.version.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .query(params)
            .send()
            .await?
            .json()
            .await?;

        match envelope {
            Envelope {
                response: Some(payload),
                ..
            } => Ok(ApiOutcome::Payload(payload)),
            Envelope {
                error: Some(remote),
                ..
            } => Ok(ApiOutcome::Remote(remote)),
            Envelope {
                response: None,
                error: None,
            } => Err(Error::Upstream {
                code: 0,
                message: format!("method {method} returned neither response nor error"),
            }),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_against(server: &MockServer) -> HttpGateway {
        let config = VkApiConfig {
            base_url: format!("{}/method/", server.uri()),
            access_token: "test-token".into(),
            ..Default::default()
        };
        HttpGateway::new(&config).expect("gateway must build")
    }

    #[tokio::test]
    async fn success_envelope_decodes_to_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/method/wall.get"))
            .and(query_param("v", "5.131"))
            .and(query_param("access_token", "test-token"))
            .and(query_param("domain", "durov"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": {"count": 333, "items": [{"id": 1}]}
            })))
            .mount(&server)
            .await;

        let gateway = gateway_against(&server);
        let outcome = gateway
            .request("wall.get", &[("domain", "durov".to_string())])
            .await
            .unwrap();

        match outcome {
            ApiOutcome::Payload(payload) => {
                assert_eq!(payload.count, 333);
                assert_eq!(payload.items.len(), 1);
            }
            other => panic!("expected payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_envelope_decodes_to_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/method/wall.get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": {"error_code": 6, "error_msg": "Too many requests per second"}
            })))
            .mount(&server)
            .await;

        let gateway = gateway_against(&server);
        let outcome = gateway.request("wall.get", &[]).await.unwrap();

        match outcome {
            ApiOutcome::Remote(remote) => {
                assert_eq!(remote.code, 6);
                assert_eq!(remote.message, "Too many requests per second");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn payload_without_items_defaults_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/method/wall.get"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": {"count": 0}})),
            )
            .mount(&server)
            .await;

        let gateway = gateway_against(&server);
        let outcome = gateway.request("wall.get", &[]).await.unwrap();

        match outcome {
            ApiOutcome::Payload(payload) => {
                assert_eq!(payload.count, 0);
                assert!(payload.items.is_empty());
            }
            other => panic!("expected payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_envelope_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/method/execute"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let gateway = gateway_against(&server);
        let err = gateway.request("execute", &[]).await.unwrap_err();

        assert!(matches!(err, Error::Upstream { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = VkApiConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = HttpGateway::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config { key: Some(ref k), .. } if k == "base_url"));
    }
}
