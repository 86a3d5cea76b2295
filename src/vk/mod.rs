//! VK API boundary — transport, error classification, batch scripts,
//! and wire-item adaptation.
//!
//! Everything above this module works with [`WallPayload`] and [`Post`]
//! values and a closed error taxonomy; nothing above it inspects raw
//! envelopes or error codes.
//!
//! [`Post`]: crate::types::Post

mod classify;
pub(crate) mod parse;
pub mod script;

mod gateway;

pub use gateway::{ApiOutcome, HttpGateway, RemoteError, VkGateway, WallPayload};

use crate::config::RetryConfig;
use crate::error::Result;
use crate::retry::Backoff;

use classify::Disposition;

/// Issue one API call under the classifier's retry loop.
///
/// Rate-limit refusals are absorbed here: the call is re-issued with
/// identical parameters after a backoff sleep, indefinitely, and is
/// never surfaced to the caller. Terminal classifications abort with
/// the mapped error. `domain` is the account in flight, used only for
/// not-found messages and diagnostics.
pub(crate) async fn request_with_retry(
    gateway: &dyn VkGateway,
    method: &str,
    params: &[(&str, String)],
    domain: Option<&str>,
    retry: &RetryConfig,
) -> Result<WallPayload> {
    let mut backoff = Backoff::new(retry);
    let mut reissues = 0u32;

    loop {
        match gateway.request(method, params).await? {
            ApiOutcome::Payload(payload) => {
                if reissues > 0 {
                    tracing::info!(
                        method = method,
                        reissues = reissues,
                        "Call succeeded after rate-limit backoff"
                    );
                }
                return Ok(payload);
            }
            ApiOutcome::Remote(remote) => match classify::classify(remote, domain) {
                Disposition::RetryAfterBackoff => {
                    reissues += 1;
                    let delay = backoff.next_delay();
                    tracing::debug!(
                        method = method,
                        reissue = reissues,
                        delay_ms = delay.as_millis(),
                        "Backing off before re-issuing call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Disposition::Fail(error) => return Err(error),
            },
        }
    }
}
