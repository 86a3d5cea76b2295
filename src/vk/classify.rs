//! Error classifier — maps a raw [`RemoteError`] to a closed set of
//! outcomes right at the boundary, so the rest of the engine matches on
//! an enumeration instead of re-inspecting codes and messages.

use crate::error::Error;

use super::gateway::RemoteError;

/// "Too many requests per second" — routine under concurrent fan-out.
pub(crate) const CODE_RATE_LIMITED: i64 = 6;

/// "One of the parameters specified was missing or invalid" — what the
/// API reports for a wall address that does not resolve.
pub(crate) const CODE_INVALID_PARAM: i64 = 100;

/// The message substring distinguishing an unresolved address from
/// other parameter problems under [`CODE_INVALID_PARAM`].
const UNRESOLVED_OWNER_MARKER: &str = "owner_id is undefined";

/// What to do with a failed call.
#[derive(Debug)]
pub(crate) enum Disposition {
    /// Transient: sleep, then re-issue the identical call
    RetryAfterBackoff,
    /// Terminal: abort the fetch with this error
    Fail(Error),
}

/// Classify a remote error against the in-flight context.
///
/// `domain` is the account identifier the failed call was querying, when
/// known; it is used only to produce a message naming the account.
pub(crate) fn classify(remote: RemoteError, domain: Option<&str>) -> Disposition {
    match remote.code {
        CODE_RATE_LIMITED => {
            tracing::debug!(message = %remote.message, "Rate limited, will re-issue");
            Disposition::RetryAfterBackoff
        }
        CODE_INVALID_PARAM => {
            tracing::info!(
                code = remote.code,
                message = %remote.message,
                domain = domain.unwrap_or("<unknown>"),
                "Wall not found"
            );
            let message = match domain {
                Some(domain) if remote.message.contains(UNRESOLVED_OWNER_MARKER) => {
                    format!("no VK account or community found at \"{domain}\"")
                }
                _ => remote.message,
            };
            Disposition::Fail(Error::NotFound(message))
        }
        _ => {
            tracing::error!(code = remote.code, message = %remote.message, "VK API failure");
            Disposition::Fail(Error::Upstream {
                code: remote.code,
                message: remote.message,
            })
        }
    }
}
