//! HMAC-SHA1 request signing for the Edinburgh Festivals API.
//!
//! The API authenticates a request by a signature over the path and query:
//! 1. Percent-encode the parameters in caller order into a canonical query
//! 2. HMAC-SHA1(`/{path}?{query}`, secret), rendered as lowercase hex
//! 3. Append `&signature={hex}` to the query
//!
//! The verifier recomputes the signature from the query string as received,
//! so the parameter order used here is the order on the wire. Reordering
//! parameters changes the signature.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::error::{ClientError, ClientResult};
use super::params::QueryParams;

type HmacSha1 = Hmac<Sha1>;

/// A fully signed request, computed fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Resource path without leading slash (e.g. `events`).
    pub path: String,
    /// Percent-encoded `key=value&...` string, in caller order.
    pub canonical_query: String,
    /// Lowercase hex HMAC-SHA1 digest.
    pub signature: String,
    /// `{base_url}/{path}?{canonical_query}&signature={signature}`.
    pub full_url: String,
}

/// Sign a request for `path` with the given parameters and shared secret.
///
/// # Example
///
/// ```
/// use edfest_mcp_server::edfest::{QueryParams, sign};
///
/// let params = QueryParams::new().with("key", "test_key").with("festival", "test");
/// let signed = sign("https://api.edinburghfestivalcity.com", "events", &params, b"test_secret")?;
/// assert_eq!(signed.canonical_query, "key=test_key&festival=test");
/// assert_eq!(signed.signature, "7aabebba86f2a00631255168dab1ab3761121176");
/// # Ok::<(), edfest_mcp_server::edfest::ClientError>(())
/// ```
pub fn sign(
    base_url: &str,
    path: &str,
    params: &QueryParams,
    secret: &[u8],
) -> ClientResult<SignedRequest> {
    let path = path.trim_start_matches('/');
    let canonical_query = canonical_query(params)?;
    let signing_input = format!("/{path}?{canonical_query}");
    let signature = compute_signature(secret, &signing_input);
    let full_url = format!(
        "{}/{path}?{canonical_query}&signature={signature}",
        base_url.trim_end_matches('/')
    );

    Ok(SignedRequest {
        path: path.to_string(),
        canonical_query,
        signature,
        full_url,
    })
}

/// Build the canonical query string.
///
/// Uses form encoding (space as `+`) with the unreserved set
/// `A-Z a-z 0-9 _ . - ~`, which is what the API's reference client sends.
/// `serde_urlencoded` leaves `*` bare and escapes `~`, so those two are
/// adjusted afterwards. A literal `%` is always escaped to `%25` first, so
/// the `%7E` fix-up cannot touch user data.
pub fn canonical_query(params: &QueryParams) -> ClientResult<String> {
    let pairs: Vec<(&str, String)> = params.iter().map(|(k, v)| (k, v.to_string())).collect();

    let encoded = serde_urlencoded::to_string(&pairs)
        .map_err(|e| ClientError::encoding(format!("cannot encode query: {e}")))?;

    Ok(encoded.replace('*', "%2A").replace("%7E", "~"))
}

/// Compute the lowercase hex HMAC-SHA1 of `message` keyed by `secret`.
fn compute_signature(secret: &[u8], message: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC can take a key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
