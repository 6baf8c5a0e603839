//! Edinburgh Festivals listings API client.
//!
//! Requests are authenticated by an HMAC-SHA1 signature over the path and
//! query string:
//!
//! - `params`: insertion-ordered query parameters
//! - `policy`: parameter rewriting (key injection, fringe gate, wildcard
//!   years, empty values, timestamps, pagination)
//! - `signer`: canonical query and signature
//! - `diagnostics`: best-effort record of outgoing URLs
//! - `client`: [`FestivalClient`], which ties the above to an HTTP call

pub mod client;
pub mod diagnostics;
mod error;
pub mod params;
pub mod policy;
pub mod signer;

pub use client::{
    ApiResponse, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FestivalClient, Mode,
    Resource,
};
pub use diagnostics::{DiagnosticSink, FileSink, MemorySink, NoopSink};
pub use error::{ClientError, ClientResult};
pub use params::{QueryParams, QueryValue};
pub use policy::Pagination;
pub use signer::{SignedRequest, sign};
