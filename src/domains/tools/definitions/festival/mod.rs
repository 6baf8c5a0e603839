//! Edinburgh festival search tools.
//!
//! - `events`: search festival events
//! - `venues`: search festival venues
//!
//! Each tool has handlers for both HTTP and STDIO/TCP transports.

pub mod common;
pub mod events;
pub mod venues;

pub use events::{FestivalEventsParams, FestivalEventsTool};
pub use venues::{FestivalVenuesParams, FestivalVenuesTool};
