//! Adapter implementations for port traits.
//!
//! - [`live`]: real system clock, disk and Habitica HTTP API.
//! - [`recording`]: wraps live adapters and appends every call to a cassette.
//! - [`replaying`]: serves a cassette back in order.

pub mod live;
pub mod recording;
pub mod replaying;
