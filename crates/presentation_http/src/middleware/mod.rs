//! HTTP middleware components

pub mod request_tracking;

pub use request_tracking::{REQUEST_ID_HEADER, RequestId, track_requests};
