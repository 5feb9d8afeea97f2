//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Typed `status` event representation and payload parsing

pub mod events;
pub mod parser;
pub mod signature;

pub use events::{BranchRef, CommitRef, StatusEvent, StatusState};
pub use parser::{parse_webhook, ParseError};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
