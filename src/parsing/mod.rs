//! Shared parsing utilities.
//!
//! Timestamp recognition and WhatsApp phrase tables used by the format
//! parsers in [`crate::parsers`].

pub mod timestamp;
pub mod whatsapp;

// Re-export commonly used items
pub use timestamp::{parse_iso8601, parse_timestamp};
pub use whatsapp::{extract_group_name, extract_mention, is_system_notice, is_system_phrase};
