// src/render.rs
//! Terminal rendering of a resource listing.
//!
//! Timestamps are shown as wall-clock time in the offset the facilitator sent,
//! and JSON objects keep their wire key order.

use crate::types::{ResourceListing, ResourceRecord};

pub const LAST_UPDATED_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";
const RECORD_SEPARATOR: &str = "------------------------";

pub fn render_listing(listing: &ResourceListing) -> String {
    let mut out = String::new();
    out.push_str("\nDiscovered X402 Resources:\n");
    out.push_str("========================\n\n");
    for (idx, record) in listing.iter().enumerate() {
        out.push_str(&render_record(idx + 1, record));
    }
    out
}

fn render_record(number: usize, r: &ResourceRecord) -> String {
    let accepts = serde_json::to_string_pretty(&r.accepts).unwrap_or_else(|_| "[]".to_string());

    let mut out = format!(
        "Resource {number}:\n  Resource URL: {}\n  Type: {}\n  Last Updated: {}\n  X402 Version: {}\n  Accepts: {accepts}\n",
        r.resource_url,
        r.resource_type,
        r.last_updated.format(LAST_UPDATED_FORMAT),
        r.protocol_version,
    );
    if let Some(meta) = r.metadata.as_ref().filter(|m| !m.is_empty()) {
        let meta = serde_json::to_string_pretty(meta).unwrap_or_else(|_| "{}".to_string());
        out.push_str(&format!("  Metadata: {meta}\n"));
    }
    out.push_str(RECORD_SEPARATOR);
    out.push_str("\n\n");
    out
}
