//! Display helpers for document lists.

use crate::core::paths::GATEWAY_URL;

/// `2048` -> `"2.0 KB"`
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// `0x1234...abcd`. Addresses too short to shorten come back unchanged.
pub fn truncate_address(address: &str) -> String {
    elide(address, 6, 4)
}

/// First 12 and last 8 characters of a content identifier.
pub fn truncate_hash(hash: &str) -> String {
    elide(hash, 12, 8)
}

pub fn gateway_url(hash: &str) -> String {
    format!("{}/{}", GATEWAY_URL, hash)
}

fn elide(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return value.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}
