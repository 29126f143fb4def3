//! Microsoft Graph adapters for the drive backing the index.

mod client;
mod verifier;

pub use client::GraphSearchClient;
pub use verifier::DotPasswordVerifier;

use crate::domain::encoding::encode_uri_component;

/// Build the `root` addressing suffix for `path` inside `base_directory`.
///
/// Returns `""` when the joined path is the drive root, otherwise
/// `:<percent-encoded absolute path>` without a trailing slash.
#[must_use]
pub fn encode_path(base_directory: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base_directory.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return String::new();
    }

    let absolute = if base_directory.starts_with('/') || base_directory.is_empty() {
        format!("/{}", segments.join("/"))
    } else {
        segments.join("/")
    };
    format!(":{}", encode_uri_component(&absolute))
}
