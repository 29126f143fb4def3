use crate::domain::encoding::{decode_uri_component, encode_uri_component};

/// Map a provider location (an item's `webUrl`) to its path inside the index.
///
/// The location embeds the index base directory as `marker`; everything after
/// the first occurrence is the in-index path. Each segment is decoded and
/// re-encoded so raw punctuation returned by the provider (`#`) ends up
/// escaped (`%23`) while already escaped segments are left as they are.
///
/// Returns an empty string when the marker is absent. Callers treat an empty
/// path as outside the index.
#[must_use]
pub fn map_absolute_path(raw_location: &str, marker: &str) -> String {
    let Some((_, inside)) = raw_location.split_once(marker) else {
        return String::new();
    };

    inside
        .split('/')
        .map(reencode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn reencode_segment(segment: &str) -> String {
    // Undecodable escapes are kept as literal text.
    match decode_uri_component(segment) {
        Some(decoded) => encode_uri_component(&decoded),
        None => encode_uri_component(segment),
    }
}
