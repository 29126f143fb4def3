use crate::domain::encoding::encode_uri_component;

/// Escape caller search text for the provider's `search(q='...')` expression.
///
/// Single quotes are doubled, angle brackets become HTML entities, `?` and `/`
/// become spaces (the provider grammar has no escape for them), and the result
/// is percent-encoded as a URI component.
#[must_use]
pub fn sanitize_query(query: &str) -> String {
    let sanitized = query
        .replace('\'', "''")
        .replace('<', " &lt; ")
        .replace('>', " &gt; ")
        .replace(['?', '/'], " ");
    encode_uri_component(&sanitized)
}
