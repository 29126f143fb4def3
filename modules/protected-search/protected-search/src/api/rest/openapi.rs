use utoipa::OpenApi;

use crate::api::rest::dto::{FileFacetDto, FolderFacetDto, SearchErrorDto, SearchResultItemDto};

#[derive(OpenApi)]
#[openapi(
    info(title = "Protected Search API", description = "Authorization-aware drive search"),
    paths(crate::api::rest::handlers::search),
    components(schemas(SearchResultItemDto, FileFacetDto, FolderFacetDto, SearchErrorDto)),
    tags((name = "Search", description = "Drive index search"))
)]
pub struct ApiDoc;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn document_lists_search_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/search"));
    }
}
