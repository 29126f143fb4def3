use protected_search_sdk::{FileFacet, FolderFacet, SearchResultItem};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of the search endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search text. Absent or empty returns an empty list.
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileFacetDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacetDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<u64>,
}

/// One admitted search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItemDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileFacetDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderFacetDto>,
    /// Percent-encoded path of the item inside the index
    pub path: String,
    pub web_url: String,
}

/// Error body returned when the upstream provider fails
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchErrorDto {
    /// Upstream error payload, or a generic message
    #[schema(value_type = Object)]
    pub error: serde_json::Value,
}

impl From<FileFacet> for FileFacetDto {
    fn from(f: FileFacet) -> Self {
        Self {
            mime_type: f.mime_type,
        }
    }
}

impl From<FolderFacet> for FolderFacetDto {
    fn from(f: FolderFacet) -> Self {
        Self {
            child_count: f.child_count,
        }
    }
}

impl From<SearchResultItem> for SearchResultItemDto {
    fn from(item: SearchResultItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            file: item.file.map(Into::into),
            folder: item.folder.map(Into::into),
            path: item.path,
            web_url: item.web_url,
        }
    }
}
