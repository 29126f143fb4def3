//! Models exchanged between the search pipeline and its collaborators.

use serde::{Deserialize, Serialize};

/// `file` facet of a drive item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFacet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// `folder` facet of a drive item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFacet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_count: Option<u64>,
}

/// Location of the item's parent as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Raw search hit, in the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderFacet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_reference: Option<ParentReference>,
    #[serde(default)]
    pub web_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Folder,
}

/// A search hit owned by one request.
///
/// `path` is empty until the pipeline maps `web_url` into the index; an empty
/// path after mapping means the item lies outside the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub file: Option<FileFacet>,
    pub folder: Option<FolderFacet>,
    pub web_url: String,
    pub path: String,
}

impl From<DriveItem> for SearchResultItem {
    fn from(item: DriveItem) -> Self {
        let kind = if item.folder.is_some() {
            ItemKind::Folder
        } else {
            ItemKind::File
        };
        Self {
            id: item.id,
            name: item.name,
            kind,
            file: item.file,
            folder: item.folder,
            web_url: item.web_url,
            path: String::new(),
        }
    }
}

/// A caller's claim of access to one restricted subtree.
///
/// `token` is always the hex digest of the caller's secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub path: String,
    pub token: String,
}

impl TokenEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            token: token.into(),
        }
    }
}

/// Verifier decision for one `(path, access token, hashed token)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCheckOutcome {
    pub code: u16,
    pub message: String,
}

impl AuthCheckOutcome {
    pub const OK: u16 = 200;

    #[must_use]
    pub fn ok() -> Self {
        Self {
            code: Self::OK,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: 401,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: 404,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: 500,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == Self::OK
    }
}
