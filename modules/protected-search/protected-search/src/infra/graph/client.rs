use async_trait::async_trait;
use protected_search_sdk::{DriveItem, DriveSearchClient, ProviderError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::encode_path;

const SEARCH_SELECT: &str = "id,name,file,folder,parentReference,webUrl";

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    value: Vec<DriveItem>,
}

/// Drive search scoped to the index base directory.
pub struct GraphSearchClient {
    http: reqwest::Client,
    drive_api: String,
    base_directory: String,
}

impl GraphSearchClient {
    #[must_use]
    pub fn new(http: reqwest::Client, drive_api: &str, base_directory: &str) -> Self {
        Self {
            http,
            drive_api: drive_api.trim_end_matches('/').to_owned(),
            base_directory: base_directory.to_owned(),
        }
    }

    fn search_url(&self, sanitized_query: &str) -> String {
        let root = encode_path(&self.base_directory, "/");
        let root = if root.is_empty() {
            root
        } else {
            format!("{root}:")
        };
        format!(
            "{}/root{root}/search(q='{sanitized_query}')",
            self.drive_api
        )
    }
}

#[async_trait]
impl DriveSearchClient for GraphSearchClient {
    #[instrument(skip(self, sanitized_query, access_token))]
    async fn search(
        &self,
        sanitized_query: &str,
        top: u32,
        access_token: &SecretString,
    ) -> Result<Vec<DriveItem>, ProviderError> {
        let url = self.search_url(sanitized_query);
        debug!("Calling Graph search");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token.expose_secret())
            .query(&[("select", SEARCH_SELECT), ("top", &top.to_string())])
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok().and_then(|text| upstream_body(&text));
            return Err(ProviderError::upstream(status.as_u16(), body));
        }

        let page: SearchPage = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;
        Ok(page.value)
    }
}

/// Upstream error payload: JSON when it parses, the raw text otherwise.
fn upstream_body(text: &str) -> Option<serde_json::Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_owned())),
    )
}
