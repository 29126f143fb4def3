use async_trait::async_trait;
use protected_search_sdk::{AuthCheckOutcome, ProviderError, RouteVerifierClient};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::encode_path;
use crate::domain::routes::RouteMatcher;
use crate::domain::token::compare_hashed_token;

/// Name of the file holding a restricted subtree's secret.
pub const PASSWORD_FILE: &str = ".password";

const PASSWORD_SELECT: &str = "@microsoft.graph.downloadUrl,file";

#[derive(Debug, Deserialize)]
struct PasswordFileMeta {
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    download_url: Option<String>,
}

/// Verifies caller tokens against the `.password` file stored at the root of
/// each restricted subtree.
///
/// Outcomes: 200 when the hashes match or the path is unrestricted, 401 when
/// the token is missing or wrong, 404 when the subtree has no `.password`
/// file, 500 for any other provider answer.
pub struct DotPasswordVerifier {
    http: reqwest::Client,
    drive_api: String,
    base_directory: String,
    matcher: RouteMatcher,
}

impl DotPasswordVerifier {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        drive_api: &str,
        base_directory: &str,
        matcher: RouteMatcher,
    ) -> Self {
        Self {
            http,
            drive_api: drive_api.trim_end_matches('/').to_owned(),
            base_directory: base_directory.to_owned(),
            matcher,
        }
    }

    fn password_url(&self, route: &str) -> String {
        let file = format!("{}/{PASSWORD_FILE}", route.trim_end_matches('/'));
        format!(
            "{}/root{}",
            self.drive_api,
            encode_path(&self.base_directory, &file)
        )
    }

    async fn fetch_stored_secret(
        &self,
        route: &str,
        access_token: &SecretString,
    ) -> Result<Result<String, AuthCheckOutcome>, ProviderError> {
        let response = self
            .http
            .get(self.password_url(route))
            .bearer_auth(access_token.expose_secret())
            .query(&[("select", PASSWORD_SELECT)])
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Ok(Err(AuthCheckOutcome::not_found(
                    "No password file set for this route.",
                )));
            }
            status if !status.is_success() => {
                warn!(route, status = status.as_u16(), "Password file lookup failed");
                return Ok(Err(AuthCheckOutcome::internal("Internal server error.")));
            }
            _ => {}
        }

        let meta: PasswordFileMeta = response
            .json()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;
        let Some(download_url) = meta.download_url else {
            warn!(route, "Password file has no download URL");
            return Ok(Err(AuthCheckOutcome::internal("Internal server error.")));
        };

        let content = self
            .http
            .get(&download_url)
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.to_string()))?;
        if !content.status().is_success() {
            return Err(ProviderError::upstream(content.status().as_u16(), None));
        }

        let secret = content
            .text()
            .await
            .map_err(|e| ProviderError::decode(e.to_string()))?;
        Ok(Ok(secret))
    }
}

#[async_trait]
impl RouteVerifierClient for DotPasswordVerifier {
    #[instrument(skip(self, access_token, hashed_token))]
    async fn check_auth_route(
        &self,
        path: &str,
        access_token: &SecretString,
        hashed_token: &str,
    ) -> Result<AuthCheckOutcome, ProviderError> {
        let route = self.matcher.match_protected_route(path);
        if route.is_empty() {
            return Ok(AuthCheckOutcome::ok());
        }
        if hashed_token.is_empty() {
            return Ok(AuthCheckOutcome::unauthorized("Password required."));
        }

        let secret = match self.fetch_stored_secret(route, access_token).await? {
            Ok(secret) => secret,
            Err(outcome) => return Ok(outcome),
        };

        if compare_hashed_token(hashed_token, &secret) {
            debug!(route, "Caller token accepted");
            Ok(AuthCheckOutcome::ok())
        } else {
            Ok(AuthCheckOutcome::unauthorized("Password required."))
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::token::hash_token;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier(server: &MockServer) -> DotPasswordVerifier {
        DotPasswordVerifier::new(
            reqwest::Client::new(),
            &format!("{}/v1.0/me/drive", server.uri()),
            "/",
            RouteMatcher::new(["/secret"]),
        )
    }

    async fn mount_password(server: &MockServer, secret: &str) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/v1\.0/me/drive/root:%2Fsecret%2F\.password$"))
            .and(header("authorization", "Bearer graph-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "@microsoft.graph.downloadUrl": format!("{}/download/pw", server.uri()),
                "file": {}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/download/pw"))
            .respond_with(ResponseTemplate::new(200).set_body_string(secret))
            .mount(server)
            .await;
    }

    fn graph_token() -> SecretString {
        SecretString::from("graph-token")
    }

    #[test]
    fn password_url_lives_under_route() {
        let v = DotPasswordVerifier::new(
            reqwest::Client::new(),
            "https://g/v1.0/me/drive/",
            "/Public",
            RouteMatcher::new(["/top secret"]),
        );
        assert_eq!(
            v.password_url("/top secret"),
            "https://g/v1.0/me/drive/root:%2FPublic%2Ftop%20secret%2F.password"
        );
    }

    #[tokio::test]
    async fn matching_hash_is_accepted() {
        let server = MockServer::start().await;
        mount_password(&server, "s3cret\n").await;

        let outcome = verifier(&server)
            .check_auth_route("/secret/a.txt", &graph_token(), &hash_token("s3cret"))
            .await
            .unwrap();

        assert_eq!(outcome, AuthCheckOutcome::ok());
    }

    #[tokio::test]
    async fn wrong_hash_is_unauthorized() {
        let server = MockServer::start().await;
        mount_password(&server, "s3cret").await;

        let outcome = verifier(&server)
            .check_auth_route("/secret/a.txt", &graph_token(), &hash_token("guess"))
            .await
            .unwrap();

        assert_eq!(outcome.code, 401);
    }

    #[tokio::test]
    async fn missing_password_file_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = verifier(&server)
            .check_auth_route("/secret/a.txt", &graph_token(), &hash_token("s3cret"))
            .await
            .unwrap();

        assert_eq!(outcome.code, 404);
    }

    #[tokio::test]
    async fn unrestricted_path_needs_no_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = verifier(&server)
            .check_auth_route("/public/a.txt", &graph_token(), "")
            .await
            .unwrap();

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn empty_token_is_rejected_without_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = verifier(&server)
            .check_auth_route("/secret/a.txt", &graph_token(), "")
            .await
            .unwrap();

        assert_eq!(outcome.code, 401);
    }
}
