use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use spdlog::{debug, info};

use crate::config::GitHub;
use crate::error::GatewayError;
use crate::gateway::{ContentGateway, RemoteEntry};

const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Deserialize)]
struct FileContent {
    sha: Option<String>,
    content: Option<String>,
}

#[derive(Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Deserialize)]
struct RemoteMessage {
    message: Option<String>,
}

/// Gateway backed by the GitHub Contents API.
pub struct GitHubGateway {
    client: Client,
    settings: GitHub,
}

impl GitHubGateway {
    pub fn new(settings: GitHub) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(concat!("zolapost/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubGateway::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: GitHub) -> Self {
        GitHubGateway { client, settings }
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/contents/{}",
                self.settings.api_url.trim_end_matches('/'),
                self.settings.username,
                self.settings.repo,
                path.trim_matches('/'))
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.settings.is_configured() {
            Ok(())
        } else {
            Err(GatewayError::NotConfigured)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
            .bearer_auth(&self.settings.token)
            .header(ACCEPT, GITHUB_JSON)
    }

    /// Current blob sha of a file, `None` when it does not exist yet.
    async fn existing_sha(&self, url: &str) -> Result<Option<String>, GatewayError> {
        let response = self.request(Method::GET, url)
            .query(&[("ref", self.settings.branch.as_str())])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = check_status(response).await?.text().await?;
        let file: FileContent = serde_json::from_str(&body)?;
        Ok(file.sha)
    }
}

#[async_trait]
impl ContentGateway for GitHubGateway {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, GatewayError> {
        self.ensure_configured()?;

        let url = self.contents_url(path);
        debug!("Listing {}", url);
        let response = self.request(Method::GET, &url)
            .query(&[("ref", self.settings.branch.as_str())])
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        let entries: Vec<RemoteEntry> = serde_json::from_str(&body)?;

        Ok(entries.into_iter()
            .filter(|entry| entry.is_markdown())
            .collect())
    }

    async fn read_file(&self, reference: &str) -> Result<String, GatewayError> {
        self.ensure_configured()?;

        debug!("Fetching {}", reference);
        let response = self.request(Method::GET, reference).send().await?;
        let body = check_status(response).await?.text().await?;
        let file: FileContent = serde_json::from_str(&body)?;

        match file.content {
            Some(encoded) => decode_content(&encoded),
            None => Err(GatewayError::Decode(format!("no content in {}", reference))),
        }
    }

    async fn write_file(&self, path: &str, filename: &str, content: &str, commit_message: &str) -> Result<(), GatewayError> {
        self.ensure_configured()?;

        let file_path = format!("{}/{}", path.trim_matches('/'), filename);
        let url = self.contents_url(&file_path);
        let sha = self.existing_sha(&url).await?;
        if sha.is_some() {
            info!("Replacing existing file {}", file_path);
        }

        let request = WriteRequest {
            message: commit_message,
            content: encode_content(content),
            branch: &self.settings.branch,
            sha,
        };
        let response = self.request(Method::PUT, &url)
            .json(&request)
            .send()
            .await?;
        check_status(response).await?;

        info!("Uploaded {} to branch {}", file_path, self.settings.branch);
        Ok(())
    }

    fn reference_for(&self, path: &str) -> String {
        format!("{}?ref={}", self.contents_url(path), self.settings.branch)
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::RemoteRejected(rejection_message(status, &body)))
}

fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<RemoteMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
}

/// GitHub wraps base64 payloads every 60 characters.
pub fn decode_content(encoded: &str) -> Result<String, GatewayError> {
    let cleaned: String = encoded.chars()
        .filter(|&c| c != '\n' && c != '\r')
        .collect();
    let bytes = STANDARD.decode(cleaned)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn encode_content(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}
