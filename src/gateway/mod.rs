//! Access to a path-addressed, versioned remote store of post files.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GatewayError;

pub mod github;
#[cfg(test)]
pub mod fake;
#[cfg(test)]
pub mod stub_server;

pub const MARKDOWN_EXTENSION: &str = ".md";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    /// Symlinks and submodules
    #[serde(other)]
    Other,
}

/// One item of a directory listing.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteEntry {
    pub name: String,
    pub path: String,
    /// Opaque locator handed back to [`ContentGateway::read_file`].
    #[serde(rename = "url")]
    pub reference: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl RemoteEntry {
    pub fn is_markdown(&self) -> bool {
        self.name.ends_with(MARKDOWN_EXTENSION)
    }
}

#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Lists the markdown entries under `path`.
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, GatewayError>;

    /// Fetches and decodes the text of a file.
    async fn read_file(&self, reference: &str) -> Result<String, GatewayError>;

    /// Creates or replaces `path/filename` with a single commit.
    async fn write_file(&self, path: &str, filename: &str, content: &str, commit_message: &str) -> Result<(), GatewayError>;

    /// Reference of the file at `path`, usable with [`ContentGateway::read_file`].
    fn reference_for(&self, path: &str) -> String;
}
