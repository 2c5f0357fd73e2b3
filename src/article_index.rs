use std::sync::Arc;

use spdlog::{debug, info, warn};
use tokio::task::JoinSet;

use crate::content::front_matter::extract_title;
use crate::error::GatewayError;
use crate::gateway::{ContentGateway, EntryType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    pub title: String,
    pub path: String,
}

/// Articles found under `path`, sorted by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleIndex {
    pub path: String,
    pub articles: Vec<ArticleSummary>,
}

impl ArticleIndex {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

pub struct ArticleIndexBuilder {
    gateway: Arc<dyn ContentGateway>,
}

impl ArticleIndexBuilder {
    pub fn new(gateway: Arc<dyn ContentGateway>) -> Self {
        ArticleIndexBuilder { gateway }
    }

    /// Lists `path` and fetches every markdown file in parallel.
    ///
    /// Only a failed listing fails the build. Files that cannot be fetched, or whose title
    /// cannot be found, are logged and left out of the index.
    pub async fn build(&self, path: &str) -> Result<ArticleIndex, GatewayError> {
        info!("Fetching articles from {}", path);
        let entries = self.gateway.list(path).await?;

        let mut fetches = JoinSet::new();
        for entry in entries {
            if entry.entry_type != EntryType::File || !entry.is_markdown() {
                continue;
            }
            let gateway = Arc::clone(&self.gateway);
            fetches.spawn(async move {
                let content = gateway.read_file(&entry.reference).await;
                (entry, content)
            });
        }

        let mut articles = vec![];
        while let Some(fetched) = fetches.join_next().await {
            let (entry, content) = match fetched {
                Ok(x) => x,
                Err(e) => {
                    warn!("Article fetch task failed: {}", e);
                    continue;
                }
            };

            match content {
                Ok(content) => match extract_title(&content) {
                    Some(title) => {
                        debug!("Found article {} at {}", title, entry.path);
                        articles.push(ArticleSummary { title, path: entry.path });
                    }
                    None => warn!("No title in front matter of {}", entry.path),
                },
                Err(e) => warn!("Error fetching {}: {}", entry.path, e),
            }
        }

        articles.sort_by(|a, b| a.title.cmp(&b.title));
        info!("Found {} articles in {}", articles.len(), path);

        Ok(ArticleIndex {
            path: path.to_string(),
            articles,
        })
    }
}
