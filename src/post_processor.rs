use spdlog::info;

use crate::content::ArticleContent;
use crate::content::front_matter::{encode, strip_front_matter};
use crate::error::{GatewayError, PublishError};
use crate::gateway::ContentGateway;
use crate::post::Post;

/// Repository paths are relative, `/content/blog` becomes `content/blog`.
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Uploads the post as `<path>/<title>.md` and returns the message shown to the user.
pub async fn publish(gateway: &dyn ContentGateway, post: &Post, path: &str, commit_message: &str) -> Result<String, PublishError> {
    if !post.is_publishable() {
        return Err(PublishError::EmptyTitle);
    }

    let document = encode(post);
    let file_name = post.file_name();
    info!("Publishing {} to {}", file_name, path);
    gateway.write_file(normalize_path(path), &file_name, &document, commit_message).await?;

    Ok(format!("Successfully uploaded to {}!", path))
}

/// Reads an article by its repository path, without its front matter.
pub async fn open_article(gateway: &dyn ContentGateway, path: &str, title: &str) -> Result<ArticleContent, GatewayError> {
    let reference = gateway.reference_for(normalize_path(path));
    let document = gateway.read_file(&reference).await?;

    Ok(ArticleContent {
        title: title.to_string(),
        content: strip_front_matter(&document),
    })
}
