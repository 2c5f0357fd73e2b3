pub mod front_matter;
pub mod markdown_preview;

/// An article opened from the repository, front matter removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleContent {
    pub title: String,
    pub content: String,
}
