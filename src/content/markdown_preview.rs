use std::io;
use std::io::ErrorKind;

use markdown::Options;

use crate::content::ArticleContent;
use crate::content::front_matter::strip_front_matter;

pub fn render_markdown(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

/// Renders the body of a document as HTML, ignoring its front matter.
pub fn render_preview(document: &str) -> io::Result<String> {
    render_markdown(&strip_front_matter(document))
}

/// Article as shown when opened: its title as a heading, then the body.
pub fn render_article(article: &ArticleContent) -> io::Result<String> {
    render_markdown(&format!("# {}\n\n{}", article.title, article.content))
}
