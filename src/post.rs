use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Local, NaiveDate};

pub const MAX_TAGS: usize = 3;

/// Post being composed. Empty tags are free slots, not values.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "title={}, date={}, author={}, tags=[{}]\ncontent:\n{}",
               self.title,
               self.date,
               self.author,
               self.valid_tags().join(", "),
               self.body
        )
    }
}

impl Post {
    /// Blank form for the given author, dated today.
    pub fn new(author: &str) -> Post {
        Post {
            title: String::new(),
            date: Local::now().date_naive(),
            author: author.to_string(),
            body: String::new(),
            tags: vec![String::new(); MAX_TAGS],
        }
    }

    pub fn is_publishable(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.title)
    }

    pub fn valid_tags(&self) -> Vec<&str> {
        self.tags.iter()
            .map(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn set_tag(&mut self, index: usize, tag: &str) {
        if index >= MAX_TAGS {
            return;
        }
        if self.tags.len() < MAX_TAGS {
            self.tags.resize(MAX_TAGS, String::new());
        }
        self.tags[index] = tag.to_string();
    }

    /// Clears the form after a successful publish. The author is kept.
    pub fn reset(&mut self) {
        self.title.clear();
        self.body.clear();
        self.date = Local::now().date_naive();
        self.tags = vec![String::new(); MAX_TAGS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_three_empty_slots() {
        let post = Post::new("thiago");
        assert_eq!(post.tags, vec!["", "", ""]);
        assert_eq!(post.author, "thiago");
        assert!(!post.is_publishable());
        assert!(post.valid_tags().is_empty());
    }

    #[test]
    fn test_set_tag() {
        let mut post = Post::new("thiago");
        post.set_tag(0, "rust");
        post.set_tag(2, "zola");
        post.set_tag(3, "ignored");
        assert_eq!(post.tags, vec!["rust", "", "zola"]);
        assert_eq!(post.valid_tags(), ["rust", "zola"]);
    }

    #[test]
    fn test_reset_keeps_author() {
        let mut post = Post::new("thiago");
        post.title = "Hello".to_string();
        post.body = "Some text".to_string();
        post.set_tag(1, "rust");
        assert!(post.is_publishable());
        assert_eq!(post.file_name(), "Hello.md");

        post.reset();
        assert_eq!(post, Post::new("thiago"));
    }
}
