use std::fmt::Write;

use lazy_static::lazy_static;
use regex::Regex;

use crate::post::Post;

/// Front matter fence. Zola writes TOML between `+++` lines, other generators YAML between `---`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delimiter {
    Toml,
    Yaml,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Toml => "+++",
            Delimiter::Yaml => "---",
        }
    }

    fn matches(&self, line: &str) -> bool {
        line.trim() == self.as_str()
    }
}

enum Block {
    Before,
    Inside,
    After,
}

/// Serializes a post as a Zola document.
///
/// Values are written as they are, a double quote inside the title, author or a tag
/// produces a broken header.
pub fn encode(post: &Post) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = \"{}\"", post.title);
    let _ = writeln!(&mut buf, "date = {}", post.date.format("%Y-%m-%d"));
    let _ = writeln!(&mut buf, "authors = [\"{}\"]", post.author);
    let tags = post.valid_tags();
    if !tags.is_empty() {
        let _ = writeln!(&mut buf, "[taxonomies]");
        let _ = writeln!(&mut buf, "tags = [\"{}\"]", tags.join("\", \""));
    }
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "{}", post.body);
    buf
}

/// Sniffs the first line only. Anything but `+++` is taken as YAML.
pub fn detect_delimiter(document: &str) -> Delimiter {
    match document.lines().next() {
        Some(line) if Delimiter::Toml.matches(line) => Delimiter::Toml,
        _ => Delimiter::Yaml,
    }
}

/// Removes the front matter block and returns the trimmed body.
/// A document without a complete block is returned unchanged.
pub fn strip_front_matter(document: &str) -> String {
    let delimiter = detect_delimiter(document);
    let mut state = Block::Before;
    let mut kept: Vec<&str> = vec![];

    for line in document.lines() {
        match state {
            Block::Before if delimiter.matches(line) => state = Block::Inside,
            Block::Before => kept.push(line),
            Block::Inside if delimiter.matches(line) => state = Block::After,
            Block::Inside => {}
            Block::After => kept.push(line),
        }
    }

    match state {
        Block::After => kept.join("\n").trim().to_string(),
        _ => document.to_string(),
    }
}

/// Title from either dialect. Only the first header line mentioning `title` is tried.
pub fn extract_title(document: &str) -> Option<String> {
    let header = header_lines(document);
    let line = header.into_iter().find(|line| line.contains("title"))?;

    extract_toml_title(line).or_else(|| extract_yaml_title(line))
}

fn header_lines(document: &str) -> Vec<&str> {
    let delimiter = detect_delimiter(document);
    let mut lines = document.lines();
    let mut header = vec![];

    if !lines.by_ref().any(|line| delimiter.matches(line)) {
        return header;
    }
    for line in lines {
        if delimiter.matches(line) {
            return header;
        }
        header.push(line);
    }

    // Block never closed
    vec![]
}

fn extract_toml_title(line: &str) -> Option<String> {
    lazy_static! {
        static ref TOML_TITLE_REGEX: Regex = Regex::new(
            r#"title\s*=\s*(?:"(?P<double>[^"]*)"|'(?P<single>[^']*)')"#
        ).unwrap();
    }

    TOML_TITLE_REGEX.captures(line).and_then(|cap| {
        cap.name("double")
            .or_else(|| cap.name("single"))
            .map(|title| title.as_str().trim().to_string())
    })
}

fn extract_yaml_title(line: &str) -> Option<String> {
    lazy_static! {
        static ref YAML_TITLE_REGEX: Regex = Regex::new(r"title:(?P<title>.*)").unwrap();
    }

    YAML_TITLE_REGEX.captures(line).and_then(|cap| {
        cap.name("title").map(|title| {
            title.as_str()
                .trim()
                .chars()
                .filter(|&c| c != '"' && c != '\'')
                .collect()
        })
    })
}
