use std::fmt;
use std::fmt::{Debug, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use serde::Deserialize;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOAD_PATH: &str = "content/blog";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add new blog post";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_upload_path() -> String {
    DEFAULT_UPLOAD_PATH.to_string()
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

#[derive(Deserialize, Clone)]
pub struct GitHub {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl GitHub {
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.repo.is_empty() && !self.token.is_empty()
    }
}

impl Default for GitHub {
    fn default() -> Self {
        GitHub {
            username: String::new(),
            repo: String::new(),
            token: String::new(),
            branch: default_branch(),
            api_url: default_api_url(),
        }
    }
}

// Keeps the token out of logs
impl Debug for GitHub {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "***" };
        f.debug_struct("GitHub")
            .field("username", &self.username)
            .field("repo", &self.repo)
            .field("token", &token)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Defaults {
    /// Falls back to the OS user name
    pub author: Option<String>,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            author: None,
            upload_path: default_upload_path(),
            commit_message: default_commit_message(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHub,
    #[serde(default)]
    pub defaults: Defaults,
    pub log: Option<Log>,
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
