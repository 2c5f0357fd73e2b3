use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::{fs, io};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spdlog::{debug, warn};

use zolapost::article_index::ArticleIndexBuilder;
use zolapost::config::Config;
use zolapost::content::front_matter::encode;
use zolapost::content::markdown_preview::{render_article, render_preview};
use zolapost::gateway::github::GitHubGateway;
use zolapost::logger::configure_logger;
use zolapost::post::{Post, MAX_TAGS};
use zolapost::post_processor::{open_article, publish};
use zolapost::util::os_helper::default_author;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "zolapost.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a new post to the repository
    Publish(PostArgs),
    /// Print the document that would be uploaded
    Source(PostArgs),
    /// Render the markdown of a file as HTML
    Preview {
        /// Markdown file, `-` for stdin
        #[arg(short, long)]
        body_file: String,
    },
    /// List the articles under a repository path
    List {
        /// Repository path. Defaults to the configured upload path
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Print an article rendered as HTML
    Read {
        #[arg(short, long)]
        path: String,
        #[arg(short, long)]
        title: Option<String>,
        /// Print the markdown without rendering it
        #[arg(long)]
        raw: bool,
    },
    /// Show the GitHub settings
    Settings,
}

impl Command {
    /// Commands that talk to the repository and cannot run without a configuration file.
    fn needs_repository(&self) -> bool {
        matches!(self, Command::Publish(_) | Command::List { .. } | Command::Read { .. })
    }
}

#[derive(Args, Debug)]
struct PostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, the configured author or the OS user real name is used
    #[arg(short, long)]
    author: Option<String>,

    /// Post date, yyyy-mm-dd. Defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Up to three tags
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Markdown body, `-` for stdin
    #[arg(short, long)]
    body_file: String,

    /// Repository path. Defaults to the configured upload path
    #[arg(short, long)]
    path: Option<String>,
}

fn read_body(body_file: &str) -> Result<String> {
    if body_file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Error reading body from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(body_file).with_context(|| format!("Error reading {}", body_file))
}

fn build_post(args: &PostArgs, config: &Config) -> Result<Post> {
    if args.tags.len() > MAX_TAGS {
        bail!("At most {} tags are allowed", MAX_TAGS);
    }

    let author = args.author.clone()
        .unwrap_or_else(|| default_author(config.defaults.author.as_deref()));
    let mut post = Post::new(&author);
    post.title = args.title.clone();
    if let Some(date) = args.date {
        post.date = date;
    }
    post.body = read_body(&args.body_file)?;
    for (i, tag) in args.tags.iter().enumerate() {
        post.set_tag(i, tag);
    }

    Ok(post)
}

async fn run(command: Command, config: Config) -> Result<()> {
    let upload_path = config.defaults.upload_path.clone();

    match command {
        Command::Source(args) => {
            let post = build_post(&args, &config)?;
            print!("{}", encode(&post));
        }
        Command::Preview { body_file } => {
            let document = read_body(&body_file)?;
            println!("{}", render_preview(&document)?);
        }
        Command::Settings => {
            println!("{:#?}", config.github);
            if config.github.is_configured() {
                println!("GitHub settings are complete");
            } else {
                println!("GitHub settings not configured. Username, repo and token are required");
            }
        }
        Command::Publish(args) => {
            let post = build_post(&args, &config)?;
            let path = args.path.unwrap_or(upload_path);
            let gateway = GitHubGateway::new(config.github)?;
            match publish(&gateway, &post, &path, &config.defaults.commit_message).await {
                Ok(message) => println!("{}", message),
                Err(e) => bail!("Upload failed: {}", e),
            }
        }
        Command::List { path } => {
            let path = path.unwrap_or(upload_path);
            let gateway = Arc::new(GitHubGateway::new(config.github)?);
            let index = match ArticleIndexBuilder::new(gateway).build(&path).await {
                Ok(index) => index,
                Err(e) => bail!("Error loading articles: {}", e),
            };
            if index.is_empty() {
                println!("No articles found in this path");
            }
            for article in index.articles {
                println!("{}\t{}", article.title, article.path);
            }
        }
        Command::Read { path, title, raw } => {
            let gateway = GitHubGateway::new(config.github)?;
            let title = title.unwrap_or_else(|| path.clone());
            let article = open_article(&gateway, &path, &title).await
                .with_context(|| format!("Error loading article {}", path))?;
            if raw {
                println!("# {}\n\n{}", article.title, article.content);
            } else {
                println!("{}", render_article(&article)?);
            }
        }
    }

    Ok(())
}

/// Composing and previewing work without GitHub settings, the rest fail.
fn select_config(opened: Result<Option<Config>, String>, command: &Command) -> Result<Config> {
    match opened {
        Ok(Some(config)) => Ok(config),
        Ok(None) if !command.needs_repository() => Ok(Config::default()),
        Ok(None) => bail!("Could not find zolapost configuration. Please run zolapost --help"),
        Err(err) => bail!("{}", err),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config_path.map(PathBuf::from);

    let config = select_config(open_config(config_path), &cli.command)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    debug!("Using repository {}/{}", config.github.username, config.github.repo);

    run(cli.command, config).await
}
