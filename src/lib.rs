pub mod article_index;
pub mod config;
pub mod content;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod post;
pub mod post_processor;
pub mod util;
mod test_data;
