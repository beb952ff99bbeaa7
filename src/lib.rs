pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use config::{toml_config::TomlConfig, ContentSettings, BASE_URL};
pub use core::{client::ContentClient, query::CollectionQuery, ContentApi};
pub use domain::model::{Item, MutationResult};
pub use utils::error::{ContentError, Result};
pub use utils::format::{format_price, format_price_value, get_image_url};
