use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::{Map, Value};
use wheelpower_content::utils::{logger, validation::Validate};
use wheelpower_content::{
    format_price_value, CliConfig, Command, ContentClient, MutationResult, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = resolve_config(&cli)?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = ContentClient::from_config(&config)?;
    tracing::info!("Using content service at {}", client.base_url());

    let exit_code = match cli.command {
        Command::Services => print_read(client.get_services().await)?,
        Command::Tires => print_read(client.get_tires().await)?,
        Command::Mags => print_read(client.get_mags().await)?,
        Command::Gallery => print_read(client.get_gallery().await)?,
        Command::Settings => print_read(client.get_site_settings().await)?,
        Command::Booking { data } => {
            print_mutation(client.create_booking(parse_object(&data)?).await)?
        }
        Command::Contact { data } => {
            print_mutation(client.create_contact(parse_object(&data)?).await)?
        }
        Command::ImageUrl { id } => {
            match client.image_url(Some(id.as_str())) {
                Some(url) => println!("{}", url),
                None => println!("null"),
            }
            0
        }
        Command::Price { value } => {
            let price = serde_json::from_str(&value).unwrap_or(Value::String(value));
            println!("{}", format_price_value(&price));
            0
        }
        Command::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// The `--base-url` flag wins over the config file, which wins over the
/// compiled-in default.
fn resolve_config(cli: &CliConfig) -> anyhow::Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => TomlConfig::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.content.base_url = base_url.clone();
    }
    Ok(config)
}

fn parse_object(raw: &str) -> anyhow::Result<Map<String, Value>> {
    serde_json::from_str(raw).context("--data must be a JSON object")
}

fn print_read<T: Serialize>(result: Option<T>) -> anyhow::Result<i32> {
    match result {
        Some(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(0)
        }
        None => {
            println!("null");
            Ok(2)
        }
    }
}

fn print_mutation(result: MutationResult) -> anyhow::Result<i32> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.is_success() { 0 } else { 1 })
}
