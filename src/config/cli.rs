use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "wheelpower-content")]
#[command(about = "Query the Wheel Power content service")]
pub struct CliConfig {
    #[arg(long, help = "Content service base URL (overrides the config file)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List available services
    Services,
    /// List tires, sale items first
    Tires,
    /// List mags
    Mags,
    /// List published gallery entries
    Gallery,
    /// Show site settings
    Settings,
    /// Submit a booking request
    Booking {
        #[arg(long, help = "Booking fields as a JSON object")]
        data: String,
    },
    /// Submit a contact message
    Contact {
        #[arg(long, help = "Message fields as a JSON object")]
        data: String,
    },
    /// Print the asset URL for a file id
    ImageUrl { id: String },
    /// Format a price for display
    Price { value: String },
    /// Validate and print the resolved configuration
    CheckConfig,
}
