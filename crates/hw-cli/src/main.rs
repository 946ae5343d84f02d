//! Hook Warden CLI
//!
//! Command-line interface for the Hook Warden webhook receiver.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod config;

use commands::run_server;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "hook-warden")]
#[command(author = "Hook Warden Team")]
#[command(version)]
#[command(about = "Webhook receiver with HMAC payload authentication", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook receiver
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Webhook secret (overrides config file and HW_WEBHOOK_SECRET)
        #[arg(short, long)]
        secret: Option<String>,

        /// Skip signature verification
        #[arg(long)]
        no_verify: bool,

        /// Log the decoded event body for each delivery
        #[arg(long)]
        print_body: bool,

        /// Log request headers for each delivery
        #[arg(long)]
        print_headers: bool,

        /// Directory to serve under /static/
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Disable Swagger UI
        #[arg(long)]
        no_swagger: bool,
    },

    /// Validate configuration
    Validate {
        /// Configuration file to validate
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show current configuration
    Config {
        /// Show secrets (redacted by default)
        #[arg(long)]
        show_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    hw_observability::init_logging_with_config(hw_observability::LoggingConfig {
        level: log_level,
        json_format: cli.format == OutputFormat::Json,
        ..Default::default()
    });

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path).unwrap_or_else(|_| {
        if cli.verbose {
            eprintln!("Using default configuration (no config file found)");
        }
        let mut config = AppConfig::default();
        config.apply_env();
        config
    });

    // Execute command
    match cli.command {
        Commands::Serve {
            port,
            host,
            secret,
            no_verify,
            print_body,
            print_headers,
            static_dir,
            no_swagger,
        } => {
            // CLI flags override the configuration file
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(secret) = secret {
                config.webhook.secret = secret;
            }
            if let Some(static_dir) = static_dir {
                config.server.static_dir = Some(static_dir.display().to_string());
            }
            if no_verify {
                config.webhook.verify = false;
            }
            if no_swagger {
                config.server.enable_swagger = false;
            }
            config.webhook.print_body |= print_body;
            config.webhook.print_headers |= print_headers;

            cmd_serve(config).await
        }
        Commands::Validate { config: cfg_path } => {
            cmd_validate(cfg_path.unwrap_or(config_path)).await
        }
        Commands::Config { show_secrets } => cmd_config(config, show_secrets, cli.format).await,
    }
}

fn default_config_path() -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("io", "hook-warden", "hook-warden") {
        dirs.config_dir().join("config.yaml")
    } else {
        PathBuf::from("config/default.yaml")
    }
}

async fn cmd_serve(config: AppConfig) -> Result<()> {
    println!("{}", "Validating configuration...".cyan());

    let validation_result = config.validate();
    validation_result.print();

    if validation_result.has_errors() {
        println!();
        println!(
            "{}",
            "Server startup aborted due to configuration errors. Fix the errors above and try again."
                .red()
                .bold()
        );
        std::process::exit(1);
    }

    println!();
    run_server(config).await
}

async fn cmd_validate(config_path: PathBuf) -> Result<()> {
    println!(
        "Validating configuration: {}",
        config_path.display().to_string().cyan()
    );

    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("{}: {}", "Configuration file error".red().bold(), e);
            std::process::exit(1);
        }
    };

    let validation_result = config.validate();
    validation_result.print();

    println!();
    println!("{}", "Configuration Summary".bold());
    println!("─────────────────────");
    println!("  Bind: {}:{}", config.server.host, config.server.port);
    println!(
        "  Verification: {}",
        if config.webhook.verify {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!(
        "  Secret: {}",
        if config.webhook.secret.is_empty() {
            "(not set)"
        } else {
            "(configured)"
        }
    );

    if validation_result.has_errors() {
        println!();
        println!(
            "{}",
            "Configuration validation failed. Fix the errors above."
                .red()
                .bold()
        );
        std::process::exit(1);
    } else if validation_result.has_warnings() {
        println!();
        println!(
            "{}",
            "Configuration is valid with warnings. Review the warnings above."
                .yellow()
                .bold()
        );
    } else {
        println!();
        println!("{}", "Configuration is valid.".green().bold());
    }

    Ok(())
}

async fn cmd_config(config: AppConfig, show_secrets: bool, format: OutputFormat) -> Result<()> {
    let display_config = if show_secrets {
        config
    } else {
        config.redact_secrets()
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&display_config)?);
    } else {
        println!("{}", "Current Configuration".bold());
        println!("─────────────────────────");
        println!(
            "Bind: {}:{}",
            display_config.server.host, display_config.server.port
        );
        println!(
            "Verification: {}",
            if display_config.webhook.verify {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("Secret: {}", display_config.webhook.secret);
        println!(
            "Static dir: {}",
            display_config.server.static_dir.as_deref().unwrap_or("-")
        );
        println!(
            "Logging: {} ({})",
            display_config.logging.level,
            if display_config.logging.json_format {
                "json"
            } else {
                "text"
            }
        );
    }

    Ok(())
}
