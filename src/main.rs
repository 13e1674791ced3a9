use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use gencircular::config::{dirs_path, AppConfig};
use gencircular::form::fields;
use gencircular::headless::{self, parse_assignment, FillRequest};
use gencircular::markup::render_preview_html;
use gencircular::session::{FormSession, UiMode};
use gencircular::submit::HttpSubmitter;
use gencircular::tui::date_picker::normalize_date;
use gencircular::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "gencircular", about = "Fill, preview and generate official circulars.")]
struct Cli {
    /// Generation endpoint (overrides config)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file to use instead of ~/.gencircular and ./.gencircular
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start in dark mode
    #[arg(long, global = true)]
    dark: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the form's fields and their options
    Fields,
    /// Fill the form from arguments, print the preview, optionally submit
    Fill(FillArgs),
}

#[derive(Args)]
struct FillArgs {
    /// Field assignment, e.g. --set subject="Annual Day" (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,

    /// Date of issue (dd-mm-yyyy)
    #[arg(long, value_parser = normalize_date)]
    date: Option<String>,

    /// Print the preview as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Submit to the endpoint after previewing
    #[arg(long)]
    submit: bool,
}

/// Log to stderr, or to ~/.gencircular/gencircular.log while the TUI owns
/// the terminal.
fn init_tracing(to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("gencircular=info".parse()?);

    if to_file {
        if let Some(dir) = dirs_path() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("gencircular.log"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_file(path),
        None => AppConfig::load(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if cli.dark {
        config.theme = UiMode::Dark;
    }
    config
}

fn print_fields() {
    for def in fields() {
        let required = if def.required { "required" } else { "optional" };
        println!("{:<16} {:<20} {required}", def.name, def.label);
        if let Some(options) = def.options {
            println!("{:<16} one of: {}", "", options.join(", "));
        }
        if let Some(max) = def.max_length {
            println!("{:<16} at most {max} characters", "");
        }
    }
}

async fn run_fill(config: &AppConfig, args: FillArgs) -> Result<()> {
    let mut session = FormSession::new(config.theme);
    let request = FillRequest {
        assignments: args.assignments,
        date: args.date,
    };
    headless::apply(&mut session, &request)?;

    let doc = session.open_preview();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render_preview_html(&doc));
    }
    session.close_preview();
    eprintln!("{}", session.info_counter_label());
    eprintln!("{}", session.email_counter_label());

    if args.submit {
        let submitter = HttpSubmitter::new(&config.endpoint, config.timeout())?;
        let receipt = headless::submit(&mut session, &submitter).await?;
        eprintln!("Circular generated (status {})", receipt.status);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_none())?;

    let config = resolve_config(&cli);
    info!(endpoint = %config.endpoint, "GenCircular starting");

    match cli.command {
        None => {
            let submitter = HttpSubmitter::new(&config.endpoint, config.timeout())?;
            run_tui(&config, Arc::new(submitter)).await
        }
        Some(Command::Fields) => {
            print_fields();
            Ok(())
        }
        Some(Command::Fill(args)) => run_fill(&config, args).await,
    }
}
