use anyhow::{Context, Result};
use clap::Parser;
use ticketflow::core::Event;
use ticketflow::narrate::NarrationStyle;
use ticketflow::{EngineConfig, WorkflowEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ticketflow")]
#[command(version)]
#[command(about = "Drive a support ticket through its lifecycle")]
struct Cli {
    /// Events to apply, in order, as `kind[:payload]`
    ///
    /// Kinds: assign_agent (or assign), reply, resolve, close.
    ///
    /// Examples:
    ///   ticketflow assign:Alice "reply:We are investigating your login issue." resolve close
    ///   ticketflow --narration terse --json reply:hello close
    #[arg(required = true)]
    events: Vec<String>,

    /// Ticket id
    #[arg(long, default_value = "#5678")]
    id: String,

    /// TOML config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Narration style, overriding the config file
    #[arg(long, value_enum)]
    narration: Option<NarrationStyle>,

    /// Print the final ticket, with its event log, as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(style) = cli.narration {
        config.narration = style;
    }

    // Parse everything up front so a typo applies nothing.
    let events = cli
        .events
        .iter()
        .map(|text| Event::parse(text).with_context(|| format!("invalid event '{text}'")))
        .collect::<Result<Vec<_>>>()?;

    let engine = WorkflowEngine::from_config(&config)?;
    let mut ticket = engine.create(cli.id);

    for event in events {
        let effect = engine.apply_event(&mut ticket, event);
        println!("{}", effect.narration);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    }

    Ok(())
}
