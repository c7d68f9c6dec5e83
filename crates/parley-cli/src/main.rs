//! parley CLI: Command-line interface for the parley direct-message screen

use clap::{Parser, Subcommand};
use parley_engine::{
    default_conversation, load_seed, Config, Message, PlaceholderCycler, SeedError,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Direct-message chat screen in the terminal
#[derive(Parser)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat screen (default when no command specified)
    Tui,

    /// Print the seed conversation
    Seed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the composer placeholder animation frame by frame
    Placeholder {
        /// Stop after this many frames
        #[arg(long, default_value = "200")]
        frames: usize,
    },

    /// Write the default config file
    Init,
}

const DEFAULT_CONFIG: &str = ".parley/config.json";
const DEFAULT_LOG_FILE: &str = "parley.log";

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => fail(&format!("Failed to load {}: {e}", cli.config.display())),
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let messages = load_messages(&config).unwrap_or_else(|e| fail(&e.to_string()));
            let rt = tokio::runtime::Runtime::new()
                .unwrap_or_else(|e| fail(&format!("Failed to create tokio runtime: {e}")));
            if let Err(e) = rt.block_on(parley_tui::run_tui(config, messages)) {
                fail(&e.to_string());
            }
        }
        Some(Commands::Seed { json }) => {
            let messages = load_messages(&config).unwrap_or_else(|e| fail(&e.to_string()));
            cmd_seed(&messages, json);
        }
        Some(Commands::Placeholder { frames }) => {
            cmd_placeholder(&config, frames);
        }
        Some(Commands::Init) => {
            cmd_init(&cli.config);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Log to a file; the TUI owns the terminal.
fn init_logging() {
    let path = std::env::var("PARLEY_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.into());
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled, cannot open {path}: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// Seed conversation from the configured file, or the built-in one.
fn load_messages(config: &Config) -> Result<Vec<Message>, SeedError> {
    match &config.seed_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading seed conversation");
            load_seed(path)
        }
        None => default_conversation(),
    }
}

fn cmd_seed(messages: &[Message], json: bool) {
    if json {
        match serde_json::to_string_pretty(messages) {
            Ok(out) => println!("{out}"),
            Err(e) => fail(&format!("Failed to serialize messages: {e}")),
        }
    } else {
        print!("{}", format_conversation(messages));
    }
}

/// Plain-text listing of a conversation.
fn format_conversation(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        if let Some(date) = message.date() {
            out.push_str(&format!("--- {date} ---\n"));
        }
        out.push_str(&format!("[{}]", message.id()));
        for media in message.media().unwrap_or_default() {
            out.push_str(&format!(" <{} {}>", media.kind.label(), media.url));
        }
        if let Some(text) = message.visible_text() {
            out.push(' ');
            out.push_str(text);
        }
        if message.has_link() {
            out.push_str(" (link)");
        }
        out.push('\n');

        if !message.reactions().is_empty() {
            let reactions: Vec<String> = message
                .reactions()
                .iter()
                .map(|r| match r.count {
                    Some(count) => format!("{} {count}", r.emoji),
                    None => r.emoji.clone(),
                })
                .collect();
            out.push_str(&format!("    {}\n", reactions.join("  ")));
        }
    }
    out
}

fn cmd_placeholder(config: &Config, frames: usize) {
    let mut cycler =
        PlaceholderCycler::new(&config.placeholder).unwrap_or_else(|e| fail(&e.to_string()));
    for line in placeholder_frames(&mut cycler, frames) {
        println!("{line}");
    }
}

/// One line per frame: the delay before the next frame and the text shown.
fn placeholder_frames(cycler: &mut PlaceholderCycler, limit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for _ in 0..limit {
        let delay = cycler
            .next_delay()
            .map_or_else(|| "settled".to_string(), |d| format!("{}ms", d.as_millis()));
        lines.push(format!("{delay:>8}  {:?}", cycler.display()));
        if !cycler.step() {
            break;
        }
    }
    lines
}

fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    match Config::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => fail(&format!("Failed to write config: {e}")),
    }
}
