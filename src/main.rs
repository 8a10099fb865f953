//! tweetfmt CLI
//!
//! Usage:
//!   tweetfmt [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --settings <FILE>  Settings file with templates and render options (TOML)
//!   -f, --footer           Append the rendered footer template
//!   -c, --check            Validate the settings and exit
//!   -v, --verbose          Log segmentation and compilation details
//!   -h, --help             Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tweetfmt::{RawTweet, Renderer, Settings, SettingsError};

#[derive(Parser)]
#[command(name = "tweetfmt")]
#[command(about = "Render decoded tweets through placeholder templates")]
struct Cli {
    /// Tweet JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Settings file with templates and render options (TOML format)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Append the rendered footer template on its own line
    #[arg(short, long)]
    footer: bool,

    /// Validate the settings file and exit
    #[arg(short, long)]
    check: bool,

    /// Log segmentation and compilation details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(cli.settings.as_ref()) {
        Ok(s) => s,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        println!("settings OK");
        return ExitCode::SUCCESS;
    }

    let source = match read_input(cli.input.as_ref()) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let raw: RawTweet = match serde_json::from_str(&source) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error parsing tweet JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Annotations that cannot be placed are reported by the segmenter's warnings.
    let tweet = raw.into_tweet();

    let renderer = Renderer::new(&settings.templates, &settings.render);
    println!("{}", renderer.render(&tweet));
    if cli.footer {
        println!("{}", renderer.render_footer(&tweet));
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let default = if verbose { "tweetfmt=debug" } else { "tweetfmt=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load settings, formatting template errors with their source context
fn load_settings(path: Option<&PathBuf>) -> Result<Settings, String> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    Settings::from_file(path).map_err(|e| match e {
        SettingsError::Template { .. } => e.report(),
        other => format!("Error loading settings '{}': {}", path.display(), other),
    })
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
