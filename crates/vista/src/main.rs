//! Vista CLI - Ask a Gemini vision model about images.
//!
//! Vista sends an image and an instruction to a hosted multimodal model and
//! prints the answer: a free-form analysis, a diagram explanation, a quiz, or
//! the key concepts shown in the image.
//!
//! # Usage
//!
//! ```bash
//! # Free-form question
//! vista analyze photo.jpg "What can you tell me about this image?"
//!
//! # Task shortcuts
//! vista explain diagram.png
//! vista quiz cell.png --difficulty hard --format json
//! vista concepts slide.png
//!
//! # Check which models the key can use
//! vista models
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Vista - Explain, quiz, and summarize images with Gemini.
#[derive(Parser, Debug)]
#[command(name = "vista")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Gemini API key (defaults to GOOGLE_API_KEY)
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name, overriding the config file
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image with a free-form prompt
    Analyze(cli::ask::AnalyzeArgs),

    /// Explain a diagram or chart
    Explain(cli::ask::ImageArgs),

    /// Generate a multiple-choice quiz about an image
    Quiz(cli::ask::QuizArgs),

    /// Identify the key educational concepts in an image
    Concepts(cli::ask::ImageArgs),

    /// Run every task on one image and print each result
    Demo(cli::ask::DemoArgs),

    /// List models available to the API key
    Models(cli::models::ModelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before parsing so --api-key can fall back to it
    let dotenv_path = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match vista_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vista config path`."
            );
            vista_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Vista v{}", vista_core::VERSION);
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    if let Some(model) = cli.model {
        config.gemini.model = model;
    }
    let session = cli::Session::new(config, cli.api_key);

    match cli.command {
        Commands::Analyze(args) => cli::ask::analyze(&session, args).await,
        Commands::Explain(args) => cli::ask::explain(&session, args).await,
        Commands::Quiz(args) => cli::ask::quiz(&session, args).await,
        Commands::Concepts(args) => cli::ask::concepts(&session, args).await,
        Commands::Demo(args) => cli::ask::demo(&session, args).await,
        Commands::Models(args) => cli::models::execute(&session, args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
