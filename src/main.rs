mod chat;
mod cli;
mod config;
mod display;
mod error;
mod gemini;
mod history;
mod mail;
mod pptx;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolbelt")]
#[command(about = "Small automation tools: Gemini chat, unread mail counter, slide text extractor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Command line client for Google's Gemini AI
    Chat {
        /// The prompt to send to Gemini
        prompt: Option<String>,

        /// Interactive mode
        #[arg(short, long)]
        interactive: bool,

        /// Set up the config file
        #[arg(long)]
        setup: bool,

        /// Use the vision model for image analysis
        #[arg(short, long)]
        vision: bool,

        /// Path to an image file for vision queries
        #[arg(long)]
        image: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Report unread mail for the accounts in EMAIL_USER{1..3}/EMAIL_PASS{1..3}
    Mail {
        /// IMAP server host
        #[arg(long, default_value = mail::DEFAULT_IMAP_SERVER)]
        server: String,

        /// IMAP server port (TLS)
        #[arg(long, default_value_t = mail::DEFAULT_IMAP_PORT)]
        port: u16,
    },
    /// Extract slide text from a .pptx file
    Pptx {
        /// Presentation to read
        file: PathBuf,

        /// Where to write the text (defaults to the input path with .txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Credentials may live in a .env file next to where the tool is run
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat {
            prompt,
            interactive,
            setup,
            vision,
            image,
            no_color,
        } => cli::chat::run(cli::chat::ChatOptions {
            prompt,
            interactive,
            setup,
            vision,
            image,
            no_color,
        }),
        Commands::Mail { server, port } => cli::mail::run(server, port),
        Commands::Pptx {
            file,
            output,
            dry_run,
        } => cli::pptx::run(file, output, dry_run),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
