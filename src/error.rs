use std::path::PathBuf;
use thiserror::Error;

/// Toolbelt error types
#[derive(Error, Debug)]
pub enum ToolbeltError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Setup required: edit {} and run again", .0.display())]
    SetupRequired(PathBuf),

    #[error(
        "GEMINI_API_KEY not found in environment variables. \
         Please create a .env file with GEMINI_API_KEY=your_api_key"
    )]
    MissingApiKey,

    #[error("{0}")]
    Service(String),

    #[error("Error processing image: {0}")]
    Image(String),

    #[error("Error reading PowerPoint file: {0}")]
    Pptx(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IMAP error: {0}")]
    Imap(#[from] imap::error::Error),

    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type for toolbelt operations
pub type Result<T> = std::result::Result<T, ToolbeltError>;
