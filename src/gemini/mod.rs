//! Completion service module
//!
//! Defines the CompletionService seam used by the chat client and its
//! Gemini implementation over blocking HTTP.

mod client;
mod types;

pub use client::GeminiClient;
pub use types::SafetySetting;

use std::path::Path;

use crate::config::Settings;
use crate::error::Result;

pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_TOP_K: u32 = 64;

/// One element of a prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Image { mime_type: String, data: Vec<u8> },
}

/// A service that turns prompt parts into generated text
pub trait CompletionService {
    fn generate(&self, parts: &[Part]) -> Result<String>;
}

/// Parameters sent with every request
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub safety: Vec<SafetySetting>,
}

impl GenerationSettings {
    /// Build request parameters from the loaded settings
    pub fn from_settings(settings: &Settings, vision: bool) -> Self {
        Self {
            model: settings.model(vision).to_string(),
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            safety: SafetySetting::block_none(),
        }
    }
}

/// MIME type for an image file, judged by its extension
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "image/jpeg",
    }
}
