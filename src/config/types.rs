use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_TEXT: &str = "gemini-2.0-flash";
pub const DEFAULT_MODEL_VISION: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Toolbelt configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat client settings
    #[serde(default)]
    pub settings: Settings,
}

/// Chat client settings, stored in the `[settings]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model used for plain text prompts
    pub model_text: String,

    /// Model used when `--vision` is given
    pub model_vision: String,

    pub temperature: f32,

    pub max_output_tokens: u32,

    /// Maximum lines of a reply shown in the terminal (0 = unlimited)
    pub max_output_lines: usize,

    /// Use ANSI colors in terminal output
    pub use_colors: bool,
}

impl Settings {
    /// Model name for the requested mode
    pub fn model(&self, vision: bool) -> &str {
        if vision {
            &self.model_vision
        } else {
            &self.model_text
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_text: DEFAULT_MODEL_TEXT.to_string(),
            model_vision: DEFAULT_MODEL_VISION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_output_lines: 0,
            use_colors: true,
        }
    }
}
