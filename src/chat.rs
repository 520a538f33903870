//! Chat turn handling
//!
//! Sends a prompt to the completion service and prepares the reply for the
//! terminal: truncation, markdown styling and history logging.
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::display::{format_markdown, truncate_lines, Palette};
use crate::error::{Result, ToolbeltError};
use crate::gemini::{image_mime_type, CompletionService, Part};
use crate::history;

/// Prompt used when an image is sent without one
pub const DEFAULT_IMAGE_PROMPT: &str = "Describe this image in detail.";

/// One chat client run: service plus display settings
pub struct ChatSession<'a, S: CompletionService> {
    service: &'a S,
    palette: &'a Palette,
    history_file: &'a Path,
    max_output_lines: usize,
    use_colors: bool,
}

impl<'a, S: CompletionService> ChatSession<'a, S> {
    pub fn new(
        service: &'a S,
        palette: &'a Palette,
        history_file: &'a Path,
        max_output_lines: usize,
        use_colors: bool,
    ) -> Self {
        Self {
            service,
            palette,
            history_file,
            max_output_lines,
            use_colors,
        }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Answer a prompt. Failures come back as an `Error: ...` reply.
    pub fn respond(&self, prompt: &str) -> String {
        match self.try_respond(prompt) {
            Ok(reply) => reply,
            Err(e) => {
                debug!(error = %e, "chat turn failed");
                format!("Error: {}", e)
            }
        }
    }

    fn try_respond(&self, prompt: &str) -> Result<String> {
        let text = self.service.generate(&[Part::Text(prompt.to_string())])?;
        debug!(lines = text.split('\n').count(), "received reply");

        let shown = truncate_lines(&text, self.max_output_lines);
        let shown = format_markdown(&shown, self.use_colors, self.palette);

        // History keeps the full, unstyled reply
        history::append(self.history_file, prompt, &text)?;
        Ok(shown)
    }

    /// Ask about an image file. The reply is styled but not truncated or logged.
    pub fn describe_image(&self, prompt: Option<&str>, image: &Path) -> Result<String> {
        if !image.exists() {
            return Err(ToolbeltError::InvalidInput(format!(
                "Image file not found: {}",
                image.display()
            )));
        }

        let parts = image_parts(prompt, image).map_err(|e| ToolbeltError::Image(e.to_string()))?;
        let text = self
            .service
            .generate(&parts)
            .map_err(|e| ToolbeltError::Image(e.to_string()))?;

        Ok(format_markdown(&text, self.use_colors, self.palette))
    }
}

fn image_parts(prompt: Option<&str>, image: &Path) -> Result<Vec<Part>> {
    let data = fs::read(image)?;
    debug!(path = %image.display(), bytes = data.len(), "read image");

    Ok(vec![
        Part::Text(prompt.unwrap_or(DEFAULT_IMAGE_PROMPT).to_string()),
        Part::Image {
            mime_type: image_mime_type(image).to_string(),
            data,
        },
    ])
}
