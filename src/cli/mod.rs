//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - chat: Gemini chat client (single prompt, interactive, image)
//! - mail: Unread mail counter
//! - pptx: Slide text extractor
pub mod chat;
pub mod mail;
pub mod pptx;
