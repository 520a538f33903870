use std::path::PathBuf;

use clap::CommandFactory;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::chat::ChatSession;
use crate::config::{self, ConfigPaths};
use crate::display::{colors_enabled, Palette};
use crate::error::{Result, ToolbeltError};
use crate::gemini::{CompletionService, GeminiClient, GenerationSettings};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// Options for the chat command
pub struct ChatOptions {
    pub prompt: Option<String>,
    pub interactive: bool,
    pub setup: bool,
    pub vision: bool,
    pub image: Option<PathBuf>,
    pub no_color: bool,
}

/// Run the chat client
pub fn run(options: ChatOptions) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    debug!(config_dir = %paths.dir.display(), "resolved config directory");

    if options.setup {
        return setup(&paths);
    }

    // First run: write defaults and stop so the user can add an API key
    if config::create_default(&paths)? {
        print_created(&paths);
        return Err(ToolbeltError::SetupRequired(paths.config_file));
    }

    let config = config::load(&paths.config_file)?;
    let settings = &config.settings;

    let api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or(ToolbeltError::MissingApiKey)?;

    let use_colors = colors_enabled(settings.use_colors, options.no_color);
    let generation = GenerationSettings::from_settings(settings, options.vision);
    debug!(model = %generation.model, use_colors, "starting chat client");

    let client = GeminiClient::new(api_key, generation)?;
    let palette = Palette::default();
    let session = ChatSession::new(
        &client,
        &palette,
        &paths.history_file,
        settings.max_output_lines,
        use_colors,
    );

    if let Some(image) = options.image {
        let reply = session.describe_image(options.prompt.as_deref(), &image)?;
        println!("{}", reply);
        return Ok(());
    }

    if options.interactive {
        interactive(&session, &palette)
    } else if let Some(prompt) = options.prompt {
        println!("{}", session.respond(&prompt));
        Ok(())
    } else {
        print_help()
    }
}

/// Create the config file if it does not exist yet
fn setup(paths: &ConfigPaths) -> Result<()> {
    if config::create_default(paths)? {
        print_created(paths);
    } else {
        println!(
            "Config file already exists at {}",
            paths.config_file.display()
        );
    }
    Ok(())
}

fn print_created(paths: &ConfigPaths) {
    println!("Config file created at {}", paths.config_file.display());
    println!("Please ensure you have a .env file with GEMINI_API_KEY=your_api_key");
}

/// Prompt repeatedly until an exit word, Ctrl-C or end of input
fn interactive<S: CompletionService>(
    session: &ChatSession<'_, S>,
    palette: &Palette,
) -> Result<()> {
    let (bold, heading, reset) = if session.use_colors() {
        (palette.bold, palette.heading, palette.reset)
    } else {
        ("", "", "")
    };

    println!("{}Gemini Interactive Mode (exit/quit/q to quit){}", heading, reset);

    let mut editor = DefaultEditor::new()?;
    let prompt = format!("{}You:{} ", bold, reset);

    loop {
        println!();
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("\nExiting...");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if EXIT_WORDS.contains(&line.trim().to_lowercase().as_str()) {
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        let _ = editor.add_history_entry(line.as_str());

        println!("\n{}Gemini:{}", bold, reset);
        println!("{}", session.respond(&line));
    }

    Ok(())
}

fn print_help() -> Result<()> {
    let mut command = crate::Cli::command();
    if let Some(chat) = command.find_subcommand_mut("chat") {
        chat.print_help()?;
    }
    Ok(())
}
