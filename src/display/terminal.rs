//! Color support logic

/// Decide whether replies get ANSI styling.
///
/// `--no-color` and the config toggle come first, then the
/// `NO_COLOR` (https://no-color.org/) and `CLICOLOR=0` conventions.
pub fn colors_enabled(configured: bool, no_color_flag: bool) -> bool {
    if no_color_flag || !configured {
        return false;
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            return false;
        }
    }

    true
}
