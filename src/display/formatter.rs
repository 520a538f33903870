//! Markdown terminal formatting with ANSI escape sequences

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Line appended when a reply is cut short
pub const TRUNCATION_MARKER: &str = "[Output truncated]";

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)\n```").expect("valid code block pattern"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#+) (.*?)$").expect("valid heading pattern"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*[-*]) (.*?)$").expect("valid list item pattern"));

/// ANSI sequences used to style a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub code: &'static str,
    pub code_bg: &'static str,
    pub heading: &'static str,
    pub list: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            reset: "\x1b[0m",
            bold: "\x1b[1m",
            code: "\x1b[38;5;246m",
            code_bg: "\x1b[48;5;236m",
            heading: "\x1b[1;38;5;75m",
            list: "\x1b[38;5;220m",
        }
    }
}

/// Keep at most `max_lines` lines, marking the cut. Zero keeps everything.
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    if max_lines == 0 {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }

    format!("{}\n{}", lines[..max_lines].join("\n"), TRUNCATION_MARKER)
}

/// Style fenced code blocks, headings and list items for the terminal.
///
/// The passes run in that order over the whole text. Later passes see the
/// escape sequences inserted by earlier ones.
pub fn format_markdown(text: &str, use_colors: bool, palette: &Palette) -> String {
    if !use_colors {
        return text.to_string();
    }

    let text = CODE_BLOCK.replace_all(text, |caps: &Captures| {
        let lang = caps.get(1).map_or("", |m| m.as_str().trim());
        let code = caps.get(2).map_or("", |m| m.as_str());

        let lines: Vec<String> = code
            .split('\n')
            .map(|line| format!("{}{}{}{}", palette.code, palette.code_bg, line, palette.reset))
            .collect();

        format!(
            "{bold}```{lang}{reset}\n{body}\n{bold}```{reset}",
            bold = palette.bold,
            reset = palette.reset,
            lang = lang,
            body = lines.join("\n"),
        )
    });

    let text = HEADING.replace_all(&text, |caps: &Captures| {
        format!("{}{} {}{}", palette.heading, &caps[1], &caps[2], palette.reset)
    });

    let text = LIST_ITEM.replace_all(&text, |caps: &Captures| {
        format!("{} {}{}{}", &caps[1], palette.list, &caps[2], palette.reset)
    });

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::default()
    }

    #[test]
    fn test_disabled_colors_is_identity() {
        let inputs = [
            "",
            "# Heading\n- item\n```rust\nfn main() {}\n```",
            "plain text\nwith lines\n",
        ];
        for input in inputs {
            assert_eq!(format_markdown(input, false, &palette()), input);
        }
    }

    #[test]
    fn test_plain_text_unchanged_with_colors() {
        let input = "Just a sentence.\nAnother line with #hash and -dash.\n\n1. numbered";
        assert_eq!(format_markdown(input, true, &palette()), input);
    }

    #[test]
    fn test_heading_wrapped_including_hashes() {
        let p = palette();
        let out = format_markdown("## Title", true, &p);
        assert_eq!(out, format!("{}## Title{}", p.heading, p.reset));
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        let out = format_markdown("#hashtag", true, &palette());
        assert_eq!(out, "#hashtag");
    }

    #[test]
    fn test_list_item_marker_unstyled() {
        let p = palette();
        let out = format_markdown("- item", true, &p);
        assert_eq!(out, format!("- {}item{}", p.list, p.reset));
    }

    #[test]
    fn test_indented_star_list_item() {
        let p = palette();
        let out = format_markdown("intro\n\t* nested", true, &p);
        assert_eq!(out, format!("intro\n\t* {}nested{}", p.list, p.reset));
    }

    #[test]
    fn test_code_block_scenario() {
        let p = palette();
        let out = format_markdown("```python\nprint(1)\n```", true, &p);

        assert!(out.starts_with(&format!("{}```python{}", p.bold, p.reset)));
        assert!(out.contains(&format!("{}{}print(1){}", p.code, p.code_bg, p.reset)));
        assert!(out.ends_with(&format!("{}```{}", p.bold, p.reset)));
    }

    #[test]
    fn test_code_block_language_trimmed() {
        let p = palette();
        let out = format_markdown("```  rust  \nlet x = 1;\n```", true, &p);
        assert!(out.starts_with(&format!("{}```rust{}", p.bold, p.reset)));
    }

    #[test]
    fn test_code_block_every_line_wrapped() {
        let p = palette();
        let out = format_markdown("```\na\nb\n```", true, &p);
        let expected = format!(
            "{b}```{r}\n{c}{bg}a{r}\n{c}{bg}b{r}\n{b}```{r}",
            b = p.bold,
            r = p.reset,
            c = p.code,
            bg = p.code_bg
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unclosed_fence_passes_through() {
        let input = "```rust\nfn main() {}";
        assert_eq!(format_markdown(input, true, &palette()), input);
    }

    #[test]
    fn test_heading_inside_code_block_stays_code() {
        // Code lines start with an escape sequence after the first pass, so
        // the heading pattern no longer sees a leading '#'.
        let p = palette();
        let out = format_markdown("```sh\n# comment\n```", true, &p);
        assert!(out.contains(&format!("{}{}# comment{}", p.code, p.code_bg, p.reset)));
        assert!(!out.contains(p.heading));
    }

    #[test]
    fn test_passes_are_independent() {
        let p = palette();
        let out = format_markdown("# Notes\n- first\n- second", true, &p);
        let expected = format!(
            "{h}# Notes{r}\n- {l}first{r}\n- {l}second{r}",
            h = p.heading,
            l = p.list,
            r = p.reset
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_truncate_lines() {
        let text = (1..=10)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let out = truncate_lines(&text, 3);
        assert_eq!(out, "line 1\nline 2\nline 3\n[Output truncated]");
    }

    #[test]
    fn test_truncate_zero_is_unlimited() {
        let text = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj";
        assert_eq!(truncate_lines(text, 0), text);
    }

    #[test]
    fn test_truncate_within_limit_unchanged() {
        assert_eq!(truncate_lines("a\nb\nc", 3), "a\nb\nc");
    }

    #[test]
    fn test_truncate_counts_trailing_empty_line() {
        assert_eq!(truncate_lines("a\nb\n", 2), "a\nb\n[Output truncated]");
    }
}
