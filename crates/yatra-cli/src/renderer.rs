//! Terminal rendering for markdown output
//!
//! Rich mode styles markdown with termimad. Headers keep their hash marks and
//! fenced code blocks are printed untouched so JSON output stays copyable.

use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::DarkYellow);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.quote_mark.set_fg(Color::Red);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return;
        }

        let mut in_code_block = false;
        for line in markdown.lines() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                println!("{line}");
            } else if in_code_block {
                println!("{line}");
            } else if line.starts_with('#') {
                println!("\x1b[33m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Render a JSON value as a fenced code block
    pub fn render_json(&self, value: &serde_json::Value) -> serde_json::Result<()> {
        let pretty = serde_json::to_string_pretty(value)?;
        if self.rich_enabled {
            self.render(&format!("```json\n{pretty}\n```\n"));
        } else {
            println!("{pretty}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
