//! Terminal rendering of the markdown produced by the core display types.
//!
//! Rich mode colors headings by level and styles inline markdown with
//! termimad; plain mode prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::Reset);

        Self { rich_enabled, skin }
    }

    /// Prints `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_color(line) {
                // Headings keep their hashes so the tree depth stays visible.
                Some(color) => println!("{}", paint(line, color)),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Roadmap, phase and task headings get their own colors.
fn heading_color(line: &str) -> Option<u8> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || !line[level..].starts_with(' ') {
        return None;
    }
    Some(match level {
        1 => 34,
        2 => 36,
        _ => 32,
    })
}

fn paint(line: &str, color: u8) -> String {
    format!("\x1b[{color}m{line}\x1b[0m")
}
