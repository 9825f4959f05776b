//! Prompt, dialogue and code block rendering

use std::io::{self, Write};
use std::path::Path;

use crossterm::cursor::{MoveTo, SetCursorStyle};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::style::{Palette, SpeakerStyle};

/// DEC double-width line
const DOUBLE_WIDTH: &str = "\x1b#6";
/// DEC single-width line
const SINGLE_WIDTH: &str = "\x1b#5";

const PROMPT_TIME_COLOR: Color = Color::DarkGreen;
const PROMPT_PATH_COLOR: Color = Color::DarkYellow;
const PROMPT_BRANCH_COLOR: Color = Color::DarkBlue;
const COMMAND_SYMBOL_COLOR: Color = Color::White;
const SNIPPET_HEADER_COLOR: Color = Color::AnsiValue(214);
const SNIPPET_COLOR: Color = Color::DarkGreen;
const EXECUTING_COLOR: Color = Color::DarkYellow;

/// Text shown after a code snippet
pub const EXECUTION_MESSAGE: &str = "[Executing... Done]";

/// Static parts of the per-entry shell prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub episode: u32,
    pub show_name: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            episode: 13,
            show_name: "Visionaryx".to_string(),
        }
    }
}

/// Terminal drawing surface
pub struct Screen<W: Write> {
    out: W,
    palette: Palette,
    prompt: PromptConfig,
    large_font: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, palette: Palette, prompt: PromptConfig) -> Self {
        Self {
            out,
            palette,
            prompt,
            large_font: true,
        }
    }

    /// Toggle DEC double-width lines
    pub fn with_large_font(mut self, large_font: bool) -> Self {
        self.large_font = large_font;
        self
    }

    pub fn style_for(&self, speaker: &str) -> SpeakerStyle {
        self.palette.style_for(speaker)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clear the screen and home the cursor
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }

    /// Print the shell-style prompt line for a speaker, then the `$ ` symbol
    pub fn prompt(&mut self, speaker: &str, time_of_day: &str) -> io::Result<()> {
        let style = self.style_for(speaker);
        let show = format!(
            " Episode {} @ {} - ",
            self.prompt.episode, self.prompt.show_name
        );

        self.begin_line()?;
        self.bold(PROMPT_TIME_COLOR, time_of_day)?;
        queue!(self.out, Print(show))?;
        self.styled(style, speaker)?;
        queue!(self.out, Print(" "))?;
        self.bold(PROMPT_PATH_COLOR, "~")?;
        queue!(self.out, Print(" "))?;
        self.bold(PROMPT_BRANCH_COLOR, "(main) (git:master)")?;
        self.end_line()?;
        queue!(self.out, Print("\n\n"))?;

        self.begin_line()?;
        self.bold(COMMAND_SYMBOL_COLOR, "$ ")?;
        self.end_line()?;
        self.out.flush()
    }

    /// Emit one typed character
    pub fn type_char(&mut self, ch: char, style: SpeakerStyle) -> io::Result<()> {
        self.begin_line()?;
        self.styled(style, ch)?;
        self.end_line()?;
        queue!(self.out, SetCursorStyle::BlinkingBar)?;
        self.out.flush()
    }

    /// Finish a line of dialogue
    pub fn end_dialogue(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), Print("\n\n"))?;
        self.out.flush()
    }

    /// Show a code snippet followed by the execution message
    pub fn code_block(&mut self, code: &str) -> io::Result<()> {
        self.begin_line()?;
        self.bold(SNIPPET_HEADER_COLOR, "Code Snippet:")?;
        self.end_line()?;
        queue!(self.out, Print("\n"))?;

        self.begin_line()?;
        self.bold(SNIPPET_COLOR, code)?;
        self.end_line()?;
        queue!(self.out, Print("\n\n"))?;

        self.bold(EXECUTING_COLOR, EXECUTION_MESSAGE)?;
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Report where the result artifact is expected
    pub fn completion(&mut self, output_path: &Path) -> io::Result<()> {
        queue!(
            self.out,
            Print("\n"),
            SetAttribute(Attribute::Bold),
            Print(format!(
                "Process complete. The generated video is saved at: {}",
                output_path.display()
            )),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
        self.out.flush()
    }

    fn begin_line(&mut self) -> io::Result<()> {
        if self.large_font {
            queue!(self.out, Print(DOUBLE_WIDTH))?;
        }
        Ok(())
    }

    fn end_line(&mut self) -> io::Result<()> {
        if self.large_font {
            queue!(self.out, Print(SINGLE_WIDTH))?;
        }
        Ok(())
    }

    fn bold<T: std::fmt::Display>(&mut self, color: Color, text: T) -> io::Result<()> {
        self.styled(SpeakerStyle::new(color), text)
    }

    fn styled<T: std::fmt::Display>(&mut self, style: SpeakerStyle, text: T) -> io::Result<()> {
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            self.out,
            SetForegroundColor(style.color),
            Print(text),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )
    }
}
