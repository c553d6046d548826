//! Terminal frontend
//!
//! Implements the engine's renderer and input traits on top of crossterm
//! so the game runs in any ANSI terminal.

pub mod input;
pub mod renderer;

pub use input::TerminalInput;
pub use renderer::TerminalRenderer;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use std::io::{stdout, Write};

/// Raw mode plus alternate screen, restored on drop
pub struct Session {
    keyboard_enhanced: bool,
}

impl Session {
    /// Take over the terminal, naming its window `title`
    pub fn enter(title: &str) -> std::io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        // Restores whatever was set up so far if a later step fails
        let mut session = Self { keyboard_enhanced: false };
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        set_title(&mut out, title)?;

        // Release events where the terminal supports them; others fall back
        // to the hold window in `TerminalInput`
        session.keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .is_ok();
        out.flush()?;
        Ok(session)
    }
}

/// Set the terminal window title
pub fn set_title<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    out.execute(terminal::SetTitle(title))?;
    Ok(())
}

impl Drop for Session {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
