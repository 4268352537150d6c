//! Raw-mode terminal session for the exam screens.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type ExamTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Exclusive hold on the terminal while an exam is on screen.
///
/// Restores the shell when dropped, so an error bailing out of the event
/// loop mid-attempt (or a panic, via the hook) never strands the terminal
/// in raw mode.
pub struct TerminalSession {
    terminal: ExamTerminal,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    pub fn begin() -> io::Result<Self> {
        enable_raw_mode()?;
        match Self::enter_screen() {
            Ok(terminal) => {
                install_panic_restore();
                Ok(Self { terminal })
            }
            Err(err) => {
                // Raw mode is already on; undo it before surfacing the error.
                restore();
                Err(err)
            }
        }
    }

    fn enter_screen() -> io::Result<ExamTerminal> {
        io::stdout().execute(EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(io::stdout()))
    }

    pub fn terminal(&mut self) -> &mut ExamTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

fn install_panic_restore() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_is_idempotent_without_a_tty() {
        // Both the drop path and the panic hook may run restore; repeated
        // calls (and calls with no tty at all) must stay silent.
        restore();
        restore();
    }
}
