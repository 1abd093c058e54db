use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Write};

/// Set up the terminal: raw mode first, then the alternate screen, then the
/// ratatui terminal itself. Each later step unwinds the earlier ones on
/// failure so the shell is never left in a broken state.
pub fn setup() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    if let Err(e) = enable_raw_mode() {
        return Err(color_eyre::eyre::eyre!("Failed to enable raw mode: {e}"));
    }

    let mut stdout = stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(color_eyre::eyre::eyre!(
            "Failed to enter alternate screen: {e}"
        ));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(e) => {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(color_eyre::eyre::eyre!("Failed to create terminal: {e}"));
        }
    };

    if let Err(e) = terminal.clear() {
        eprintln!("Warning: Failed to clear terminal: {e}");
    }
    if let Err(e) = execute!(std::io::stdout(), cursor::Hide) {
        eprintln!("Warning: Failed to hide cursor: {e}");
    }

    Ok(terminal)
}

/// Restore the terminal, tolerating partial failures.
pub fn cleanup(raw_mode: bool, alternate_screen: bool) {
    let mut stdout_handle = stdout();

    if let Err(e) = execute!(stdout_handle, cursor::Show) {
        eprintln!("Warning: Failed to show cursor: {e}");
    }

    if alternate_screen {
        if let Err(e) = execute!(stdout_handle, LeaveAlternateScreen) {
            eprintln!("Warning: Failed to leave alternate screen: {e}");
        }
    }

    if raw_mode {
        if let Err(e) = disable_raw_mode() {
            eprintln!("Warning: Failed to disable raw mode: {e}");
        }
    }

    let _ = execute!(stdout_handle, cursor::MoveToNextLine(1));
    let _ = stdout_handle.flush();
}
