//! Terminal mode ownership
//!
//! Raw mode and the alternate screen are held by [`TerminalGuard`] and
//! released when it drops, including during an unwind. Panics raised while
//! the guard is held go to the log file instead of stderr: listener panics
//! are caught by the broadcaster and must not disturb the running page.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use scrollfade_core::paths;

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Whether the alternate screen currently belongs to the page
pub fn is_active() -> bool {
    ACTIVE.load(Ordering::Acquire)
}

/// Marks the terminal as owned for as long as it lives
struct ActiveFlag;

impl ActiveFlag {
    fn set() -> Self {
        ACTIVE.store(true, Ordering::Release);
        Self
    }
}

impl Drop for ActiveFlag {
    fn drop(&mut self) {
        ACTIVE.store(false, Ordering::Release);
    }
}

/// Raw mode + alternate screen + mouse capture, undone on drop
pub struct TerminalGuard {
    _active: ActiveFlag,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self {
            _active: ActiveFlag::set(),
        };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        if std::thread::panicking() {
            eprintln!(
                "scrollfade crashed; details in {}",
                paths::logs_dir().join("scrollfade.log").display()
            );
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Route panics to the log while the page owns the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if is_active() {
            tracing::error!(panic = %panic_info, "Panic while page active");
        } else {
            original_hook(panic_info);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::catch_unwind;

    #[test]
    fn test_caught_panic_leaves_terminal_owned() {
        {
            let _flag = ActiveFlag::set();
            assert!(is_active());

            let result = catch_unwind(|| panic!("listener failure"));
            assert!(result.is_err());
            assert!(is_active());
        }
        assert!(!is_active());
    }
}
