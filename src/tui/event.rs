use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::app::error::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Polls crossterm with a short timeout so the run loop ticks regularly
/// even when the keyboard is idle; ticks drive the live-banner check.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Select,
    Back,
    NextCategory,
    PrevCategory,
    LoadMore,
    Refresh,
    OpenInBrowser,
    None,
}
