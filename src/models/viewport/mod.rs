// Viewport model
// Which slice of the day the timetable grid shows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First visible hour of the morning window.
pub const MORNING_START: u32 = 9;
/// First visible hour of the afternoon window.
pub const AFTERNOON_START: u32 = 13;
/// Last hour label drawn on the grid (its row runs to 23:00).
pub const END_HOUR: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewportWindow {
    Morning,
    #[default]
    Afternoon,
}

impl ViewportWindow {
    pub fn start_hour(self) -> u32 {
        match self {
            ViewportWindow::Morning => MORNING_START,
            ViewportWindow::Afternoon => AFTERNOON_START,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewportWindow::Morning => "From 9 AM",
            ViewportWindow::Afternoon => "From 1 PM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewportWindow::Morning => ViewportWindow::Afternoon,
            ViewportWindow::Afternoon => ViewportWindow::Morning,
        }
    }
}

impl fmt::Display for ViewportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportWindow::Morning => f.write_str("Morning"),
            ViewportWindow::Afternoon => f.write_str("Afternoon"),
        }
    }
}

impl FromStr for ViewportWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(ViewportWindow::Morning),
            "afternoon" => Ok(ViewportWindow::Afternoon),
            _ => Err(format!("Unknown viewport window: '{}'", s)),
        }
    }
}

/// Hour range rendered by the grid. Purely a view concern: switching the
/// window never touches stored events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridViewport {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl GridViewport {
    pub fn from_window(window: ViewportWindow) -> Self {
        Self {
            start_hour: window.start_hour(),
            end_hour: END_HOUR,
        }
    }

    /// Whole-day range used by the exports (from the earliest window).
    pub fn full_range() -> Self {
        Self {
            start_hour: MORNING_START,
            end_hour: END_HOUR,
        }
    }

    /// Hour labels drawn down the time column, inclusive of `end_hour`.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start_hour..=self.end_hour
    }

    pub fn hour_count(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour) + 1
    }
}

impl Default for GridViewport {
    fn default() -> Self {
        Self::from_window(ViewportWindow::default())
    }
}
