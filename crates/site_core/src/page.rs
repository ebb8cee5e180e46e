//! Small page-level state: the navigation menu and the model-year list.

use chrono::{Datelike, Local};

pub const EARLIEST_MODEL_YEAR: i32 = 2015;

/// Model years from `current_year` down to `earliest`, inclusive.
pub fn model_years(current_year: i32, earliest: i32) -> Vec<i32> {
    (earliest..=current_year).rev().collect()
}

pub fn model_years_until_now(earliest: i32) -> Vec<i32> {
    model_years(Local::now().year(), earliest)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Body scrolling is locked while the menu covers the page.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
