// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Mirrors pipeline progress into the shared status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status("Converting...");
    }
    fn log(&mut self, msg: &str) {
        // Multi-line summaries only go to the log; the status shows their first line.
        self.set_status(msg.lines().next().unwrap_or_default());
    }
    fn step_done(&mut self, step: &str) {
        self.done += 1;
        logd!("GUI: Step {} done ({}/{})", step, self.done, self.total);
    }
}
