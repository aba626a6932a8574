//! Progress reporting while a walk is running

use std::io::{self, Write};

use super::item::Item;
use super::walker::WalkCounts;

/// Receives every item right after it joins the tree.
pub trait WalkProgress {
    fn on_item(&mut self, item: &Item, counts: &WalkCounts);

    fn finish(&mut self, _counts: &WalkCounts) {}
}

/// Reports nothing.
#[derive(Debug, Default)]
pub struct NoProgress;

impl WalkProgress for NoProgress {
    fn on_item(&mut self, _item: &Item, _counts: &WalkCounts) {}
}

/// One stderr line, rewritten in place as counts grow.
#[derive(Debug, Default)]
pub struct StatusLine {
    last_len: usize,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn redraw(&mut self, text: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        let pad = self.last_len.saturating_sub(text.chars().count());
        write!(stderr, "\r{}{}", text, " ".repeat(pad))?;
        stderr.flush()?;
        self.last_len = text.chars().count();
        Ok(())
    }
}

impl WalkProgress for StatusLine {
    fn on_item(&mut self, _item: &Item, counts: &WalkCounts) {
        // Cosmetic only; a broken stderr must not fail the walk.
        let _ = self.redraw(&format!("scanned: {}", counts));
    }

    fn finish(&mut self, _counts: &WalkCounts) {
        let blank = " ".repeat(self.last_len);
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{}\r", blank);
        let _ = stderr.flush();
        self.last_len = 0;
    }
}

/// One log event per item.
#[derive(Debug, Default)]
pub struct VerboseProgress;

impl WalkProgress for VerboseProgress {
    fn on_item(&mut self, item: &Item, _counts: &WalkCounts) {
        tracing::info!(kind = %item.kind(), size = item.size(), "{}", item.full_path().display());
    }

    fn finish(&mut self, counts: &WalkCounts) {
        tracing::info!("walk finished: {}", counts);
    }
}

/// Collects every visited item name, in visit order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingProgress {
    pub names: Vec<String>,
    pub finished: bool,
}

#[cfg(test)]
impl WalkProgress for RecordingProgress {
    fn on_item(&mut self, item: &Item, _counts: &WalkCounts) {
        self.names.push(item.name().to_string());
    }

    fn finish(&mut self, _counts: &WalkCounts) {
        self.finished = true;
    }
}
