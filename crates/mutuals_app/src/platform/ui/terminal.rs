use std::io::Write;

use chrono::Local;
use mutuals_core::{
    ActionFailure, ActionKind, Counts, DerivedSets, Identity, ListKind, PresentationSink,
};

use super::render;

/// Presentation sink that writes plain lines to a terminal (or any writer).
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.line(line);
        }
    }

    pub fn line(&mut self, text: &str) {
        // A closed stdout is not worth aborting over.
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn on_check_started(&mut self) {
        self.line("Fetching followers and following...");
    }

    fn on_check_busy(&mut self) {
        self.line("A check is already in progress; wait for it to finish.");
    }

    fn on_check_failed(&mut self, message: &str) {
        self.line(&format!("Error: {message}"));
    }

    fn on_snapshot_ready(&mut self, counts: Counts, derived: &DerivedSets) {
        let checked_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let lines = render::snapshot_lines(counts, derived, &checked_at);
        self.print_lines(&lines);
    }

    fn on_action_pending(&mut self, identity: &Identity, kind: ActionKind) {
        self.line(&format!("Processing {kind} {identity}..."));
    }

    fn on_action_succeeded(&mut self, identity: &Identity, kind: ActionKind, counts: Counts) {
        self.line(&format!("{identity}: {}", render::done_label(kind)));
        self.line(&render::counts_line(counts));
    }

    fn on_action_failed(&mut self, identity: &Identity, kind: ActionKind, reason: &ActionFailure) {
        match reason {
            ActionFailure::PrivateOrDeleted => {
                self.line(&format!("{identity}: private/deleted profile, cannot {kind}"));
            }
            other => self.line(&format!("Error ({kind} {identity}): {other}")),
        }
    }

    fn on_action_reset(&mut self, identity: &Identity, kind: ActionKind) {
        self.line(&format!("{identity}: you can retry with `{kind} {identity}`"));
    }

    fn on_item_retired(&mut self, identity: &Identity) {
        self.line(&format!("{identity} removed from the list"));
    }

    fn on_list_emptied(&mut self, list: ListKind) {
        self.line(render::empty_list_message(list));
    }
}
