//! Per-command logging summary (spec §A.1), grounded on
//! `sqlx-core::logger::QueryLogger` but simplified to fixed `tracing`
//! levels instead of the teacher's dynamic `log::LevelFilter` machinery —
//! this driver has no per-statement log-level configuration to honor.

use std::time::Instant;

const LABEL_MAX: usize = 128;

/// Truncates `sql` to a bounded prefix so a large statement's log line
/// stays small.
pub(crate) fn truncate_label(sql: &str) -> &str {
    match sql.char_indices().nth(LABEL_MAX) {
        Some((end, _)) => &sql[..end],
        None => sql,
    }
}

/// Accumulates a single command's row counts and elapsed time, emitting
/// one summary event when dropped (i.e. once its owning result set is
/// fully drained, ended, or abandoned).
pub(crate) struct QueryLogger {
    label: Box<str>,
    rows_returned: u64,
    rows_affected: u64,
    start: Instant,
}

impl QueryLogger {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            label: truncate_label(label).into(),
            rows_returned: 0,
            rows_affected: 0,
            start: Instant::now(),
        }
    }

    pub(crate) fn increment_rows_returned(&mut self) {
        self.rows_returned += 1;
    }

    pub(crate) fn add_rows_affected(&mut self, n: u64) {
        self.rows_affected += n;
    }
}

impl Drop for QueryLogger {
    fn drop(&mut self) {
        tracing::debug!(
            sql = %self.label,
            rows_returned = self.rows_returned,
            rows_affected = self.rows_affected,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "query finished"
        );
    }
}
