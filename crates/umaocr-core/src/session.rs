use crate::config::PipelineConfig;
use crate::error::UmaError;
use crate::model::{Column, Fragment, Line, Record};
use crate::recognition::RecognitionEngine;
use crate::table::Table;
use crate::{extract_rows, PassStats};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// Receives the table after every change (append batch, reset, sort).
pub trait TableSink: Send {
    fn table_changed(&mut self, records: &[Record]);
}

/// Result of one paste.
#[derive(Debug, Clone, Serialize)]
pub struct PassSummary {
    pub pass_number: usize,
    pub appended: Vec<Record>,
    pub stats: PassStats,
    #[serde(skip)]
    pub lines: Vec<Line>,
}

/// Owns the accumulated table for one session and runs passes against it.
pub struct Session {
    config: PipelineConfig,
    table: Table,
    sinks: Vec<Box<dyn TableSink>>,
    passes: usize,
}

impl Session {
    pub fn new(config: PipelineConfig) -> Self {
        Session {
            config,
            table: Table::new(),
            sinks: Vec::new(),
            passes: 0,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn TableSink>) {
        self.sinks.push(sink);
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of passes that completed and appended to the table.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Recognize `image` and append its rows.
    ///
    /// `None` or an empty image is [`UmaError::NoInput`]. A recognition
    /// failure aborts the pass; the table is left exactly as it was.
    pub fn paste(
        &mut self,
        image: Option<&[u8]>,
        engine: &dyn RecognitionEngine,
    ) -> Result<PassSummary, UmaError> {
        let image = match image {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                tracing::warn!("paste requested without an image");
                return Err(UmaError::NoInput);
            }
        };

        let fragments = engine.recognize(image).map_err(|e| {
            tracing::warn!(backend = engine.backend_name(), error = %e, "recognition failed, pass aborted");
            e
        })?;

        Ok(self.paste_fragments(fragments))
    }

    /// Run a pass over already-recognized fragments.
    pub fn paste_fragments(&mut self, fragments: Vec<Fragment>) -> PassSummary {
        let output = extract_rows(fragments, &self.config);

        let appended: Vec<Record> = output
            .rows
            .into_iter()
            .map(|row| self.table.append(row.name, row.value))
            .collect();

        self.passes += 1;
        tracing::info!(
            pass = self.passes,
            appended = appended.len(),
            lines = output.stats.lines,
            dropped_fragments = output.stats.fragments_received - output.stats.fragments_kept,
            total_rows = self.table.len(),
            "pass complete"
        );
        self.notify();

        PassSummary {
            pass_number: self.passes,
            appended,
            stats: output.stats,
            lines: output.lines,
        }
    }

    /// Clear the table and restart numbering at 1.
    pub fn reset(&mut self) {
        self.table.reset();
        self.passes = 0;
        tracing::info!("table cleared");
        self.notify();
    }

    pub fn sort_by(&mut self, column: Column, descending: bool) {
        self.table.sort_by(column, descending);
        self.notify();
    }

    fn notify(&mut self) {
        let records = self.table.records();
        for sink in &mut self.sinks {
            sink.table_changed(records);
        }
    }
}

/// A session shared between triggers (UI buttons, hotkeys, ...).
///
/// Only one pass may run at a time; a paste that arrives while another is
/// in flight is rejected with [`UmaError::PassInFlight`].
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        SharedSession {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn try_paste(
        &self,
        image: Option<&[u8]>,
        engine: &dyn RecognitionEngine,
    ) -> Result<PassSummary, UmaError> {
        let mut session = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(UmaError::PassInFlight),
            Err(TryLockError::Poisoned(p)) => p.into_inner(),
        };
        session.paste(image, engine)
    }

    /// Run `f` with exclusive access, waiting for any running pass.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
