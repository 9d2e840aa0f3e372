use std::io::{self, Write};
use std::sync::Arc;

use auto_impl::auto_impl;
use parking_lot::Mutex;
use serde::Serialize;

use crate::def::OutputFormat;
use crate::state::{Calendar, Climate};

pub const CSV_HEADER: &str = "temp, precip, height, deer, wolves";

/// The state of one finished month: that month's weather with the populations it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthRow {
    pub year: i32,
    pub month: u32,
    pub temp: f32,
    pub precip: f32,
    pub height: f32,
    pub deer: i32,
    pub wolves: i32,
}

impl MonthRow {
    pub fn new(calendar: Calendar, climate: Climate, height: f32, deer: i32, wolves: i32) -> Self {
        Self {
            year: calendar.year,
            month: calendar.month,
            temp: climate.temp,
            precip: climate.precip,
            height,
            deer,
            wolves,
        }
    }

    pub fn to_csv(&self) -> String {
        format!(
            "{:.2}, {:.2}, {:.2}, {:2}, {:2}",
            self.temp, self.precip, self.height, self.deer, self.wolves
        )
    }

    pub fn to_text(&self) -> String {
        format!(
            "temp: {:.2}; precip: {:.2} ; height: {:.2} ; deer: {:2}; wolves: {:2}",
            self.temp, self.precip, self.height, self.deer, self.wolves
        )
    }

    pub fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Text => self.to_text(),
        }
    }
}

/// Destination of the monthly rows. Called from the watcher thread only.
#[auto_impl(&mut, Box)]
pub trait Reporter: Send {
    fn emit(&mut self, row: &MonthRow) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one formatted line per month, e.g. to stdout.
pub struct WriterReporter<W: Write + Send> {
    out: W,
    format: OutputFormat,
    header_pending: bool,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(out: W, format: OutputFormat, header: bool) -> Self {
        Self {
            out,
            format,
            header_pending: header && format == OutputFormat::Csv,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn emit(&mut self, row: &MonthRow) -> io::Result<()> {
        if self.header_pending {
            writeln!(self.out, "{}", CSV_HEADER)?;
            self.header_pending = false;
        }
        writeln!(self.out, "{}", row.format(self.format))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Keeps every row in memory; clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryReporter {
    rows: Arc<Mutex<Vec<MonthRow>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<MonthRow> {
        self.rows.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn emit(&mut self, row: &MonthRow) -> io::Result<()> {
        self.rows.lock().push(*row);
        Ok(())
    }
}

/// A reporter shared between the watcher and the caller of the run.
///
/// The first write error is kept and every later row is dropped, so the run itself never
/// stalls on a broken sink; the caller inspects `take_error` once the team has finished.
pub struct ReportSink<R: Reporter> {
    reporter: R,
    error: Option<io::Error>,
    rows: u64,
}

impl<R: Reporter> ReportSink<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            error: None,
            rows: 0,
        }
    }

    pub fn emit(&mut self, row: &MonthRow) {
        if self.error.is_some() {
            return;
        }
        match self.reporter.emit(row) {
            Ok(()) => self.rows += 1,
            Err(e) => {
                log::error!("report failed at {}-{:02}: {}", row.year, row.month + 1, e);
                self.error = Some(e);
            }
        }
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.reporter.flush()
    }
}

pub type SharedSink<R> = Arc<Mutex<ReportSink<R>>>;
