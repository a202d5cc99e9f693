//! Timing and result reporting.
//!
//! The `Stopwatch` is the timing collaborator the driver signals into; the
//! suite report collects labeled measurements and renders or exports them.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::driver::{Reporter, RunConfig};

/// Stamps the loop boundaries and derives the elapsed measurement.
#[derive(Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    completed: Option<Measurement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub ops: u64,
    pub elapsed: Duration,
}

impl Measurement {
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.ops as f64 / secs } else { 0.0 }
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The measurement of the last completed run, if any.
    pub fn measurement(&self) -> Option<Measurement> {
        self.completed
    }
}

impl Reporter for Stopwatch {
    fn start(&mut self) {
        self.completed = None;
        self.started_at = Some(Instant::now());
    }

    fn end(&mut self, count: u64) {
        match self.started_at.take() {
            Some(started) => {
                self.completed = Some(Measurement {
                    ops: count,
                    elapsed: started.elapsed(),
                });
            }
            None => tracing::warn!("end signal with no matching start"),
        }
    }
}

/// One labeled measurement.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub family: &'static str,
    pub implementation: &'static str,
    pub argument: &'static str,
    pub ops: u64,
    pub elapsed_secs: f64,
    pub ops_per_sec: f64,
}

impl RunRecord {
    pub fn new(cfg: RunConfig, m: Measurement) -> Self {
        Self {
            family: cfg.family.key(),
            implementation: cfg.implementation.key(),
            argument: cfg.argument.key(),
            ops: m.ops,
            elapsed_secs: m.elapsed.as_secs_f64(),
            ops_per_sec: m.ops_per_sec(),
        }
    }

    /// One human-readable line, shared by progress output and logs.
    pub fn describe(&self) -> String {
        format!(
            "{}/{}/{}: {} ops in {:.3}s -> {:.0} ops/sec",
            self.family, self.implementation, self.argument, self.ops, self.elapsed_secs, self.ops_per_sec
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub generated_at: String,
    pub records: Vec<RunRecord>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:<9} {:<16} {:>12} {:>10} {:>14}",
            "family", "impl", "argument", "ops", "secs", "ops/sec"
        );
        for r in &self.records {
            let _ = writeln!(
                out,
                "{:<10} {:<9} {:<16} {:>12} {:>10.3} {:>14.0}",
                r.family, r.implementation, r.argument, r.ops, r.elapsed_secs, r.ops_per_sec
            );
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("write {}", path.display()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer =
            BufWriter::new(File::create(path).with_context(|| format!("create {}", path.display()))?);
        writeln!(writer, "family,implementation,argument,ops,elapsed_secs,ops_per_sec")?;
        for r in &self.records {
            writeln!(
                writer,
                "{},{},{},{},{:.6},{:.2}",
                r.family, r.implementation, r.argument, r.ops, r.elapsed_secs, r.ops_per_sec
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for SuiteReport {
    fn default() -> Self {
        Self::new()
    }
}
