//! Benchmark driver: resolves one run configuration and executes the
//! measured loop.

use std::hint::black_box;

use crate::fixture::Fixtures;
use crate::pred::{ArgLabel, Family, Implementation, LookupError, PredicateTable};

/// Raw record handed over by the benchmark-matrix collaborator. The field
/// vocabulary follows the matrix files: `version` selects the
/// implementation and `n` is the requested iteration count before
/// coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig {
    pub family: String,
    pub version: String,
    pub argument: String,
    pub n: f64,
}

/// Immutable resolved configuration for a single run. Created once per
/// invocation and discarded when the run completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub family: Family,
    pub implementation: Implementation,
    pub argument: ArgLabel,
    pub iterations: u32,
}

impl RunConfig {
    pub fn resolve(raw: &RawConfig) -> Result<Self, LookupError> {
        Ok(Self {
            family: Family::resolve(&raw.family)?,
            implementation: Implementation::resolve(&raw.version)?,
            argument: ArgLabel::resolve(&raw.argument)?,
            iterations: coerce_iterations(raw.n),
        })
    }
}

/// Truncates the requested count toward zero into 32-bit range. Negative
/// requests (and NaN) run zero iterations rather than failing.
pub fn coerce_iterations(n: f64) -> u32 {
    let n = n as i32;
    if n < 0 { 0 } else { n as u32 }
}

/// Timing collaborator interface: one start signal immediately before the
/// loop, one end signal with the executed count immediately after.
pub trait Reporter {
    fn start(&mut self);
    fn end(&mut self, count: u64);
}

/// Executes the resolved predicate against the resolved subject exactly
/// `iterations` times, sequentially, with no early exit. The boolean
/// results fold into a sink consumed by `black_box` so the loop survives
/// optimization.
pub fn run<R: Reporter>(cfg: RunConfig, table: &PredicateTable, fixtures: &Fixtures, reporter: &mut R) {
    let checker = table.resolve(cfg.implementation, cfg.family);
    let subject = fixtures.subject(cfg.family, cfg.argument);
    tracing::debug!(
        family = cfg.family.key(),
        implementation = cfg.implementation.key(),
        argument = cfg.argument.key(),
        iterations = cfg.iterations,
        subject = subject.type_name(),
        "starting measured loop"
    );
    reporter.start();
    let mut sink = false;
    for _ in 0..cfg.iterations {
        sink ^= checker.check(subject);
    }
    black_box(sink);
    reporter.end(u64::from(cfg.iterations));
}

/// Resolves `raw` and runs it. Lookup failures surface here, before any
/// start signal reaches the reporter. Returns the resolved configuration
/// so callers can label the measurement.
pub fn run_raw<R: Reporter>(
    raw: &RawConfig,
    table: &PredicateTable,
    fixtures: &Fixtures,
    reporter: &mut R,
) -> Result<RunConfig, LookupError> {
    let cfg = RunConfig::resolve(raw)?;
    run(cfg, table, fixtures, reporter);
    Ok(cfg)
}
