use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tpb_core::{
    driver::{self, RawConfig},
    fixture::Fixtures,
    matrix::MatrixSpec,
    pred::PredicateTable,
    report::{RunRecord, Stopwatch, SuiteReport},
};


static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "tpb_core=info,tpb_cli=info";

#[derive(Debug, Parser)]
#[command(
    name = "tpb",
    author,
    about = "Type-predicate micro-benchmark, native vs scripted",
    long_about = None
)]
struct CliArgs {
    /// Predicate family to exercise; empty selects the wide any-view check
    #[arg(long = "type", value_name = "FAMILY", default_value = "")]
    family: String,

    /// Implementation under test: native, or js/scripted
    #[arg(long, value_name = "IMPL")]
    version: Option<String>,

    /// Fixture selector: true, false-primitive or false-object
    #[arg(long, value_name = "LABEL")]
    argument: Option<String>,

    /// Requested iteration count; coerced to a 32-bit integer
    #[arg(short, long, default_value_t = 5e6, allow_negative_numbers = true)]
    n: f64,

    /// Sweep a matrix file instead of a single configuration
    #[arg(long, value_name = "FILE", conflicts_with_all = ["version", "argument"])]
    matrix: Option<PathBuf>,

    /// Directory to export results.json and results.csv into
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

impl CliArgs {
    /// Expands the invocation into the raw run records to execute: one
    /// record when the implementation and argument are pinned, a matrix
    /// sweep otherwise.
    fn runs(&self) -> Result<Vec<RawConfig>> {
        if let Some(path) = &self.matrix {
            return Ok(MatrixSpec::load(path)?.expand());
        }
        if self.version.is_some() || self.argument.is_some() {
            let version = self
                .version
                .clone()
                .ok_or_else(|| anyhow!("--argument needs --version to pin a single run"))?;
            let argument = self
                .argument
                .clone()
                .ok_or_else(|| anyhow!("--version needs --argument to pin a single run"))?;
            return Ok(vec![RawConfig {
                family: self.family.clone(),
                version,
                argument,
                n: self.n,
            }]);
        }
        let mut spec = MatrixSpec::default();
        if !self.family.is_empty() {
            spec.family = vec![self.family.clone()];
        }
        spec.n = vec![self.n];
        Ok(spec.expand())
    }
}

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACE_FILTER));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let table = PredicateTable::new();
    let fixtures = Fixtures::new();
    fixtures.verify(&table).context("fixture self-check failed")?;

    let raws = args.runs()?;

    let mut report = SuiteReport::new();
    let mut watch = Stopwatch::new();
    for raw in &raws {
        let cfg = driver::run_raw(raw, &table, &fixtures, &mut watch)?;
        let measurement = watch
            .measurement()
            .context("stopwatch captured no measurement")?;
        let record = RunRecord::new(cfg, measurement);
        println!("{}", record.describe());
        report.push(record);
    }

    if raws.len() > 1 {
        println!();
        print!("{}", report.render_table());
    }

    if let Some(dir) = &args.export {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create export directory {}", dir.display()))?;
        report.write_json(&dir.join("results.json"))?;
        report.write_csv(&dir.join("results.csv"))?;
    }

    Ok(())
}
