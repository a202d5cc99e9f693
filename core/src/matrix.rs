//! Benchmark-matrix expansion.
//!
//! A matrix file lists the option values to sweep; expansion is the cross
//! product in declaration order, one `RawConfig` per combination.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::driver::RawConfig;
use crate::pred::{ArgLabel, Family, Implementation};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixSpec {
    #[serde(default = "MatrixSpec::default_families")]
    pub family: Vec<String>,
    #[serde(default = "MatrixSpec::default_versions")]
    pub version: Vec<String>,
    #[serde(default = "MatrixSpec::default_arguments")]
    pub argument: Vec<String>,
    #[serde(default = "MatrixSpec::default_n")]
    pub n: Vec<f64>,
}

impl Default for MatrixSpec {
    fn default() -> Self {
        Self {
            family: Self::default_families(),
            version: Self::default_versions(),
            argument: Self::default_arguments(),
            n: Self::default_n(),
        }
    }
}

impl MatrixSpec {
    fn default_families() -> Vec<String> {
        Family::ALL.iter().map(|f| f.key().to_string()).collect()
    }

    fn default_versions() -> Vec<String> {
        Implementation::ALL.iter().map(|i| i.key().to_string()).collect()
    }

    fn default_arguments() -> Vec<String> {
        ArgLabel::ALL.iter().map(|a| a.key().to_string()).collect()
    }

    fn default_n() -> Vec<f64> {
        vec![5e6]
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse matrix TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Cross product in declaration order: family, version, argument, n.
    pub fn expand(&self) -> Vec<RawConfig> {
        let mut out =
            Vec::with_capacity(self.family.len() * self.version.len() * self.argument.len() * self.n.len());
        for family in &self.family {
            for version in &self.version {
                for argument in &self.argument {
                    for &n in &self.n {
                        out.push(RawConfig {
                            family: family.clone(),
                            version: version.clone(),
                            argument: argument.clone(),
                            n,
                        });
                    }
                }
            }
        }
        out
    }
}
