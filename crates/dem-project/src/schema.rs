//! Pipeline schema definitions.
//!
//! ```yaml
//! version: 1
//! name: n39e035
//! input:
//!   path: N39E035.hgt
//!   format: { type: hgt }
//! build:
//!   size_cap: { max_rows: 100, max_cols: 100 }
//! output:
//!   dir: out
//!   sample_size: 100
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pipeline {
    pub version: u32,
    pub name: String,
    pub input: InputDef,
    #[serde(default)]
    pub build: BuildDef,
    #[serde(default)]
    pub output: OutputDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputDef {
    pub path: PathBuf,
    pub format: RasterFormatDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RasterFormatDef {
    Hgt,
    RawI16 { rows: usize, cols: usize },
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_cap: Option<SizeCapDef>,
    #[serde(default)]
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeCapDef {
    pub max_rows: usize,
    pub max_cols: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputDef {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Nodes kept in the GraphML sample.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// The full graph is written only up to this many nodes; `None` means always.
    #[serde(default = "default_full_graph_limit")]
    pub full_graph_limit: Option<usize>,
    #[serde(default = "default_true")]
    pub write_summary: bool,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            sample_size: default_sample_size(),
            full_graph_limit: default_full_graph_limit(),
            write_summary: true,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_sample_size() -> usize {
    100
}

fn default_full_graph_limit() -> Option<usize> {
    Some(10_000)
}

fn default_true() -> bool {
    true
}

impl Pipeline {
    /// Copy with relative input/output paths joined onto `base`.
    pub fn resolved(mut self, base: &Path) -> Self {
        if self.input.path.is_relative() {
            self.input.path = base.join(&self.input.path);
        }
        if self.output.dir.is_relative() {
            self.output.dir = base.join(&self.output.dir);
        }
        self
    }
}
