//! End-to-end build: raster -> graph -> analysis -> persisted outputs.

use std::path::{Path, PathBuf};

use dem_core::timing::Timer;
use dem_graph::{BuildOptions, Graph, GraphBuilder, GraphSummary, SizeCap, analyzer, sample};
use dem_io::{GraphManifest, GraphStore, RasterFormat, graph_fingerprint, raster};
use dem_project::{Pipeline, RasterFormatDef};
use tracing::{info, warn};

use crate::CliResult;

/// Everything one build needs, whether it came from a pipeline file or flags.
#[derive(Debug, Clone)]
pub struct BuildJob {
    pub name: String,
    pub input: PathBuf,
    pub format: RasterFormat,
    pub options: BuildOptions,
    pub out_dir: PathBuf,
    pub sample_size: usize,
    pub full_graph_limit: Option<usize>,
    pub write_summary: bool,
}

impl From<&Pipeline> for BuildJob {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            name: pipeline.name.clone(),
            input: pipeline.input.path.clone(),
            format: raster_format(pipeline.input.format),
            options: BuildOptions {
                size_cap: pipeline
                    .build
                    .size_cap
                    .map(|c| SizeCap::new(c.max_rows, c.max_cols)),
                parallel: pipeline.build.parallel,
            },
            out_dir: pipeline.output.dir.clone(),
            sample_size: pipeline.output.sample_size,
            full_graph_limit: pipeline.output.full_graph_limit,
            write_summary: pipeline.output.write_summary,
        }
    }
}

impl BuildJob {
    /// Whether a graph of `node_count` nodes is written in full.
    /// No limit means always.
    pub fn writes_full_graph(&self, node_count: usize) -> bool {
        self.full_graph_limit.is_none_or(|limit| node_count <= limit)
    }
}

fn raster_format(def: RasterFormatDef) -> RasterFormat {
    match def {
        RasterFormatDef::Hgt => RasterFormat::Hgt,
        RasterFormatDef::RawI16 { rows, cols } => RasterFormat::RawI16 { rows, cols },
        RasterFormatDef::Json => RasterFormat::Json,
    }
}

/// Result of a finished job.
pub struct JobOutput {
    pub graph: Graph,
    pub summary: GraphSummary,
    pub manifest: GraphManifest,
}

pub fn run_job(job: &BuildJob) -> CliResult<JobOutput> {
    let total = Timer::start("total");

    let dem = raster::load(&job.input, job.format)?;
    let graph = GraphBuilder::with_options(job.options).build(&dem)?;

    let timer = Timer::start("analyze");
    let summary = analyzer::summarize(&graph)?;
    timer.stop_and_log();

    let store = GraphStore::new(job.out_dir.clone())?;
    let mut outputs = Vec::new();

    let sampled = sample(&graph, job.sample_size);
    outputs.push(file_name(&store.save_sample(&job.name, &sampled)?));

    if job.writes_full_graph(graph.node_count()) {
        outputs.push(file_name(&store.save_graph(&job.name, &graph)?));
    } else {
        warn!(
            nodes = graph.node_count(),
            limit = job.full_graph_limit,
            "graph exceeds full_graph_limit; only the sample is written"
        );
    }

    if job.write_summary {
        outputs.push(file_name(&store.save_summary(&job.name, &summary)?));
    }

    let manifest = GraphManifest {
        name: job.name.clone(),
        fingerprint: graph_fingerprint(&graph),
        created_at: chrono::Utc::now().to_rfc3339(),
        source: Some(job.input.display().to_string()),
        size_cap: job.options.size_cap,
        summary: summary.clone(),
        outputs,
    };
    store.save_manifest(&manifest)?;
    info!(name = %job.name, dir = %store.root().display(), "outputs written");

    total.stop_and_log();
    Ok(JobOutput {
        graph,
        summary,
        manifest,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Plain-text report of a summary.
pub fn print_summary(summary: &GraphSummary) {
    println!("=== Graph Analysis ===");
    println!("Grid:            {} x {}", summary.rows, summary.cols);
    println!("Nodes:           {}", summary.node_count);
    println!("Edges:           {}", summary.edge_count);
    println!(
        "Average degree:  {:.2} (min {}, max {})",
        summary.degree.average_degree, summary.degree.min_degree, summary.degree.max_degree
    );
    println!(
        "Elevation range: {} to {}",
        summary.elevation_min, summary.elevation_max
    );
    println!("Is connected:    {}", summary.is_connected);
    if !summary.is_connected {
        println!("Components:      {}", summary.component_count);
        println!("Largest:         {}", summary.largest_component_size);
    }
}
