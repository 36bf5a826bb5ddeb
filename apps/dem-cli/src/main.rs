use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dem_graph::{BuildOptions, SizeCap, analyzer, export, sample};
use dem_io::{GraphStore, RasterFormat, graph_fingerprint, graphml, store};

mod pipeline;

use pipeline::{BuildJob, print_summary, run_job};

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Dem(#[from] dem_core::DemError),

    #[error(transparent)]
    Io(#[from] dem_io::IoError),

    #[error(transparent)]
    Project(#[from] dem_project::ProjectError),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Invalid arguments: {0}")]
    Usage(String),
}

#[derive(Parser)]
#[command(name = "dem-cli")]
#[command(about = "Terrain graph builder - turns elevation rasters into grid graphs", long_about = None)]
struct Cli {
    /// Log per-stage wall-clock timings
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline file end to end
    Run {
        /// Path to the pipeline YAML file
        pipeline_path: PathBuf,
    },
    /// Validate pipeline file syntax and values
    Validate {
        /// Path to the pipeline YAML file
        pipeline_path: PathBuf,
    },
    /// Build a graph from a raster without a pipeline file
    Build {
        /// Elevation raster
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Hgt)]
        format: FormatArg,
        /// Raster rows (raw-i16 only)
        #[arg(long)]
        rows: Option<usize>,
        /// Raster cols (raw-i16 only)
        #[arg(long)]
        cols: Option<usize>,
        /// Keep only the top-left max_rows x max_cols window
        #[arg(long, requires = "max_cols")]
        max_rows: Option<usize>,
        #[arg(long, requires = "max_rows")]
        max_cols: Option<usize>,
        #[arg(long)]
        parallel: bool,
        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,
        /// Output file stem; defaults to the input file stem
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 100)]
        sample_size: usize,
    },
    /// Print the analysis of a stored graph
    Analyze {
        /// Path to a `.graph.json` file
        graph_path: PathBuf,
    },
    /// Write the first N nodes of a stored graph as GraphML
    Sample {
        /// Path to a `.graph.json` file
        graph_path: PathBuf,
        #[arg(short, default_value_t = 100)]
        n: usize,
        /// Output GraphML file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a stored graph, or its first N nodes, as Graphviz DOT
    Dot {
        /// Path to a `.graph.json` file
        graph_path: PathBuf,
        /// Keep only the first N nodes
        #[arg(short)]
        n: Option<usize>,
        /// Output `.dot` file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List builds recorded in an output directory
    Runs {
        /// Output directory
        dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Hgt,
    RawI16,
    Json,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.timing {
        dem_core::timing::enable_timing();
    }

    match cli.command {
        Commands::Run { pipeline_path } => cmd_run(&pipeline_path),
        Commands::Validate { pipeline_path } => cmd_validate(&pipeline_path),
        Commands::Build {
            input,
            format,
            rows,
            cols,
            max_rows,
            max_cols,
            parallel,
            out,
            name,
            sample_size,
        } => {
            let format = raster_format(format, rows, cols)?;
            let name = match name {
                Some(name) => name,
                None => file_stem(&input)?,
            };
            let job = BuildJob {
                name,
                input,
                format,
                options: BuildOptions {
                    size_cap: max_rows.zip(max_cols).map(|(r, c)| SizeCap::new(r, c)),
                    parallel,
                },
                out_dir: out,
                sample_size,
                full_graph_limit: None,
                write_summary: true,
            };
            cmd_build(&job)
        }
        Commands::Analyze { graph_path } => cmd_analyze(&graph_path),
        Commands::Sample {
            graph_path,
            n,
            output,
        } => cmd_sample(&graph_path, n, &output),
        Commands::Dot {
            graph_path,
            n,
            output,
        } => cmd_dot(&graph_path, n, &output),
        Commands::Runs { dir } => cmd_runs(dir),
    }
}

fn cmd_run(pipeline_path: &Path) -> CliResult<()> {
    let pipeline = dem_project::load_yaml(pipeline_path)?;
    println!("Running pipeline: {}", pipeline.name);
    cmd_build(&BuildJob::from(&pipeline))
}

fn cmd_validate(pipeline_path: &Path) -> CliResult<()> {
    println!("Validating pipeline: {}", pipeline_path.display());
    dem_project::load_yaml(pipeline_path)?;
    println!("✓ Pipeline is valid");
    Ok(())
}

fn cmd_build(job: &BuildJob) -> CliResult<()> {
    let output = run_job(job)?;
    println!(
        "✓ Built {}: {} nodes, {} edges",
        output.manifest.name,
        output.graph.node_count(),
        output.graph.edge_count()
    );
    println!("  fingerprint: {}", output.manifest.fingerprint);
    for file in &output.manifest.outputs {
        println!("  wrote {}", job.out_dir.join(file).display());
    }
    println!();
    print_summary(&output.summary);
    Ok(())
}

fn cmd_analyze(graph_path: &Path) -> CliResult<()> {
    let graph = store::load_graph_file(graph_path)?;
    println!("Graph: {}", graph_path.display());
    println!("Fingerprint: {}", graph_fingerprint(&graph));
    print_summary(&analyzer::summarize(&graph)?);
    Ok(())
}

fn cmd_sample(graph_path: &Path, n: usize, output: &Path) -> CliResult<()> {
    let graph = store::load_graph_file(graph_path)?;
    let sampled = sample(&graph, n);
    let mut file = std::io::BufWriter::new(std::fs::File::create(output)?);
    graphml::write_graphml(&sampled, &mut file)?;
    println!(
        "✓ Sample written to {} ({} nodes, {} edges)",
        output.display(),
        sampled.node_count(),
        sampled.edge_count()
    );
    Ok(())
}

fn cmd_dot(graph_path: &Path, n: Option<usize>, output: &Path) -> CliResult<()> {
    let mut graph = store::load_graph_file(graph_path)?;
    if let Some(n) = n {
        graph = sample(&graph, n);
    }
    std::fs::write(output, export::to_dot(&graph))?;
    println!(
        "✓ DOT written to {} ({} nodes, {} edges)",
        output.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}

fn cmd_runs(dir: PathBuf) -> CliResult<()> {
    let store = GraphStore::new(dir)?;
    let manifests = store.list_manifests()?;

    if manifests.is_empty() {
        println!("No builds found in {}", store.root().display());
        return Ok(());
    }

    println!("Builds in {}:", store.root().display());
    for m in manifests {
        println!(
            "  {} - {} x {} ({} nodes, {} edges) {}",
            m.name,
            m.summary.rows,
            m.summary.cols,
            m.summary.node_count,
            m.summary.edge_count,
            m.created_at
        );
    }
    Ok(())
}

fn raster_format(
    format: FormatArg,
    rows: Option<usize>,
    cols: Option<usize>,
) -> CliResult<RasterFormat> {
    Ok(match format {
        FormatArg::Hgt => RasterFormat::Hgt,
        FormatArg::Json => RasterFormat::Json,
        FormatArg::RawI16 => match (rows, cols) {
            (Some(rows), Some(cols)) => RasterFormat::RawI16 { rows, cols },
            _ => {
                return Err(CliError::Usage(
                    "raw-i16 input needs --rows and --cols".to_string(),
                ));
            }
        },
    })
}

fn file_stem(path: &Path) -> CliResult<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Usage(format!("cannot derive a name from {}", path.display())))
}
