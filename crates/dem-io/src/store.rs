//! Graph storage API.
//!
//! Layout under the store root, per graph name:
//! - `<name>.graph.json`   full graph
//! - `<name>.sample.graphml` sampled subgraph
//! - `<name>.summary.json` analysis summary
//! - `<name>.manifest.json` build manifest

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use dem_graph::{Graph, GraphSummary};
use tracing::{info, warn};

use crate::graphml::write_graphml;
use crate::types::{GraphManifest, StoredGraph};
use crate::{IoError, IoResult};

#[derive(Clone, Debug)]
pub struct GraphStore {
    root_dir: PathBuf,
}

impl GraphStore {
    pub fn new(root_dir: PathBuf) -> IoResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    pub fn graph_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.graph.json"))
    }

    pub fn sample_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.sample.graphml"))
    }

    pub fn summary_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.summary.json"))
    }

    pub fn manifest_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.manifest.json"))
    }

    /// Write the full graph as JSON.
    pub fn save_graph(&self, name: &str, graph: &Graph) -> IoResult<PathBuf> {
        let path = self.graph_path(name);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(writer, &StoredGraph::from(graph))?;
        info!(path = %path.display(), nodes = graph.node_count(), "graph saved");
        Ok(path)
    }

    /// Read and validate a graph written by [`save_graph`](Self::save_graph).
    pub fn load_graph(&self, name: &str) -> IoResult<Graph> {
        load_graph_file(&self.graph_path(name))
    }

    /// Write a (sampled) graph as GraphML.
    pub fn save_sample(&self, name: &str, graph: &Graph) -> IoResult<PathBuf> {
        let path = self.sample_path(name);
        write_graphml(graph, BufWriter::new(File::create(&path)?))?;
        info!(path = %path.display(), nodes = graph.node_count(), "sample saved");
        Ok(path)
    }

    pub fn save_summary(&self, name: &str, summary: &GraphSummary) -> IoResult<PathBuf> {
        let path = self.summary_path(name);
        fs::write(&path, serde_json::to_string_pretty(summary)?)?;
        Ok(path)
    }

    pub fn load_summary(&self, name: &str) -> IoResult<GraphSummary> {
        read_json(&self.summary_path(name), name)
    }

    pub fn save_manifest(&self, manifest: &GraphManifest) -> IoResult<PathBuf> {
        let path = self.manifest_path(&manifest.name);
        fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
        Ok(path)
    }

    pub fn load_manifest(&self, name: &str) -> IoResult<GraphManifest> {
        read_json(&self.manifest_path(name), name)
    }

    /// Manifests of every graph in the store, sorted by name.
    ///
    /// Manifests that fail to parse are skipped with a warning.
    pub fn list_manifests(&self) -> IoResult<Vec<GraphManifest>> {
        let mut manifests = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_suffix(".manifest.json") {
                match self.load_manifest(name) {
                    Ok(manifest) => manifests.push(manifest),
                    Err(err) => warn!(
                        path = %entry.path().display(),
                        error = %err,
                        "skipping unreadable manifest"
                    ),
                }
            }
        }
        manifests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(manifests)
    }
}

/// Read and validate a stored graph from any path.
pub fn load_graph_file(path: &Path) -> IoResult<Graph> {
    if !path.exists() {
        return Err(IoError::NotFound {
            name: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let stored: StoredGraph = serde_json::from_str(&content)?;
    let graph = stored.into_graph()?;
    info!(path = %path.display(), nodes = graph.node_count(), edges = graph.edge_count(), "graph loaded");
    Ok(graph)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, name: &str) -> IoResult<T> {
    if !path.exists() {
        return Err(IoError::NotFound {
            name: name.to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
