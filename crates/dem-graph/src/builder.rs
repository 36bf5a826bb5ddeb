//! Elevation grid to graph construction.

use dem_core::timing::Timer;
use dem_core::{DemError, DemResult, ElevationSource, NodeId, elevation_delta, ensure_finite};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::graph::{Edge, Graph, Node};
use crate::grid::GridIndex;

/// Top-left truncation applied to the input grid before building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeCap {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl SizeCap {
    pub fn new(max_rows: usize, max_cols: usize) -> Self {
        Self { max_rows, max_cols }
    }

    /// Effective dimensions of a `rows x cols` grid under this cap.
    pub fn apply(&self, rows: usize, cols: usize) -> (usize, usize) {
        (rows.min(self.max_rows), cols.min(self.max_cols))
    }
}

/// Knobs for a single build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Only the top-left `max_rows x max_cols` cells are used.
    pub size_cap: Option<SizeCap>,
    /// Partition the row scan across the rayon pool.
    pub parallel: bool,
}

/// Builds a [`Graph`] from an elevation array.
///
/// One node per cell in row-major order, one edge per pair of 4-adjacent
/// cells weighted by absolute elevation difference. Edges are emitted from
/// the lower id toward the higher one (down, then right), so each pair is
/// produced exactly once and no membership check is needed. The parallel
/// build uses the same rule per row and yields an identical graph.
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    options: BuildOptions,
}

impl GraphBuilder {
    /// Create a builder with no size cap, building serially.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Truncate the input to its top-left `max_rows x max_cols` corner.
    pub fn size_cap(mut self, max_rows: usize, max_cols: usize) -> Self {
        self.options.size_cap = Some(SizeCap::new(max_rows, max_cols));
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the graph.
    ///
    /// Fails with `EmptyInput` if the effective grid has no rows or columns,
    /// and with `NonFinite` if a sample is NaN or infinite. No partial graph
    /// is returned.
    pub fn build<S>(&self, source: &S) -> DemResult<Graph>
    where
        S: ElevationSource + Sync + ?Sized,
    {
        let timer = Timer::start("build_graph");

        let (src_rows, src_cols) = source.shape();
        let (rows, cols) = match self.options.size_cap {
            Some(cap) => cap.apply(src_rows, src_cols),
            None => (src_rows, src_cols),
        };
        if rows == 0 || cols == 0 {
            return Err(DemError::EmptyInput { rows, cols });
        }
        if (rows, cols) != (src_rows, src_cols) {
            info!(
                src_rows,
                src_cols, rows, cols, "size cap truncates input to top-left corner"
            );
        }

        let grid = GridIndex::new(rows, cols)?;
        info!(rows, cols, nodes = grid.len(), "building elevation graph");

        let nodes = if self.options.parallel {
            Self::par_nodes(source, grid)
        } else {
            Self::nodes(source, grid)
        };
        check_finite(&nodes)?;
        debug!(count = nodes.len(), "nodes created");

        let edges = if self.options.parallel {
            Self::par_edges(&nodes, grid)
        } else {
            Self::edges(&nodes, grid)
        };
        debug_assert_eq!(edges.len(), grid.adjacency_count());
        debug!(count = edges.len(), "edges created");

        let graph = Graph::assemble(grid, nodes, edges);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph created"
        );
        timer.stop_and_log();
        Ok(graph)
    }

    fn nodes<S: ElevationSource + ?Sized>(source: &S, grid: GridIndex) -> Vec<Node> {
        (0..grid.len()).map(|i| make_node(source, grid, i)).collect()
    }

    fn par_nodes<S>(source: &S, grid: GridIndex) -> Vec<Node>
    where
        S: ElevationSource + Sync + ?Sized,
    {
        (0..grid.len())
            .into_par_iter()
            .map(|i| make_node(source, grid, i))
            .collect()
    }

    fn edges(nodes: &[Node], grid: GridIndex) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(grid.adjacency_count());
        for row in 0..grid.rows() {
            edges.extend(row_edges(nodes, grid, row));
        }
        edges
    }

    fn par_edges(nodes: &[Node], grid: GridIndex) -> Vec<Edge> {
        // each row owns the edges leaving its cells downward and rightward
        (0..grid.rows())
            .into_par_iter()
            .flat_map_iter(|row| row_edges(nodes, grid, row))
            .collect()
    }
}

/// Build a graph from `source`, optionally truncated by `size_cap`.
pub fn build<S>(source: &S, size_cap: Option<SizeCap>) -> DemResult<Graph>
where
    S: ElevationSource + Sync + ?Sized,
{
    GraphBuilder::with_options(BuildOptions {
        size_cap,
        parallel: false,
    })
    .build(source)
}

fn make_node<S: ElevationSource + ?Sized>(source: &S, grid: GridIndex, index: usize) -> Node {
    let row = index / grid.cols();
    let col = index % grid.cols();
    Node {
        id: NodeId::from_index(index as u32),
        row: row as u32,
        col: col as u32,
        elevation: source.get(row, col),
    }
}

/// Edges owned by the cells of one row, in cell order.
fn row_edges(nodes: &[Node], grid: GridIndex, row: usize) -> impl Iterator<Item = Edge> + '_ {
    (0..grid.cols()).flat_map(move |col| {
        let from = &nodes[row * grid.cols() + col];
        grid.forward_neighbors(row, col).map(move |(r, c)| {
            let to = &nodes[r * grid.cols() + c];
            Edge {
                a: from.id,
                b: to.id,
                weight: elevation_delta(from.elevation, to.elevation),
            }
        })
    })
}

fn check_finite(nodes: &[Node]) -> DemResult<()> {
    for node in nodes {
        ensure_finite(node.elevation, "elevation sample")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dem_core::ElevationArray;

    fn dem(rows: Vec<Vec<f64>>) -> ElevationArray {
        ElevationArray::from_rows(rows).unwrap()
    }

    #[test]
    fn builder_basic() {
        let graph = GraphBuilder::new()
            .build(&dem(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]))
            .unwrap();
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.grid().rows(), 2);
        assert_eq!(graph.grid().cols(), 3);
    }

    #[test]
    fn edges_are_down_then_right() {
        let graph = GraphBuilder::new()
            .build(&dem(vec![vec![0.0, 1.0], vec![2.0, 3.0]]))
            .unwrap();
        let pairs: Vec<(u32, u32)> = graph
            .edges()
            .iter()
            .map(|e| (e.a.index(), e.b.index()))
            .collect();
        assert_eq!(pairs, vec![(0, 2), (0, 1), (1, 3), (2, 3)]);
    }

    #[test]
    fn size_cap_larger_than_input_is_a_no_op() {
        let graph = GraphBuilder::new()
            .size_cap(100, 100)
            .build(&dem(vec![vec![1.0, 2.0]]))
            .unwrap();
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn zero_cap_is_empty_input() {
        let err = GraphBuilder::new()
            .size_cap(0, 3)
            .build(&dem(vec![vec![1.0, 2.0]]))
            .unwrap_err();
        assert_eq!(err, DemError::EmptyInput { rows: 0, cols: 2 });
    }

    #[test]
    fn empty_array_is_empty_input() {
        let err = build(&dem(vec![]), None).unwrap_err();
        assert!(matches!(err, DemError::EmptyInput { .. }));
    }

    #[test]
    fn nan_sample_rejected() {
        let err = build(&dem(vec![vec![1.0, f64::NAN]]), None).unwrap_err();
        assert!(matches!(err, DemError::NonFinite { .. }));
    }

    #[test]
    fn infinite_sample_rejected_in_both_modes() {
        let dem = dem(vec![vec![1.0, 2.0], vec![f64::NEG_INFINITY, 4.0]]);
        for parallel in [false, true] {
            let err = GraphBuilder::new().parallel(parallel).build(&dem).unwrap_err();
            assert!(matches!(
                err,
                DemError::NonFinite {
                    what: "elevation sample",
                    ..
                }
            ));
        }
    }

    #[test]
    fn cap_excludes_non_finite_cells() {
        // the NaN sits outside the kept 1x2 corner
        let graph = GraphBuilder::new()
            .size_cap(1, 2)
            .build(&dem(vec![vec![1.0, 2.0, f64::NAN]]))
            .unwrap();
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn parallel_matches_serial() {
        let rows: Vec<Vec<f64>> = (0..17)
            .map(|r| (0..13).map(|c| ((r * 31 + c * 7) % 23) as f64).collect())
            .collect();
        let dem = dem(rows);

        let serial = GraphBuilder::new().build(&dem).unwrap();
        let parallel = GraphBuilder::new().parallel(true).build(&dem).unwrap();

        assert_eq!(serial.nodes(), parallel.nodes());
        assert_eq!(serial.edges(), parallel.edges());
    }
}
