//! Stable indexing between grid coordinates and node IDs.
//!
//! `NodeId = row * cols + col`. The mapping is a bijection over the cells
//! of a `rows x cols` grid and is never compacted or reassigned.

use dem_core::{DemError, DemResult, NodeId};

/// Up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Down, right: the directions that always lead to a higher id.
const FORWARD: [(isize, isize); 2] = [(1, 0), (0, 1)];

/// Largest grid whose node and edge ids both fit in `u32`.
pub const MAX_CELLS: usize = (u32::MAX / 2) as usize;

/// Pure mapping over grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    rows: usize,
    cols: usize,
}

impl GridIndex {
    /// Create an index for a `rows x cols` grid.
    ///
    /// Fails if the cell count exceeds [`MAX_CELLS`].
    pub fn new(rows: usize, cols: usize) -> DemResult<Self> {
        rows.checked_mul(cols)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or(DemError::InvalidArg {
                what: "grid cell count exceeds the node id space",
            })?;
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of 4-adjacent cell pairs in the full grid.
    pub fn adjacency_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.rows * (self.cols - 1) + self.cols * (self.rows - 1)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Node id of `(row, col)`.
    pub fn to_id(&self, row: usize, col: usize) -> DemResult<NodeId> {
        if !self.contains(row, col) {
            return Err(DemError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.id_of(row, col))
    }

    /// Inverse of [`to_id`](Self::to_id).
    pub fn to_coords(&self, id: NodeId) -> DemResult<(usize, usize)> {
        let idx = id.index() as usize;
        if idx >= self.len() {
            return Err(DemError::IdOutOfBounds {
                id: idx,
                len: self.len(),
            });
        }
        Ok((idx / self.cols, idx % self.cols))
    }

    /// In-bounds 4-neighbors of `(row, col)`, in up, down, left, right order.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let grid = *self;
        DIRECTIONS
            .into_iter()
            .filter_map(move |(dr, dc)| grid.step(row, col, dr, dc))
    }

    /// In-bounds down and right neighbors of `(row, col)`.
    ///
    /// Every 4-adjacency is reached exactly once when these are walked over
    /// all cells.
    pub fn forward_neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let grid = *self;
        FORWARD
            .into_iter()
            .filter_map(move |(dr, dc)| grid.step(row, col, dr, dc))
    }

    /// True if the two ids are distinct 4-adjacent cells.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        match (self.to_coords(a), self.to_coords(b)) {
            (Ok((ra, ca)), Ok((rb, cb))) => ra.abs_diff(rb) + ca.abs_diff(cb) == 1,
            _ => false,
        }
    }

    /// Caller guarantees `(row, col)` is in bounds.
    pub(crate) fn id_of(&self, row: usize, col: usize) -> NodeId {
        NodeId::from_index((row * self.cols + col) as u32)
    }

    fn step(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.contains(r, c).then_some((r, c))
    }
}
