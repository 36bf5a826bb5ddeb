use thiserror::Error;

pub type DemResult<T> = Result<T, DemError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemError {
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Node id {id} is outside a grid of {len} cells")]
    IdOutOfBounds { id: usize, len: usize },

    #[error("Empty input: effective grid is {rows}x{cols}")]
    EmptyInput { rows: usize, cols: usize },

    #[error("Empty graph: {what} needs at least one node")]
    EmptyGraph { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
