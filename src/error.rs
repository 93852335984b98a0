use thiserror::Error;

/// Errors raised while setting up or advancing a simulation.
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("At least 3 cells are required, got {cells}")]
    TooFewCells { cells: usize },

    #[error("Expected {expected} cells for the given edges, got {cells}")]
    CellCountMismatch { expected: usize, cells: usize },

    #[error("Degenerate mesh: edge {index} is not strictly below the next edge")]
    DegenerateMesh { index: usize },

    #[error("Interpolation point {x} lies outside [{lower}, {upper}]")]
    InterpolationOutOfRange { x: f64, lower: f64, upper: f64 },

    #[error("Invalid Riemann problem input: density {density}, pressure {pressure}")]
    InvalidRiemannInput { density: f64, pressure: f64 },

    #[error("Riemann solver did not converge after {iterations} iterations (p* = {pressure})")]
    RiemannNotConverged { iterations: usize, pressure: f64 },

    #[error("True anomaly bisection did not converge at time {time}")]
    OrbitNotConverged { time: f64 },

    #[error(
        "Unphysical state in cell {cell}: density {density}, pressure {pressure}, velocity {velocity}"
    )]
    UnphysicalState {
        cell: usize,
        density: f64,
        pressure: f64,
        velocity: f64,
    },

    #[error("Invalid time step {dt}")]
    InvalidTimeStep { dt: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not parse '{token}' in {path}")]
    TableParse { path: String, token: String },

    #[error("Malformed snapshot {path}: {reason}")]
    SnapshotFormat { path: String, reason: String },

    #[error("Reference table {path} contains no data")]
    EmptyTable { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
