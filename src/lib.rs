//! One-dimensional finite-volume hydrodynamics of a star passing a massive black hole.
pub mod disc;
pub mod error;
pub mod initialization;
pub mod io;
pub mod lane_emden;
pub mod solver;
pub mod source;
pub mod temporal_disc;
