pub mod boundary;
pub mod eos;
pub mod flux;
pub mod mesh;
pub mod reconstruction;
pub mod riemann_solver;
pub mod state;
