//! arbor-solvers - Prize-collecting Steiner tree solvers for arbor.
//!
//! This crate provides implementations of the `SteinerSolver` capability
//! consumed by the retrieval pipeline.
//!
//! # Supported Solvers
//!
//! - **GwSolver** (default) - path-based Steiner approximation with
//!   Goemans-Williamson-style strong pruning.
//!
//! # Example
//!
//! ```ignore
//! use arbor_solvers::SolverFactory;
//!
//! let solver = SolverFactory::gw();
//! let solution = solver.solve(&input)?;
//! ```

mod factory;
mod gw;

pub use factory::SolverFactory;
pub use gw::GwSolver;

// Re-export core types for convenience
pub use arbor_core::traits::{
    PruningStrategy, SolverProvider, SteinerInput, SteinerSolution, SteinerSolver,
};
