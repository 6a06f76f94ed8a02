//! Factory for creating solver implementations.

use std::sync::Arc;

use arbor_core::traits::{SolverProvider, SteinerSolver};

use crate::gw::GwSolver;

/// Factory for creating Steiner-tree solvers.
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver from the given provider type.
    pub fn create(provider: SolverProvider) -> Arc<dyn SteinerSolver> {
        match provider {
            SolverProvider::Gw => Arc::new(GwSolver::new()),
        }
    }

    /// Create the default path-based solver.
    pub fn gw() -> Arc<dyn SteinerSolver> {
        Self::create(SolverProvider::Gw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_default_solver() {
        let solver = SolverFactory::gw();
        assert_eq!(solver.name(), "gw");
    }
}
