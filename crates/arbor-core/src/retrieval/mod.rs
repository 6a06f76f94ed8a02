//! The retrieval pipeline: solver-output projection, context formatting,
//! prompt construction, and the orchestrating engine.

mod assembler;
mod engine;
mod formatter;
mod prompt;

pub use assembler::{assemble, Subgraph, SubgraphEdge, SubgraphNode};
pub use engine::{Answer, RetrievalParams, Retriever};
pub use formatter::format_context;
pub use prompt::build_prompt;
