//! Error types for arbor operations.
//!
//! This module provides the error hierarchy shared by every arbor crate,
//! with structured error codes for programmatic handling and source
//! chaining for wrapped collaborator failures.

use thiserror::Error;

/// Result type alias for arbor operations.
pub type ArborResult<T> = Result<T, ArborError>;

/// Main error type for all arbor operations.
#[derive(Error, Debug)]
pub enum ArborError {
    /// Malformed input tables: missing columns, duplicate node ids, or an
    /// edge referencing an unknown node.
    #[error("Schema violation: {message}")]
    Schema { message: String, code: ErrorCode },

    /// The graph has zero nodes; retrieval degenerates to no context.
    #[error("Graph is empty: no nodes to retrieve from")]
    EmptyGraph,

    /// The Steiner-tree solver rejected its input or returned an
    /// inconsistent result.
    #[error("Solver error: {message}")]
    Solver {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The embedding collaborator failed or returned a wrong-dimension
    /// vector.
    #[error("Embedding error: {message}")]
    Embedding {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The answer-generation LLM failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider not supported.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Schema (SCH_xxx)
    SchemaMissingColumn,
    SchemaDuplicateNode,
    SchemaUnknownNode,
    SchemaMalformedTable,

    // Graph (GRF_xxx)
    GraphEmpty,

    // Solver (SOL_xxx)
    SolverInvalidInput,
    SolverFailed,
    SolverInconsistentResult,

    // Embedding (EMB_xxx)
    EmbGenerationFailed,
    EmbDimensionMismatch,

    // LLM (LLM_xxx)
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Validation (VAL_xxx)
    ValInvalidInput,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SchemaMissingColumn => "SCH_001",
            ErrorCode::SchemaDuplicateNode => "SCH_002",
            ErrorCode::SchemaUnknownNode => "SCH_003",
            ErrorCode::SchemaMalformedTable => "SCH_004",
            ErrorCode::GraphEmpty => "GRF_001",
            ErrorCode::SolverInvalidInput => "SOL_001",
            ErrorCode::SolverFailed => "SOL_002",
            ErrorCode::SolverInconsistentResult => "SOL_003",
            ErrorCode::EmbGenerationFailed => "EMB_001",
            ErrorCode::EmbDimensionMismatch => "EMB_002",
            ErrorCode::LlmGenerationFailed => "LLM_001",
            ErrorCode::LlmInvalidResponse => "LLM_002",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ArborError {
    /// Create a schema violation error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            code: ErrorCode::SchemaMalformedTable,
        }
    }

    /// Create a schema violation with a specific code.
    pub fn schema_with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Schema {
            message: message.into(),
            code,
        }
    }

    /// Create a solver error.
    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver {
            message: message.into(),
            code: ErrorCode::SolverFailed,
            source: None,
        }
    }

    /// Create a solver invalid-input error.
    pub fn solver_input(message: impl Into<String>) -> Self {
        Self::Solver {
            message: message.into(),
            code: ErrorCode::SolverInvalidInput,
            source: None,
        }
    }

    /// Create a solver inconsistent-result error.
    pub fn solver_inconsistent(message: impl Into<String>) -> Self {
        Self::Solver {
            message: message.into(),
            code: ErrorCode::SolverInconsistentResult,
            source: None,
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbGenerationFailed,
            source: None,
        }
    }

    /// Create an embedding dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::Embedding {
            message: format!("expected embedding dimension {}, got {}", expected, got),
            code: ErrorCode::EmbDimensionMismatch,
            source: None,
        }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Schema { code, .. } => *code,
            Self::EmptyGraph => ErrorCode::GraphEmpty,
            Self::Solver { code, .. } => *code,
            Self::Embedding { code, .. } => *code,
            Self::Llm { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error() {
        let err = ArborError::schema_with_code(
            "edge references unknown node id '42'",
            ErrorCode::SchemaUnknownNode,
        );
        assert_eq!(err.code(), ErrorCode::SchemaUnknownNode);
        assert!(err.to_string().contains("unknown node id"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = ArborError::dimension_mismatch(384, 768);
        assert_eq!(err.code(), ErrorCode::EmbDimensionMismatch);
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_empty_graph_code() {
        assert_eq!(ArborError::EmptyGraph.code(), ErrorCode::GraphEmpty);
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::SchemaUnknownNode.as_str(), "SCH_003");
        assert_eq!(ErrorCode::SolverInconsistentResult.as_str(), "SOL_003");
        assert_eq!(ErrorCode::GraphEmpty.as_str(), "GRF_001");
    }
}
