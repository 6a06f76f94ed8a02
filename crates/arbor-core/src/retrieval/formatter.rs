//! Canonical textual rendering of an assembled subgraph.
//!
//! One `(SourceText -- RelationLabel -- TargetText)` line per directed
//! edge, followed by an isolated `(NodeText)` mention for every node
//! with no incident selected edge. Output is byte-deterministic and
//! contains no control characters other than newlines.

use std::collections::{HashMap, HashSet};

use crate::retrieval::Subgraph;

/// Render the subgraph as a prompt-ready context block.
pub fn format_context(subgraph: &Subgraph) -> String {
    let text_of: HashMap<usize, &str> = subgraph
        .nodes
        .iter()
        .map(|n| (n.index, n.text.as_str()))
        .collect();

    let mut connected: HashSet<usize> = HashSet::new();
    let mut lines = Vec::with_capacity(subgraph.edges.len() + subgraph.nodes.len());

    for edge in &subgraph.edges {
        connected.insert(edge.src_index);
        connected.insert(edge.dst_index);
        let src = text_of.get(&edge.src_index).copied().unwrap_or_default();
        let dst = text_of.get(&edge.dst_index).copied().unwrap_or_default();
        lines.push(format!(
            "({} -- {} -- {})",
            sanitize(src),
            sanitize(&edge.relation),
            sanitize(dst)
        ));
    }

    // Isolated nodes still carry signal: a sparse query may match a
    // single node the optimizer could not afford to connect.
    for node in &subgraph.nodes {
        if !connected.contains(&node.index) {
            lines.push(format!("({})", sanitize(&node.text)));
        }
    }

    lines.join("\n")
}

/// Collapse control characters to spaces so the context block stays a
/// flat, newline-separated list of lines.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::{SubgraphEdge, SubgraphNode};
    use crate::types::NodeId;

    fn node(index: usize, text: &str) -> SubgraphNode {
        SubgraphNode {
            index,
            id: NodeId::Int(index as i64),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_edge_line_format() {
        let sub = Subgraph {
            nodes: vec![node(0, "Acme Corp"), node(1, "Grant Program X")],
            edges: vec![SubgraphEdge {
                row: 0,
                src_index: 0,
                dst_index: 1,
                relation: "funds".to_string(),
            }],
        };
        assert_eq!(
            format_context(&sub),
            "(Acme Corp -- funds -- Grant Program X)"
        );
    }

    #[test]
    fn test_isolated_node_rendered() {
        let sub = Subgraph {
            nodes: vec![node(0, "Acme Corp"), node(4, "Deep-Sea Mining")],
            edges: vec![],
        };
        assert_eq!(format_context(&sub), "(Acme Corp)\n(Deep-Sea Mining)");
    }

    #[test]
    fn test_mixed_edges_then_isolated() {
        let sub = Subgraph {
            nodes: vec![node(0, "A"), node(1, "B"), node(2, "C")],
            edges: vec![SubgraphEdge {
                row: 0,
                src_index: 0,
                dst_index: 1,
                relation: "rel".to_string(),
            }],
        };
        assert_eq!(format_context(&sub), "(A -- rel -- B)\n(C)");
    }

    #[test]
    fn test_control_characters_sanitized() {
        let sub = Subgraph {
            nodes: vec![node(0, "line\nbreak"), node(1, "tab\there")],
            edges: vec![SubgraphEdge {
                row: 0,
                src_index: 0,
                dst_index: 1,
                relation: "rel\r".to_string(),
            }],
        };
        let out = format_context(&sub);
        assert_eq!(out, "(line break -- rel  -- tab here)");
        assert!(!out.contains('\r'));
        assert!(!out.contains('\t'));
    }

    #[test]
    fn test_empty_subgraph_is_empty_string() {
        assert_eq!(format_context(&Subgraph::default()), "");
    }

    #[test]
    fn test_deterministic() {
        let sub = Subgraph {
            nodes: vec![node(0, "A"), node(1, "B")],
            edges: vec![SubgraphEdge {
                row: 0,
                src_index: 0,
                dst_index: 1,
                relation: "rel".to_string(),
            }],
        };
        assert_eq!(format_context(&sub), format_context(&sub.clone()));
    }
}
