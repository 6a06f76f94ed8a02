//! Loading the node/edge tables from files.
//!
//! Two on-disk shapes are supported: a JSON document with `nodes` and
//! `edges` arrays, and the combined knowledge-graph CSV layout where a
//! `node_id,node_attr` section is followed by a `src,edge_attr,dst`
//! header that starts the edge section.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ArborError, ArborResult, ErrorCode};
use crate::graph::GraphStore;
use crate::types::{EdgeRecord, NodeId, NodeRecord};

/// The two logical tables as a JSON document.
#[derive(Debug, Deserialize)]
struct GraphTables {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

/// Load a graph from a JSON string with `nodes` and `edges` arrays.
pub fn from_json_str(json: &str) -> ArborResult<GraphStore> {
    let tables: GraphTables = serde_json::from_str(json).map_err(|e| {
        ArborError::schema_with_code(
            format!("malformed graph JSON: {}", e),
            ErrorCode::SchemaMissingColumn,
        )
    })?;
    GraphStore::load(tables.nodes, tables.edges)
}

/// Load a graph from an already-parsed JSON value.
pub fn from_json_value(value: serde_json::Value) -> ArborResult<GraphStore> {
    let tables: GraphTables = serde_json::from_value(value).map_err(|e| {
        ArborError::schema_with_code(
            format!("malformed graph JSON: {}", e),
            ErrorCode::SchemaMissingColumn,
        )
    })?;
    GraphStore::load(tables.nodes, tables.edges)
}

/// Load a graph from a JSON file.
pub fn from_json_path(path: impl AsRef<Path>) -> ArborResult<GraphStore> {
    let json = std::fs::read_to_string(path)?;
    from_json_str(&json)
}

const EDGE_HEADER: &str = "src,edge_attr,dst";

/// Load a graph from the combined KG CSV format: a node section with a
/// `node_id,node_attr` header, then the edge section starting at the
/// `src,edge_attr,dst` header line.
pub fn from_kg_csv_str(content: &str) -> ArborResult<GraphStore> {
    let lines: Vec<&str> = content.lines().collect();
    let edge_start = lines
        .iter()
        .position(|line| line.trim_start().starts_with(EDGE_HEADER))
        .ok_or_else(|| {
            ArborError::schema_with_code(
                format!("no '{}' edge header found in combined KG CSV", EDGE_HEADER),
                ErrorCode::SchemaMissingColumn,
            )
        })?;

    let nodes = parse_node_section(&lines[..edge_start])?;
    let edges = parse_edge_section(&lines[edge_start..])?;
    GraphStore::load(nodes, edges)
}

/// Load a graph from a combined KG CSV file.
pub fn from_kg_csv_path(path: impl AsRef<Path>) -> ArborResult<GraphStore> {
    let content = std::fs::read_to_string(path)?;
    from_kg_csv_str(&content)
}

fn parse_node_section(lines: &[&str]) -> ArborResult<Vec<NodeRecord>> {
    let (header, rows) = split_header(lines, "node section")?;
    let id_col = column_index(&header, "node_id")?;
    let attr_col = column_index(&header, "node_attr")?;

    let mut nodes = Vec::with_capacity(rows.len());
    for (line_no, row) in rows {
        let fields = split_csv_line(row);
        let id = field_at(&fields, id_col, line_no)?;
        let attr = field_at(&fields, attr_col, line_no)?;
        nodes.push(NodeRecord {
            node_id: parse_node_id(id),
            node_attr: attr.to_string(),
        });
    }
    Ok(nodes)
}

fn parse_edge_section(lines: &[&str]) -> ArborResult<Vec<EdgeRecord>> {
    let (header, rows) = split_header(lines, "edge section")?;
    let src_col = column_index(&header, "src")?;
    let attr_col = column_index(&header, "edge_attr")?;
    let dst_col = column_index(&header, "dst")?;

    let mut edges = Vec::with_capacity(rows.len());
    for (line_no, row) in rows {
        let fields = split_csv_line(row);
        let src = field_at(&fields, src_col, line_no)?;
        let attr = field_at(&fields, attr_col, line_no)?;
        let dst = field_at(&fields, dst_col, line_no)?;
        edges.push(EdgeRecord {
            src: parse_node_id(src),
            edge_attr: attr.to_string(),
            dst: parse_node_id(dst),
        });
    }
    Ok(edges)
}

/// Split a section into its header fields and its non-blank data rows,
/// keeping 1-based line numbers for diagnostics.
fn split_header<'a>(
    lines: &[&'a str],
    what: &str,
) -> ArborResult<(Vec<String>, Vec<(usize, &'a str)>)> {
    let mut iter = lines.iter().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let (_, header_line) = iter.next().ok_or_else(|| {
        ArborError::schema_with_code(
            format!("empty {} in combined KG CSV", what),
            ErrorCode::SchemaMissingColumn,
        )
    })?;
    let header = split_csv_line(header_line);
    let rows = iter.map(|(i, l)| (i + 1, *l)).collect();
    Ok((header, rows))
}

fn column_index(header: &[String], name: &str) -> ArborResult<usize> {
    header
        .iter()
        .position(|col| col.trim() == name)
        .ok_or_else(|| {
            ArborError::schema_with_code(
                format!("missing required column '{}'", name),
                ErrorCode::SchemaMissingColumn,
            )
        })
}

fn field_at<'a>(fields: &'a [String], col: usize, line_no: usize) -> ArborResult<&'a str> {
    fields.get(col).map(|s| s.as_str()).ok_or_else(|| {
        ArborError::schema(format!(
            "line {}: expected at least {} fields, got {}",
            line_no,
            col + 1,
            fields.len()
        ))
    })
}

/// Integer-looking ids become integer ids, everything else is text.
fn parse_node_id(raw: &str) -> NodeId {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => NodeId::Int(n),
        Err(_) => NodeId::Text(trimmed.to_string()),
    }
}

/// Split one CSV line into fields, honoring double-quoted fields with
/// `""` escapes. Multi-line quoted fields are not supported.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let store = from_json_str(
            r#"{
                "nodes": [
                    {"node_id": 1, "node_attr": "Acme Corp"},
                    {"node_id": 2, "node_attr": "Grant Program X"}
                ],
                "edges": [
                    {"src": 1, "edge_attr": "funds", "dst": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_json_missing_column_is_schema_violation() {
        let err = from_json_str(r#"{"nodes": [{"node_id": 1}], "edges": []}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SchemaMissingColumn);
    }

    #[test]
    fn test_from_kg_csv_str() {
        let csv = "node_id,node_attr\n\
                   1,Acme Corp\n\
                   2,\"Grant Program X, phase 2\"\n\
                   3,Deep-Sea Mining\n\
                   src,edge_attr,dst\n\
                   1,funds,2\n\
                   2,targets,3\n";
        let store = from_kg_csv_str(csv).unwrap();
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.node_text(1), Some("Grant Program X, phase 2"));
        assert_eq!(store.edge_text(1), Some("targets"));
    }

    #[test]
    fn test_kg_csv_string_ids() {
        let csv = "node_id,node_attr\n\
                   acme,Acme Corp\n\
                   grant,Grant Program X\n\
                   src,edge_attr,dst\n\
                   acme,funds,grant\n";
        let store = from_kg_csv_str(csv).unwrap();
        assert_eq!(store.index_of(&NodeId::from("acme")), Some(0));
    }

    #[test]
    fn test_kg_csv_missing_edge_header() {
        let err = from_kg_csv_str("node_id,node_attr\n1,a\n").unwrap_err();
        assert_eq!(err.code(), ErrorCode::SchemaMissingColumn);
    }

    #[test]
    fn test_from_kg_csv_path() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "node_id,node_attr\n1,a\nsrc,edge_attr,dst\n").unwrap();
        let store = from_kg_csv_path(file.path()).unwrap();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_kg_csv_quoted_quote() {
        let fields = split_csv_line(r#"1,"says ""hi"", twice",2"#);
        assert_eq!(fields, vec!["1", r#"says "hi", twice"#, "2"]);
    }
}
