use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::network::model::{Edge, FlowNetwork, NodeId};

pub const SOURCE_LABEL: &str = "source";
pub const SINK_LABEL: &str = "sink";

// Declared counts are untrusted until that many lines actually arrive;
// reservations from them are capped.
const PREALLOC_LIMIT: usize = 1024;

/// Everything that can go wrong while reading an instance. All of these are
/// detected before the first phase runs; the engine itself never validates.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected a numeric count, found {token:?}")]
    InvalidCount { line: usize, token: String },
    #[error("input declares no nodes")]
    EmptyInput,
    #[error("a matching needs at least two nodes, input declares one")]
    InsufficientNodes,
    #[error("input declares no edges")]
    MissingEdges,
    #[error("input ended before {expected}")]
    Truncated { expected: String },
    #[error("line {line}: malformed edge ({reason})")]
    MalformedEdge { line: usize, reason: String },
    #[error("line {line}: edge endpoint {value} is outside 1..={limit}")]
    EndpointOutOfRange {
        line: usize,
        value: i64,
        limit: usize,
    },
}

/// Parsed instance: node labels in id order (index i holds the label of node
/// id i+1) and validated 1-based edge endpoints in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingInstance {
    pub labels: Vec<String>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl MatchingInstance {
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Loader for the line-based instance format: node count, labels, edge
/// count, then one whitespace-separated endpoint pair per line.
#[derive(Debug, Default)]
pub struct InstanceLoader;

impl InstanceLoader {
    /// Read and validate an instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<MatchingInstance, InputError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse an in-memory instance, mostly for tests.
    pub fn from_text(text: &str) -> Result<MatchingInstance, InputError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<MatchingInstance, InputError> {
        let mut lines = NumberedLines::new(reader);

        let (line, text) = lines.next_line()?.ok_or(InputError::EmptyInput)?;
        let node_count = parse_count(line, &text)?;
        if node_count == 0 {
            return Err(InputError::EmptyInput);
        }
        if node_count == 1 {
            return Err(InputError::InsufficientNodes);
        }

        let mut labels = Vec::with_capacity(node_count.min(PREALLOC_LIMIT));
        for index in 0..node_count {
            let (_, label) = lines.next_line()?.ok_or_else(|| InputError::Truncated {
                expected: format!("label {} of {}", index + 1, node_count),
            })?;
            labels.push(label);
        }

        let (line, text) = lines.next_line()?.ok_or_else(|| InputError::Truncated {
            expected: "the edge count".to_string(),
        })?;
        let edge_count = parse_count(line, &text)?;
        if edge_count == 0 {
            return Err(InputError::MissingEdges);
        }

        let mut edges = Vec::with_capacity(edge_count.min(PREALLOC_LIMIT));
        for index in 0..edge_count {
            let (line, text) = lines.next_line()?.ok_or_else(|| InputError::Truncated {
                expected: format!("edge {} of {}", index + 1, edge_count),
            })?;
            edges.push(parse_edge(line, &text, node_count)?);
        }

        debug!(
            "Parsed instance: {} nodes, {} edges",
            node_count, edge_count
        );
        Ok(MatchingInstance { labels, edges })
    }
}

/// Builds the initial residual network from a parsed instance. Edge
/// insertion order is preserved because bucket order is the search priority
/// order: original edges land first in each left bucket, terminal wiring
/// after, both partitions wired in ascending id order.
#[derive(Debug, Default)]
pub struct NetworkBuilder;

impl NetworkBuilder {
    pub fn build(instance: &MatchingInstance) -> FlowNetwork {
        let mut network = FlowNetwork::new(instance.node_count());
        network.add_node(SOURCE_LABEL);
        for label in &instance.labels {
            network.add_node(label.clone());
        }
        network.add_node(SINK_LABEL);

        for &(u, v) in &instance.edges {
            network.add_edge(Edge::unit(u, v));
        }

        let source = network.source();
        for left in network.left_partition() {
            network.add_edge(Edge::unit(source, left));
        }
        let sink = network.sink();
        for right in network.right_partition() {
            network.add_edge(Edge::unit(right, sink));
        }
        network
    }
}

struct NumberedLines<R> {
    inner: Lines<R>,
    number: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            number: 0,
        }
    }

    // Labels are kept verbatim; only the line terminator (and a stray '\r')
    // is stripped.
    fn next_line(&mut self) -> Result<Option<(usize, String)>, InputError> {
        match self.inner.next() {
            Some(line) => {
                let mut line = line?;
                if line.ends_with('\r') {
                    line.pop();
                }
                self.number += 1;
                Ok(Some((self.number, line)))
            }
            None => Ok(None),
        }
    }
}

fn parse_count(line: usize, text: &str) -> Result<usize, InputError> {
    let token = text.trim();
    token.parse::<usize>().map_err(|_| InputError::InvalidCount {
        line,
        token: token.to_string(),
    })
}

fn parse_edge(line: usize, text: &str, limit: usize) -> Result<(NodeId, NodeId), InputError> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next().ok_or_else(|| InputError::MalformedEdge {
        line,
        reason: "missing both endpoints".to_string(),
    })?;
    let second = tokens.next().ok_or_else(|| InputError::MalformedEdge {
        line,
        reason: "missing the second endpoint".to_string(),
    })?;
    // Extra tokens after the two endpoints are ignored.
    Ok((
        parse_endpoint(line, first, limit)?,
        parse_endpoint(line, second, limit)?,
    ))
}

fn parse_endpoint(line: usize, token: &str, limit: usize) -> Result<NodeId, InputError> {
    let value: i64 = token.parse().map_err(|_| InputError::MalformedEdge {
        line,
        reason: format!("endpoint {token:?} is not numeric"),
    })?;
    // Compare before casting; a narrowing cast could wrap a huge value into
    // range on 32-bit targets.
    if value < 1 || value > limit as i64 {
        return Err(InputError::EndpointOutOfRange { line, value, limit });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> &'static str {
        "4\nA\nB\nC\nD\n2\n1 3\n2 4\n"
    }

    #[test]
    fn parse_sample_instance() {
        let instance = InstanceLoader::from_text(sample_text()).expect("parse instance");
        assert_eq!(instance.node_count(), 4);
        assert_eq!(instance.labels, vec!["A", "B", "C", "D"]);
        assert_eq!(instance.edges, vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn labels_are_taken_verbatim() {
        let instance =
            InstanceLoader::from_text("2\nleft node\n  right  \n1\n1 2\n").expect("parse");
        assert_eq!(instance.labels, vec!["left node", "  right  "]);
    }

    #[test]
    fn carriage_returns_and_extra_tokens_are_tolerated() {
        let instance =
            InstanceLoader::from_text("2\r\nA\r\nB\r\n1\r\n 1 \t 2 trailing\r\n").expect("parse");
        assert_eq!(instance.labels, vec!["A", "B"]);
        assert_eq!(instance.edges, vec![(1, 2)]);
    }

    #[test]
    fn content_after_declared_edges_is_ignored() {
        let instance = InstanceLoader::from_text("2\nA\nB\n1\n1 2\nleftover garbage\n")
            .expect("parse with trailing lines");
        assert_eq!(instance.edge_count(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            InstanceLoader::from_text(""),
            Err(InputError::EmptyInput)
        ));
        assert!(matches!(
            InstanceLoader::from_text("0\n"),
            Err(InputError::EmptyInput)
        ));
    }

    #[test]
    fn single_node_is_rejected() {
        assert!(matches!(
            InstanceLoader::from_text("1\nA\n0\n"),
            Err(InputError::InsufficientNodes)
        ));
    }

    #[test]
    fn zero_edges_are_rejected() {
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n0\n"),
            Err(InputError::MissingEdges)
        ));
    }

    #[test]
    fn non_numeric_counts_are_rejected_with_line() {
        match InstanceLoader::from_text("two\n") {
            Err(InputError::InvalidCount { line, token }) => {
                assert_eq!(line, 1);
                assert_eq!(token, "two");
            }
            other => panic!("expected InvalidCount, got {other:?}"),
        }
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\nmany\n"),
            Err(InputError::InvalidCount { line: 4, .. })
        ));
    }

    #[test]
    fn truncated_labels_and_edges_are_reported() {
        assert!(matches!(
            InstanceLoader::from_text("3\nA\nB\n"),
            Err(InputError::Truncated { .. })
        ));
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n2\n1 2\n"),
            Err(InputError::Truncated { .. })
        ));
    }

    #[test]
    fn huge_declared_counts_are_rejected_as_truncated() {
        // Counts this large must fall through to the missing-line check, not
        // reserve memory up front.
        assert!(matches!(
            InstanceLoader::from_text("999999999999\n"),
            Err(InputError::Truncated { .. })
        ));
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n999999999999\n"),
            Err(InputError::Truncated { .. })
        ));
    }

    #[test]
    fn malformed_edge_lines_are_rejected() {
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\n1\n"),
            Err(InputError::MalformedEdge { line: 5, .. })
        ));
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\none two\n"),
            Err(InputError::MalformedEdge { .. })
        ));
    }

    #[test]
    fn out_of_range_endpoints_are_rejected() {
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\n1 9\n"),
            Err(InputError::EndpointOutOfRange { value: 9, .. })
        ));
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\n0 2\n"),
            Err(InputError::EndpointOutOfRange { value: 0, .. })
        ));
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\n-1 2\n"),
            Err(InputError::EndpointOutOfRange { value: -1, .. })
        ));
        // 2^32 + 5: must not wrap into range through a narrowing cast.
        assert!(matches!(
            InstanceLoader::from_text("2\nA\nB\n1\n4294967301 2\n"),
            Err(InputError::EndpointOutOfRange {
                value: 4294967301,
                ..
            })
        ));
    }

    #[test]
    fn builder_wires_terminals_around_partitions() {
        let instance = InstanceLoader::from_text(sample_text()).expect("parse instance");
        let network = NetworkBuilder::build(&instance);

        assert_eq!(network.node_count(), 6);
        assert_eq!(network.label(0), SOURCE_LABEL);
        assert_eq!(network.label(5), SINK_LABEL);
        assert_eq!(network.label(1), "A");

        let from_source: Vec<_> = network.outgoing(0).iter().map(|e| e.dest).collect();
        assert_eq!(from_source, vec![1, 2]);

        let from_left: Vec<_> = network.outgoing(1).iter().map(|e| e.dest).collect();
        assert_eq!(from_left, vec![3]);

        for right in network.right_partition() {
            let dests: Vec<_> = network.outgoing(right).iter().map(|e| e.dest).collect();
            assert_eq!(dests.last(), Some(&network.sink()));
        }
    }

    #[test]
    fn builder_keeps_original_edges_before_wiring() {
        let instance = InstanceLoader::from_text("4\nA\nB\nC\nD\n3\n1 4\n1 3\n2 3\n").expect("parse");
        let network = NetworkBuilder::build(&instance);

        let bucket: Vec<_> = network.outgoing(1).iter().map(|e| e.dest).collect();
        assert_eq!(bucket, vec![4, 3], "input order decides search priority");
        assert!(network.outgoing(1).iter().all(|e| !e.is_augmented()));
    }
}
