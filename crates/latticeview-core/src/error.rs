use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain or parse a graph document.
///
/// Surfaced to the caller as-is; the loader never retries internally.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read lattice document {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lattice document {path} is not a valid graph document")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("lattice document {path} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedGraphError,
    },
}

/// Structural defect in an otherwise parseable graph document.
///
/// Detected before layout so an inconsistent lattice is reported instead of
/// silently visualized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraphError {
    #[error("document contains no nodes")]
    Empty,
    #[error("link {link} references node {node} but the document has {node_count} nodes")]
    DanglingLink {
        link: usize,
        node: usize,
        node_count: usize,
    },
    #[error("lastNode is {last_node} but the document has {node_count} nodes")]
    LastNodeOutOfRange { last_node: usize, node_count: usize },
    #[error("maxLevel must be at least 1, got {max_level}")]
    MaxLevelOutOfRange { max_level: u32 },
    #[error("node {node} has level {level} above maxLevel {max_level}")]
    LevelOutOfRange {
        node: usize,
        level: u32,
        max_level: u32,
    },
}
