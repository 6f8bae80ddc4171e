use thiserror::Error;

use crate::translator::NodeKind;

pub type Result<T> = core::result::Result<T, Error>;

/// Crate-level error, wrapping the per-concern errors below.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A frame could not be orthonormalized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("frame axis has zero length")]
    ZeroAxis,
    #[error("frame axes are parallel")]
    ParallelAxes,
}

/// A scene tree node was constructed with invalid inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("{kind} needs at least {required} children, got {actual}")]
    TooFewChildren {
        kind: NodeKind,
        required: usize,
        actual: usize,
    },
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("unknown lattice type `{0}`")]
    UnknownLatticeType(String),
}

/// A scene tree could not be linearized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// The node has no encoding in the wire registry.
    #[error("unknown node kind `{name}` (child of index {parent_index})")]
    UnknownNodeKind {
        name: &'static str,
        parent_index: u32,
    },
}

/// Translator configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
