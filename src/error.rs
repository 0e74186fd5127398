use thiserror::Error;

/// Errors surfaced during network construction or spec parsing.
///
/// Shape mismatches inside the numeric kernels are not represented here;
/// they panic at the offending matrix operation and propagate unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// A layer specification element at `position` is neither a usable node
    /// count nor a layer-capable value.
    #[error("layer {position} has wrong type: must be a node count or a layer")]
    WrongLayerType { position: usize },

    /// The layer specification contained no elements.
    #[error("layer specification must contain at least one layer")]
    EmptyLayerSpec,

    /// A training-algorithm name did not match any known algorithm.
    #[error("unknown training algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spec serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
