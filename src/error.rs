// error.rs
use crate::body::PartKind;

/// Everything that can stop the viewer from starting. Once the model is
/// built and the catalog validated nothing else fails.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid geometry for '{part}': {reason}")]
    InvalidGeometry { part: String, reason: String },

    #[error("duplicate {kind} name '{name}'")]
    DuplicatePart { kind: PartKind, name: String },

    #[error("action '{action}' references unknown {kind} '{name}'")]
    UnknownPart { action: String, kind: PartKind, name: String },

    #[error("invalid action catalog: {0}")]
    InvalidCatalog(String),

    #[error("asset '{0}' is not embedded")]
    MissingAsset(String),

    #[error("parse error in {name}: {source}")]
    Asset {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = ModelError> = std::result::Result<T, E>;
