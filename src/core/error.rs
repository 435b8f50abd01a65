//! Error type for the engine and its configuration/asset edges.
//!
//! Navigation never produces an error: out-of-range targets are no-ops.
//! What can fail is I/O at the edges: reading config, walking a media
//! directory, decoding an asset.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialise config: {0}")]
    ConfigSerialise(#[from] toml::ser::Error),

    #[error("cannot walk media directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unrecognised key binding `{0}`")]
    KeyBinding(String),
}

pub type Result<T> = std::result::Result<T, Error>;
