use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphsmithError {
    #[error("Unknown file type for file {path:?}")]
    UnknownFileType { path: PathBuf },

    #[error("Wrong convertor for file {path:?}")]
    WrongConvertor { path: PathBuf },

    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[error("Error reading {path:?}: {source}")]
    FileIO {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "glyphs")]
    #[error("Error parsing Glyphs file {path:?}: {message}")]
    PlistParse { path: PathBuf, message: String },

    #[cfg(feature = "ufo")]
    #[error("Error loading UFO: {0}")]
    UfoLoad(#[from] norad::error::FontLoadError),

    #[cfg(feature = "ufo")]
    #[error("Error saving UFO: {0}")]
    UfoWrite(#[from] norad::error::FontWriteError),

    #[cfg(feature = "ufo")]
    #[error("Error in UFO naming: {0}")]
    UfoName(#[from] norad::error::NamingError),

    #[error("Ill-constructed path")]
    BadPath,

    #[error("Called a method which requires a decomposed layer on a layer which had components")]
    NeedsDecomposition,

    #[error("No master named {0}")]
    MasterNotFound(String),

    #[error("Invalid kerning configuration: {0}")]
    BadConfig(String),

    #[error("Unknown character group {0}")]
    UnknownGroup(String),

    #[error("Character group {0} has no glyphs in this font")]
    EmptyGroup(String),

    #[error("No secondary groups selected")]
    NoSecondaryGroups,

    #[error("Filter error: {0}")]
    FilterError(String),
}
