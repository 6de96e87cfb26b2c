//! Error taxonomy of the labelling pipeline.
use std::fmt;
use std::path::PathBuf;

/// Which graph execution raised an `Execution` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preprocess,
    Classify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preprocess => write!(f, "preprocessing"),
            Stage::Classify => write!(f, "classification"),
        }
    }
}

#[derive(Debug)]
pub enum RecogError {
    /// Invalid configuration values.
    Config(String),
    /// Graph, label or configuration file missing, unreadable or malformed.
    Artifact { path: PathBuf, source: anyhow::Error },
    /// Image retrieval failed.
    Fetch { url: String, source: anyhow::Error },
    /// Image bytes are not a decodable JPEG.
    Decode(image::ImageError),
    /// A graph could not be prepared or run.
    Execution { stage: Stage, source: anyhow::Error },
    /// Not enough labelled scores to fill the requested top-k.
    Ranking { wanted: usize, available: usize },
}

pub type RecogResult<T> = Result<T, RecogError>;

impl RecogError {
    pub fn artifact(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> RecogError {
        RecogError::Artifact { path: path.into(), source: source.into() }
    }

    pub fn fetch(url: impl Into<String>, source: impl Into<anyhow::Error>) -> RecogError {
        RecogError::Fetch { url: url.into(), source: source.into() }
    }

    pub fn execution(stage: Stage, source: impl Into<anyhow::Error>) -> RecogError {
        RecogError::Execution { stage, source: source.into() }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            RecogError::Execution { stage, .. } => Some(*stage),
            RecogError::Decode(_) => Some(Stage::Preprocess),
            RecogError::Ranking { .. } => Some(Stage::Classify),
            _ => None,
        }
    }
}

impl fmt::Display for RecogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecogError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            RecogError::Artifact { path, .. } => {
                write!(f, "Missing or corrupt artifact {path:?}")
            }
            RecogError::Fetch { url, .. } => write!(f, "Failed to fetch image from {url}"),
            RecogError::Decode(_) => write!(f, "Image is not a valid JPEG"),
            RecogError::Execution { stage, .. } => write!(f, "Error during {stage} graph execution"),
            RecogError::Ranking { wanted, available } => write!(
                f,
                "Requested top {wanted} labels, but only {available} labelled scores are available"
            ),
        }
    }
}

impl std::error::Error for RecogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecogError::Artifact { source, .. }
            | RecogError::Fetch { source, .. }
            | RecogError::Execution { source, .. } => Some(&**source),
            RecogError::Decode(e) => Some(e),
            RecogError::Config(_) | RecogError::Ranking { .. } => None,
        }
    }
}
