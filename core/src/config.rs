use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{RecogError, RecogResult};

pub const DEFAULT_GRAPH: &str = "/model/tensorflow_inception_graph.pb";
pub const DEFAULT_LABELS: &str = "/model/imagenet_comp_graph_label_strings.txt";

/// Everything the pipeline needs to know about its model and artifacts.
///
/// All fields have defaults matching the Inception graph distributed with
/// `imagenet_comp_graph_label_strings.txt`, so a partial JSON document is
/// enough to override a single value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub graph: PathBuf,
    pub labels: PathBuf,
    pub input_node: String,
    pub output_node: String,
    pub top_k: usize,
    pub height: usize,
    pub width: usize,
    pub mean: f32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            graph: DEFAULT_GRAPH.into(),
            labels: DEFAULT_LABELS.into(),
            input_node: "input".into(),
            output_node: "output".into(),
            top_k: 5,
            height: 224,
            width: 224,
            mean: 117.0,
        }
    }
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> RecogResult<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| RecogError::artifact(path, e))?;
        let config: Config =
            serde_json::from_str(&text).map_err(|e| RecogError::artifact(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RecogResult<()> {
        if self.top_k == 0 {
            return Err(RecogError::Config("top_k must be at least 1".into()));
        }
        if self.height == 0 || self.width == 0 {
            return Err(RecogError::Config(format!(
                "model input size must be non-empty, got {}x{}",
                self.height, self.width
            )));
        }
        if self.input_node.is_empty() || self.output_node.is_empty() {
            return Err(RecogError::Config("input and output node names are required".into()));
        }
        Ok(())
    }
}
