//! On-disk artifacts: the frozen classification graph and its labels.
use std::fs;
use std::ops::Index;
use std::path::Path;

use log::info;
use tract_tensorflow::prelude::*;

use crate::errors::{RecogError, RecogResult};

/// Class names, index-aligned with the classifier output vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelVocabulary(Vec<String>);

impl LabelVocabulary {
    pub fn new(labels: Vec<String>) -> LabelVocabulary {
        LabelVocabulary(labels)
    }

    /// One label per line. Blank lines are kept so positions stay aligned
    /// with the model classes.
    pub fn parse(text: &str) -> LabelVocabulary {
        text.lines().map(|s| s.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, ix: usize) -> Option<&str> {
        self.0.get(ix).map(|s| &**s)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| &**s)
    }
}

impl Index<usize> for LabelVocabulary {
    type Output = str;
    fn index(&self, ix: usize) -> &str {
        &self.0[ix]
    }
}

impl FromIterator<String> for LabelVocabulary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> LabelVocabulary {
        LabelVocabulary(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for LabelVocabulary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> LabelVocabulary {
        iter.into_iter().map(|s| s.to_string()).collect()
    }
}

/// Parse a frozen TensorFlow `GraphDef`.
pub fn load_graph(path: impl AsRef<Path>) -> RecogResult<InferenceModel> {
    let path = path.as_ref();
    let model = tract_tensorflow::tensorflow()
        .model_for_path(path)
        .map_err(|e| RecogError::artifact(path, e))?;
    info!("Loaded graph {:?} ({} nodes)", path, model.nodes().len());
    Ok(model)
}

pub fn load_labels(path: impl AsRef<Path>) -> RecogResult<LabelVocabulary> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RecogError::artifact(path, e))?;
    let labels = LabelVocabulary::parse(&text);
    info!("Loaded {} labels from {:?}", labels.len(), path);
    Ok(labels)
}
