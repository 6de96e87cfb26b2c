use std::fmt;

use anyhow::Context;
use log::{debug, trace};
use serde::Serialize;
use tract_tensorflow::prelude::*;

use crate::artifacts::LabelVocabulary;
use crate::config::Config;
use crate::errors::{RecogError, RecogResult, Stage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredLabel {
    pub label: String,
    pub probability: f32,
}

impl fmt::Display for ScoredLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label: {}, Probability: {:.2}%", self.label, self.probability * 100.0)
    }
}

/// Pair probabilities with labels and keep the `k` best.
///
/// Only `min(probabilities.len(), labels.len())` entries take part: the
/// tail of the longer sequence is dropped. Equal probabilities keep their
/// vector order. Fails if fewer than `k` pairs remain.
pub fn top_labels(
    probabilities: &[f32],
    labels: &LabelVocabulary,
    k: usize,
) -> RecogResult<Vec<ScoredLabel>> {
    let mut scored: Vec<ScoredLabel> = probabilities
        .iter()
        .zip(labels.iter())
        .map(|(&probability, label)| ScoredLabel {
            label: label.to_string(),
            // total_cmp puts -0.0 below 0.0
            probability: if probability == 0.0 { 0.0 } else { probability },
        })
        .collect();
    if scored.len() < k {
        return Err(RecogError::Ranking { wanted: k, available: scored.len() });
    }
    scored.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    scored.truncate(k);
    Ok(scored)
}

/// First row of the classifier output, along its last axis.
fn first_row(output: &Tensor) -> TractResult<&[f32]> {
    let row = *output.shape().last().context("Classifier output is a scalar")?;
    let values = output.as_slice::<f32>()?;
    values.get(..row).with_context(|| format!("Classifier output {:?} is empty", output.shape()))
}

/// A classification graph bound to its input and output nodes, ready to run.
pub struct Classifier {
    plan: TypedRunnableModel<TypedModel>,
    labels: LabelVocabulary,
    top_k: usize,
}

impl Classifier {
    pub fn new(
        model: InferenceModel,
        labels: LabelVocabulary,
        config: &Config,
    ) -> RecogResult<Classifier> {
        let plan =
            Self::prepare(model, config).map_err(|e| RecogError::execution(Stage::Classify, e))?;
        Ok(Classifier { plan, labels, top_k: config.top_k })
    }

    fn prepare(
        model: InferenceModel,
        config: &Config,
    ) -> TractResult<TypedRunnableModel<TypedModel>> {
        debug!(
            "Binding input {:?} ({}x{}) and output {:?}",
            config.input_node, config.height, config.width, config.output_node
        );
        model
            .with_input_names([&*config.input_node])?
            .with_output_names([&*config.output_node])?
            .with_input_fact(0, f32::fact([1, config.height, config.width, 3]).into())?
            .into_optimized()?
            .into_runnable()
    }

    pub fn labels(&self) -> &LabelVocabulary {
        &self.labels
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Run the graph on a normalized tensor and rank its output.
    pub fn classify(&self, input: Tensor) -> RecogResult<Vec<ScoredLabel>> {
        let outputs = self
            .plan
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| RecogError::execution(Stage::Classify, e))?;
        let probabilities =
            first_row(&outputs[0]).map_err(|e| RecogError::execution(Stage::Classify, e))?;
        if probabilities.len() != self.labels.len() {
            debug!(
                "Output has {} classes for {} labels, ranking the first {}",
                probabilities.len(),
                self.labels.len(),
                probabilities.len().min(self.labels.len())
            );
        }
        trace!("Probabilities: {:?}", probabilities);
        top_labels(probabilities, &self.labels, self.top_k)
    }
}
