//! # Recog
//!
//! Label a JPEG image with a frozen TensorFlow classification graph, tract
//! doing the inference.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> recog_core::RecogResult<()> {
//! use recog_core::{Config, Recognizer};
//!
//! let config = Config::default();
//! let recognizer = Recognizer::new(&config)?;
//!
//! let image = recog_core::fetch::fetch("https://example.com/grace_hopper.jpg")?;
//! for label in recognizer.recognize(&image)? {
//!     println!("{label}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline is two graph executions in a row: the preprocessing graph
//! turns the image into a `[1, 224, 224, 3]` mean-centered tensor, the
//! classification graph turns it into class probabilities, which are then
//! paired with the label vocabulary and ranked.

pub mod artifacts;
pub mod classify;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod ops;
pub mod preprocess;

pub use artifacts::{LabelVocabulary, load_graph, load_labels};
pub use classify::{Classifier, ScoredLabel, top_labels};
pub use config::Config;
pub use errors::{RecogError, RecogResult, Stage};
pub use preprocess::Preprocessor;

/// Artifacts loaded and graphs prepared for a given configuration.
pub struct Recognizer {
    preprocessor: Preprocessor,
    classifier: Classifier,
}

impl Recognizer {
    pub fn new(config: &Config) -> RecogResult<Recognizer> {
        config.validate()?;
        let labels = load_labels(&config.labels)?;
        let model = load_graph(&config.graph)?;
        let classifier = Classifier::new(model, labels, config)?;
        Ok(Recognizer { preprocessor: Preprocessor::from_config(config), classifier })
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Top-k labels for an encoded JPEG.
    pub fn recognize(&self, image: &[u8]) -> RecogResult<Vec<ScoredLabel>> {
        let tensor = self.preprocessor.normalize(image)?;
        self.classifier.classify(tensor)
    }
}

/// One-shot helper: load everything, label one image, release everything.
pub fn recognize(config: &Config, image: &[u8]) -> RecogResult<Vec<ScoredLabel>> {
    Recognizer::new(config)?.recognize(image)
}
