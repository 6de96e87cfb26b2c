use std::path::PathBuf;

use anyhow::{Context, Result};
use recog_core::{Config, Recognizer, ScoredLabel};
use structopt::StructOpt;

fn main() {
    let cli_args = CliArgs::from_args();

    let level = match cli_args.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli_args.run() {
        Ok(labels) => {
            for line in labels {
                println!("{line}");
            }
        }
        Err(e) => {
            log::error!("{e:?}");
            std::process::exit(1)
        }
    }
}

/// Label an image with a frozen TensorFlow classification graph.
#[derive(Debug, StructOpt)]
#[structopt(name = "recog", about = "Prints the top labels of an image")]
pub struct CliArgs {
    /// Image to label: http(s) URL, file:// URL or local path
    pub url: String,

    #[structopt(short = "v", parse(from_occurrences))]
    pub verbosity: usize,

    /// JSON configuration file
    #[structopt(long = "config")]
    pub config: Option<PathBuf>,

    /// Frozen TensorFlow graph (overrides configuration)
    #[structopt(long = "graph")]
    pub graph: Option<PathBuf>,

    /// Label file, one label per line (overrides configuration)
    #[structopt(long = "labels")]
    pub labels: Option<PathBuf>,

    /// Number of labels to print (overrides configuration)
    #[structopt(long = "top")]
    pub top: Option<usize>,

    /// Print the ranked labels as a JSON array
    #[structopt(long = "json")]
    pub json: bool,
}

impl CliArgs {
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if let Some(graph) = &self.graph {
            config.graph = graph.clone();
        }
        if let Some(labels) = &self.labels {
            config.labels = labels.clone();
        }
        if let Some(top) = self.top {
            config.top_k = top;
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the whole pipeline, returning the lines to print.
    pub fn run(&self) -> Result<Vec<String>> {
        let config = self.config()?;
        log::info!("url: {}", self.url);
        let image = recog_core::fetch::fetch(&self.url)?;
        let recognizer = Recognizer::new(&config)?;
        let labels = recognizer
            .recognize(&image)
            .with_context(|| format!("Failed to label {}", self.url))?;
        self.render(&labels)
    }

    fn render(&self, labels: &[ScoredLabel]) -> Result<Vec<String>> {
        if self.json {
            Ok(vec![serde_json::to_string_pretty(labels)?])
        } else {
            Ok(labels.iter().map(|l| l.to_string()).collect())
        }
    }
}
