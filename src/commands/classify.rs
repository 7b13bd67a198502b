//! Classify command handler.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use alfie::config::{parse_config, ClassifySettings};
use alfie::constants::DEFAULT_OUTPUT_DIR;
use alfie::{file_type, ClassificationPipeline, LabelSet, LinearClassifier, PipelineConfig};

use super::helpers::{effective_batch_size, warn_large_kmers};

/// Arguments for the classify command.
pub struct ClassifyArgs {
    pub file: PathBuf,
    pub model: Option<PathBuf>,
    pub kmers: Vec<usize>,
    pub batch_size: Option<usize>,
    pub classes: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Run the classify command with the given arguments.
///
/// Flag values win over the config file; k sizes and labels fall back to the
/// model's own before the built-in defaults.
pub fn run_classify(args: ClassifyArgs) -> Result<()> {
    let file_format = file_type(&args.file)?;

    let settings = match &args.config {
        Some(path) => parse_config(path)?.classify,
        None => ClassifySettings::default(),
    };

    let model_path = args.model.or(settings.model).ok_or_else(|| {
        anyhow!("No model given. Use -m/--model or set `model` in the [classify] config table")
    })?;
    let model = LinearClassifier::load(&model_path)
        .with_context(|| format!("Failed to load model: {}", model_path.display()))?;

    let kmers = if !args.kmers.is_empty() {
        args.kmers
    } else {
        settings.kmers.unwrap_or_else(|| model.kmers().to_vec())
    };
    warn_large_kmers(&kmers);

    let labels = match (args.classes, settings.labels, model.labels()) {
        (Some(list), _, _) => LabelSet::parse(&list)?,
        (None, Some(list), _) => LabelSet::new(list)?,
        (None, None, Some(list)) => LabelSet::new(list.iter().cloned())?,
        (None, None, None) => LabelSet::kingdoms(),
    };

    let output_dir = args
        .output_dir
        .or(settings.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    log::info!(
        "Input: {} ({}), k = {:?}, labels = [{}], output: {}",
        args.file.display(),
        file_format,
        kmers,
        labels.as_slice().join(", "),
        output_dir.display()
    );

    let config = PipelineConfig {
        kmers,
        batch_size: effective_batch_size(args.batch_size.or(settings.batch_size)),
        labels,
    };
    let mut pipeline = ClassificationPipeline::new(model, config)?;
    let summary = pipeline
        .run(&args.file, Some(&output_dir))
        .with_context(|| format!("Failed to classify {}", args.file.display()))?;

    log::info!(
        "Done: {} records written under {}",
        summary.total(),
        output_dir.display()
    );
    Ok(())
}
