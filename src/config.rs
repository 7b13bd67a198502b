use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::LabelSet;
use crate::core::validate_kmers;

/// Run configuration file (`--config`).
///
/// ```toml
/// [classify]
/// model = "model.toml"
/// kmers = [4]
/// batch_size = 10000      # 0 = unbatched
/// labels = ["animalia", "bacteria", "fungi", "plantae", "protista"]
/// output_dir = "alfie_out"
/// ```
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub classify: ClassifySettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifySettings {
    pub model: Option<PathBuf>,
    pub kmers: Option<Vec<usize>>,
    pub batch_size: Option<usize>,
    pub labels: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
}

pub fn parse_config(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read config file: {}", path.display()))?;

    let mut config: ConfigFile =
        toml::from_str(&contents).context("Failed to parse TOML config")?;

    let settings = &mut config.classify;
    if let Some(kmers) = &settings.kmers {
        validate_kmers(kmers).map_err(|e| anyhow!("Config error: {}", e))?;
    }
    if let Some(labels) = &settings.labels {
        LabelSet::new(labels.iter().cloned()).map_err(|e| anyhow!("Config error: {}", e))?;
    }

    // Paths in the file are relative to the file itself.
    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    settings.model = settings.model.take().map(|p| resolve_path(config_dir, &p));
    settings.output_dir = settings
        .output_dir
        .take()
        .map(|p| resolve_path(config_dir, &p));

    Ok(config)
}

pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
[classify]
model = "models/linear.toml"
kmers = [2, 4]
batch_size = 500
labels = ["bill", "george", "sue"]
output_dir = "sorted"
"#,
        )?;

        let config = parse_config(&path)?;
        let c = &config.classify;
        assert_eq!(c.kmers, Some(vec![2, 4]));
        assert_eq!(c.batch_size, Some(500));
        assert_eq!(c.labels.as_ref().map(Vec::len), Some(3));
        assert_eq!(c.model, Some(dir.path().join("models/linear.toml")));
        assert_eq!(c.output_dir, Some(dir.path().join("sorted")));
        Ok(())
    }

    #[test]
    fn test_empty_config_is_all_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.toml");
        fs::write(&path, "")?;

        let config = parse_config(&path)?;
        assert!(config.classify.model.is_none());
        assert!(config.classify.kmers.is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.toml");

        for body in [
            "[classify]\nkmers = [0]",
            "[classify]\nkmers = []",
            "[classify]\nbatch_size = -1",
            "[classify]\nlabels = [\"a\", \"a\"]",
            "[classify]\nunknown = 1",
        ] {
            fs::write(&path, body)?;
            assert!(parse_config(&path).is_err(), "should reject: {}", body);
        }
        Ok(())
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/etc/alfie");
        assert_eq!(resolve_path(base, Path::new("/abs/m.toml")), PathBuf::from("/abs/m.toml"));
        assert_eq!(resolve_path(base, Path::new("m.toml")), PathBuf::from("/etc/alfie/m.toml"));
    }
}
