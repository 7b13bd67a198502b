//! Output format detection and writing for feature tables.

use anyhow::{anyhow, Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Output format auto-detected from file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain TSV (default, .tsv, or no extension)
    Tsv,
    /// Gzip-compressed TSV (.tsv.gz or .gz)
    TsvGz,
}

impl OutputFormat {
    /// Detect output format from file path.
    ///
    /// - `None` or `"-"` → TSV to stdout
    /// - `.gz` extension (including `.tsv.gz`) → Gzip-compressed TSV
    /// - Everything else → Plain TSV
    pub fn detect(path: Option<&PathBuf>) -> Self {
        let Some(p) = path else {
            return OutputFormat::Tsv;
        };
        if p.as_os_str() == "-" {
            return OutputFormat::Tsv;
        }
        match p.extension().and_then(|e| e.to_str()) {
            Some("gz") => OutputFormat::TsvGz,
            _ => OutputFormat::Tsv,
        }
    }

    /// Returns true if output goes to stdout (path is None or "-").
    pub fn is_stdout(path: Option<&PathBuf>) -> bool {
        match path {
            None => true,
            Some(p) => p.as_os_str() == "-",
        }
    }
}

/// TSV writer for stdout, a plain file, or a gzip file.
pub enum OutputWriter {
    Tsv(BufWriter<Box<dyn Write + Send>>),
    /// Option so `finish` can take ownership and write the gzip trailer.
    TsvGz(Option<BufWriter<GzEncoder<File>>>),
}

impl OutputWriter {
    pub fn new(format: OutputFormat, path: Option<&PathBuf>) -> Result<Self> {
        let target = path.filter(|_| !OutputFormat::is_stdout(path));

        match (format, target) {
            (OutputFormat::Tsv, None) => {
                let out: Box<dyn Write + Send> = Box::new(io::stdout());
                Ok(OutputWriter::Tsv(BufWriter::new(out)))
            }
            (OutputFormat::Tsv, Some(p)) => {
                let file = File::create(p)
                    .with_context(|| format!("Failed to create output file: {:?}", p))?;
                let out: Box<dyn Write + Send> = Box::new(file);
                Ok(OutputWriter::Tsv(BufWriter::new(out)))
            }
            (OutputFormat::TsvGz, None) => {
                Err(anyhow!("Gzip output requires a file path, not stdout"))
            }
            (OutputFormat::TsvGz, Some(p)) => {
                let file = File::create(p)
                    .with_context(|| format!("Failed to create output file: {:?}", p))?;
                let encoder = GzEncoder::new(file, Compression::default());
                Ok(OutputWriter::TsvGz(Some(BufWriter::new(encoder))))
            }
        }
    }

    /// Write pre-formatted bytes.
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
        match self {
            OutputWriter::Tsv(w) => w.write_all(data)?,
            OutputWriter::TsvGz(Some(w)) => w.write_all(data)?,
            OutputWriter::TsvGz(None) => return Err(anyhow!("Writer already finished")),
        }
        Ok(())
    }

    /// Flush and, for gzip, finish the stream.
    pub fn finish(&mut self) -> Result<()> {
        match self {
            OutputWriter::Tsv(w) => {
                w.flush()?;
                Ok(())
            }
            OutputWriter::TsvGz(opt_writer) => {
                let writer = opt_writer
                    .take()
                    .ok_or_else(|| anyhow!("Writer already finished"))?;
                let encoder = writer
                    .into_inner()
                    .map_err(|e| anyhow!("Failed to flush buffer: {}", e))?;
                encoder.finish().context("Failed to finish gzip stream")?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_output_format_detect() {
        assert_eq!(OutputFormat::detect(None), OutputFormat::Tsv);
        assert_eq!(OutputFormat::detect(Some(&PathBuf::from("-"))), OutputFormat::Tsv);
        assert_eq!(OutputFormat::detect(Some(&PathBuf::from("f.tsv"))), OutputFormat::Tsv);
        assert_eq!(OutputFormat::detect(Some(&PathBuf::from("f.tsv.gz"))), OutputFormat::TsvGz);
        assert_eq!(OutputFormat::detect(Some(&PathBuf::from("features"))), OutputFormat::Tsv);
    }

    #[test]
    fn test_output_format_is_stdout() {
        assert!(OutputFormat::is_stdout(None));
        assert!(OutputFormat::is_stdout(Some(&PathBuf::from("-"))));
        assert!(!OutputFormat::is_stdout(Some(&PathBuf::from("out.tsv"))));
    }

    #[test]
    fn test_output_writer_tsv() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.tsv");

        let mut writer = OutputWriter::new(OutputFormat::Tsv, Some(&path))?;
        writer.write_chunk(b"name\tA\n")?;
        writer.write_chunk(b"s1\t1\n")?;
        writer.finish()?;

        assert_eq!(std::fs::read_to_string(&path)?, "name\tA\ns1\t1\n");
        Ok(())
    }

    #[test]
    fn test_output_writer_gzip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.tsv.gz");

        let mut writer = OutputWriter::new(OutputFormat::TsvGz, Some(&path))?;
        writer.write_chunk(b"name\tA\n")?;
        writer.finish()?;
        assert!(writer.write_chunk(b"late").is_err());

        let mut text = String::new();
        GzDecoder::new(File::open(&path)?).read_to_string(&mut text)?;
        assert_eq!(text, "name\tA\n");
        Ok(())
    }

    #[test]
    fn test_output_writer_gzip_requires_path() {
        assert!(OutputWriter::new(OutputFormat::TsvGz, None).is_err());
    }
}
