//! Output writers for simulation results.

use crate::metrics::{CsvSummaryRow, MatchMetrics};
use crate::types::OutputFormat;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct OutputWriter {
    jsonl_writer: Option<Box<dyn Write + Send>>,
    csv_writer: csv::Writer<Box<dyn Write + Send>>,
    jsonl_path: Option<PathBuf>,
    csv_path: PathBuf,
}

fn create_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Buffered writer for `path`, gzip-compressed when `compress` is set.
fn open_writer(
    dir: &Path,
    filename: String,
    compress: bool,
) -> std::io::Result<(Box<dyn Write + Send>, PathBuf)> {
    if compress {
        let path = dir.join(format!("{filename}.gz"));
        let writer = BufWriter::new(GzEncoder::new(create_file(&path)?, Compression::default()));
        Ok((Box::new(writer), path))
    } else {
        let path = dir.join(filename);
        Ok((Box::new(BufWriter::new(create_file(&path)?)), path))
    }
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let (jsonl_writer, jsonl_path) = match format {
            OutputFormat::Jsonl => {
                let (writer, path) =
                    open_writer(dir, format!("simulation_{timestamp}.jsonl"), compress)?;
                (Some(writer), Some(path))
            }
            OutputFormat::Csv => (None, None),
        };

        // Always create the CSV summary
        let (csv_out, csv_path) =
            open_writer(dir, format!("simulation_{timestamp}_summary.csv"), compress)?;

        Ok(Self {
            jsonl_writer,
            csv_writer: csv::Writer::from_writer(csv_out),
            jsonl_path,
            csv_path,
        })
    }

    pub fn write_match(&mut self, metrics: &MatchMetrics) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut writer) = self.jsonl_writer {
            let json = serde_json::to_string(metrics)?;
            writeln!(writer, "{json}")?;
        }

        // The header row comes from the first serialized record.
        let row: CsvSummaryRow = metrics.into();
        self.csv_writer.serialize(&row)?;
        Ok(())
    }

    /// Flush everything and close the files, finishing any gzip streams.
    pub fn finish(self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(mut writer) = self.jsonl_writer {
            writer.flush()?;
        }
        let mut inner = self
            .csv_writer
            .into_inner()
            .map_err(|e| e.error().to_string())?;
        inner.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, &PathBuf) {
        (self.jsonl_path.as_ref(), &self.csv_path)
    }
}
