//! Output artifact assembly
//!
//! Assembles normalized records plus summary counts into the final
//! `ProcessingResult`. Actual file encoding goes through the
//! `ArtifactWriter` seam so the pipeline stays independent of the storage
//! format; the crate ships a CSV-backed writer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::types::{ArtifactRef, ContactRecord, ProcessingResult};

/// Fixed header of every produced sheet.
pub const OUTPUT_HEADERS: [&str; 4] = ["Primeiro nome", "Sobrenome", "Telefone", "Etiquetas"];

/// Encodes normalized records into a downloadable file.
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    async fn write(&self, download_name: &str, records: &[ContactRecord]) -> Result<ArtifactRef>;
}

/// Counts accumulated during the row pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCounts {
    pub original_rows: u32,
    pub blank_rows: u32,
    pub original_columns: u32,
    pub blank_columns: u32,
}

/// Write the artifact and attach the counts. Record order is preserved:
/// the output is a stable filter of the input, never a reorder.
pub async fn build(
    writer: &dyn ArtifactWriter,
    filename_hint: &str,
    records: &[ContactRecord],
    counts: RowCounts,
) -> Result<ProcessingResult> {
    let download_name = output_name(filename_hint);
    let artifact = writer.write(&download_name, records).await?;

    Ok(ProcessingResult {
        original_row_count: counts.original_rows,
        original_column_count: counts.original_columns,
        output_row_count: records.len() as u32,
        blank_row_count: counts.blank_rows,
        blank_column_count: counts.blank_columns,
        artifact,
    })
}

/// `contatos.xlsx` -> `contatos_<uuid>.csv`. The uuid keeps concurrent
/// jobs over the same filename from clobbering each other.
fn output_name(filename_hint: &str) -> String {
    let stem = Path::new(filename_hint)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("contatos");
    format!("{}_{}.csv", stem, Uuid::new_v4())
}

/// CSV writer storing artifacts under a local directory.
pub struct CsvArtifactWriter {
    output_dir: PathBuf,
}

impl CsvArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ArtifactWriter for CsvArtifactWriter {
    async fn write(&self, download_name: &str, records: &[ContactRecord]) -> Result<ArtifactRef> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating output dir {}", self.output_dir.display()))?;
        let path = self.output_dir.join(download_name);

        let mut wtr = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        wtr.write_record(OUTPUT_HEADERS)?;
        for record in records {
            let tags = record.tags.join(", ");
            wtr.write_record([
                record.first_name.as_str(),
                record.last_name.as_str(),
                record.phone.as_str(),
                tags.as_str(),
            ])?;
        }
        wtr.flush()
            .with_context(|| format!("writing {}", path.display()))?;

        let size_bytes = std::fs::metadata(&path)?.len();
        info!("Artifact written: {} ({} bytes)", path.display(), size_bytes);

        Ok(ArtifactRef {
            path: path.to_string_lossy().into_owned(),
            download_name: download_name.to_string(),
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, last: &str, phone: &str) -> ContactRecord {
        ContactRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: phone.to_string(),
            tags: vec!["NomeConfirmado".to_string()],
        }
    }

    #[test]
    fn test_output_name_keeps_stem_and_csv_extension() {
        let name = output_name("lista clientes.xlsx");
        assert!(name.starts_with("lista clientes_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_output_name_falls_back_on_empty_hint() {
        let name = output_name("");
        assert!(name.starts_with("contatos_"));
    }

    #[test]
    fn test_output_names_are_unique() {
        assert_ne!(output_name("a.csv"), output_name("a.csv"));
    }

    #[tokio::test]
    async fn test_csv_writer_emits_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(dir.path());

        let records = vec![
            record("John", "Doe", "11987654321"),
            record("Maria", "Da Silva", "11912345678"),
        ];
        let artifact = writer.write("saida.csv", &records).await.unwrap();

        let content = std::fs::read_to_string(&artifact.path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "Primeiro nome,Sobrenome,Telefone,Etiquetas");
        assert!(lines.next().unwrap().starts_with("John,Doe,11987654321"));
        assert!(lines.next().unwrap().starts_with("Maria,Da Silva,11912345678"));
        assert!(lines.next().is_none());

        assert_eq!(artifact.download_name, "saida.csv");
        assert_eq!(artifact.size_bytes, content.len() as u64);
    }

    #[tokio::test]
    async fn test_build_attaches_counts_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvArtifactWriter::new(dir.path());

        let records = vec![record("A", "", "11111111111"), record("B", "", "22222222222")];
        let counts = RowCounts {
            original_rows: 3,
            blank_rows: 1,
            original_columns: 3,
            blank_columns: 0,
        };
        let result = build(&writer, "lista.xlsx", &records, counts).await.unwrap();

        assert_eq!(result.output_row_count, 2);
        assert_eq!(
            result.output_row_count + result.blank_row_count,
            result.original_row_count
        );

        let content = std::fs::read_to_string(&result.artifact.path).unwrap();
        let body: Vec<&str> = content.lines().skip(1).collect();
        assert!(body[0].starts_with("A,"));
        assert!(body[1].starts_with("B,"));
    }

    #[tokio::test]
    async fn test_writer_failure_surfaces_as_error() {
        // A file where the output directory should be.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let writer = CsvArtifactWriter::new(&blocker);
        let err = writer.write("saida.csv", &[]).await.unwrap_err();
        assert!(err.to_string().contains("output dir"));
    }
}
