// src/core/fs_ops.rs
//! File system operations for generated artifacts

use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;
use zip::write::SimpleFileOptions;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write file, creating the parent directory first
    pub async fn write_file_safe(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    /// `dir/stem.ext`, or `dir/stem_2.ext`, `dir/stem_3.ext`... if taken.
    pub fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
        let candidate = dir.join(format!("{}.{}", stem, extension));
        if !candidate.exists() {
            return candidate;
        }

        (2..)
            .map(|n| dir.join(format!("{}_{}.{}", stem, n, extension)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }

    /// Bundle files into a ZIP archive stored flat by file name.
    /// Writes the archive to `archive_path` and returns its bytes.
    pub async fn zip_files(files: &[PathBuf], archive_path: &Path) -> Result<Vec<u8>> {
        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("Invalid file name: {}", path.display()))?
                .to_string();
            let content = fs::read(path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            entries.push((name, content));
        }

        let bytes = Self::build_zip(&entries)?;
        Self::write_file_safe(archive_path, &bytes).await?;

        info!(
            "Bundled {} files into {}",
            entries.len(),
            archive_path.display()
        );
        Ok(bytes)
    }

    fn build_zip(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, content) in entries {
            writer
                .start_file(name.as_str(), options)
                .with_context(|| format!("Failed to add {} to archive", name))?;
            writer
                .write_all(content)
                .with_context(|| format!("Failed to write {} to archive", name))?;
        }

        let cursor = writer.finish().context("Failed to finalize archive")?;
        Ok(cursor.into_inner())
    }

    /// Bare file name check for download routes
    pub fn is_plain_file_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\')
            && !name.starts_with('.')
    }
}
