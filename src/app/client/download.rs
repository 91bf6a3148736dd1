//! File download operations with atomic writes and streaming
//!
//! Each file body is streamed into a `.part` sibling through a fixed-size
//! write buffer and renamed into place once complete, so an interrupted
//! download never leaves a truncated file under the real name.
//!
//! A failed file is reported and skipped; it never aborts the rest of the
//! batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use url::Url;

use crate::app::client::source::{ByteStream, ContentSource};
use crate::app::models::FileDescriptor;
use crate::constants::{files, workers};
use crate::errors::{DownloadError, DownloadResult, TransportError, ValidationError};

/// Tuning for batch downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Files fetched at the same time; 1 keeps downloads serial
    pub concurrency: usize,
    /// Size of each buffered write to disk in bytes
    pub chunk_size: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: workers::DEFAULT_CONCURRENCY,
            chunk_size: files::DOWNLOAD_CHUNK_SIZE,
        }
    }
}

/// A file written to disk
#[derive(Debug, Clone, Serialize)]
pub struct DownloadedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// A file that could not be downloaded
#[derive(Debug, Clone, Serialize)]
pub struct FailedDownload {
    pub file_name: String,
    pub download_url: String,
    pub reason: String,
}

/// Outcome of a batch download
#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    pub downloaded: Vec<DownloadedFile>,
    pub failed: Vec<FailedDownload>,
}

impl DownloadReport {
    /// Total bytes written across all successful files
    pub fn total_bytes(&self) -> u64 {
        self.downloaded.iter().map(|f| f.bytes).sum()
    }

    /// True when every requested file was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// File download operations handler
pub struct DownloadHandler<'a, S> {
    source: &'a S,
    config: DownloadConfig,
}

impl<'a, S: ContentSource + Sync> DownloadHandler<'a, S> {
    /// Creates a new DownloadHandler over the given content source
    pub fn new(source: &'a S, config: DownloadConfig) -> Self {
        Self { source, config }
    }

    /// Downloads every descriptor into `destination`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::DestinationMissing` if `destination` is not an
    /// existing directory. Per-file failures land in the report instead.
    pub async fn download_all(
        &self,
        destination: &Path,
        descriptors: &[FileDescriptor],
    ) -> Result<DownloadReport, ValidationError> {
        self.download_all_with(destination, descriptors, |_| {}).await
    }

    /// Like [`download_all`](Self::download_all), calling `on_file_done` after
    /// each file finishes, successfully or not
    pub async fn download_all_with<F>(
        &self,
        destination: &Path,
        descriptors: &[FileDescriptor],
        mut on_file_done: F,
    ) -> Result<DownloadReport, ValidationError>
    where
        F: FnMut(&FileDescriptor),
    {
        if !destination.is_dir() {
            return Err(ValidationError::DestinationMissing {
                path: destination.to_path_buf(),
            });
        }

        // One writer per target: a repeated file name is only fetched once
        let mut targets = HashSet::new();
        let mut batch = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if targets.insert(descriptor.file_name.as_str()) {
                batch.push(descriptor);
            } else {
                tracing::debug!("Skipping repeated file {}", descriptor.file_name);
                on_file_done(descriptor);
            }
        }

        let concurrency = self.config.concurrency.max(1);
        tracing::info!(
            "Downloading {} files to {} ({} at a time)",
            batch.len(),
            destination.display(),
            concurrency
        );

        let mut report = DownloadReport::default();
        let mut results = stream::iter(batch)
            .map(|descriptor| async move {
                let result = self.download_one(destination, descriptor).await;
                (descriptor, result)
            })
            .buffer_unordered(concurrency);

        while let Some((descriptor, result)) = results.next().await {
            match result {
                Ok(file) => {
                    tracing::info!("Downloaded {} ({} bytes)", file.file_name, file.bytes);
                    report.downloaded.push(file);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", descriptor.file_name, e);
                    report.failed.push(FailedDownload {
                        file_name: descriptor.file_name.clone(),
                        download_url: descriptor.download_url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            on_file_done(descriptor);
        }

        Ok(report)
    }

    /// Downloads a single descriptor into `destination`
    pub async fn download_one(
        &self,
        destination: &Path,
        descriptor: &FileDescriptor,
    ) -> DownloadResult<DownloadedFile> {
        let target = local_path(destination, &descriptor.file_name)?;
        let url = Url::parse(&descriptor.download_url).map_err(|e| TransportError::InvalidUrl {
            url: descriptor.download_url.clone(),
            error: e.to_string(),
        })?;

        let body = self.source.fetch_stream(&url).await?;
        let bytes = write_stream(&target, body, self.config.chunk_size).await?;

        Ok(DownloadedFile {
            file_name: descriptor.file_name.clone(),
            path: target,
            bytes,
        })
    }
}

/// Map a listed file name to a path under `destination`
fn local_path(destination: &Path, file_name: &str) -> DownloadResult<PathBuf> {
    let unsafe_name = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains('/')
        || file_name.contains('\\');
    if unsafe_name {
        return Err(DownloadError::InvalidFileName {
            name: file_name.to_string(),
        });
    }
    Ok(destination.join(file_name))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(files::TEMP_FILE_SUFFIX);
    PathBuf::from(name)
}

/// Streams `body` to `path` through a `.part` file, returning the bytes written
///
/// Writes reach the disk in `chunk_size` pieces. The partial file is removed
/// if the stream or any write fails.
pub async fn write_stream(
    path: &Path,
    body: ByteStream,
    chunk_size: usize,
) -> DownloadResult<u64> {
    let temp_path = temp_path_for(path);

    match write_temp(&temp_path, body, chunk_size).await {
        Ok(bytes) => {
            tokio::fs::rename(&temp_path, path).await.map_err(|_| {
                DownloadError::AtomicOperationFailed {
                    temp_path: temp_path.clone(),
                    final_path: path.to_path_buf(),
                }
            })?;
            tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes);
            Ok(bytes)
        }
        Err(e) => {
            if tokio::fs::try_exists(&temp_path).await.unwrap_or(false) {
                let _ = tokio::fs::remove_file(&temp_path).await;
            }
            Err(e)
        }
    }
}

async fn write_temp(
    temp_path: &Path,
    mut body: ByteStream,
    chunk_size: usize,
) -> DownloadResult<u64> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::with_capacity(chunk_size.max(1), file);
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    writer.get_mut().sync_all().await?;
    Ok(written)
}
