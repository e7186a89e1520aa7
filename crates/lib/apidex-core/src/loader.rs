//! Resolves service descriptors to raw document text.

use std::{error::Error, fmt, path::PathBuf};

use reqwest::StatusCode;

use crate::model::{DocumentSource, ServiceDescriptor};

/// Error raised when a descriptor's document cannot be retrieved.
///
/// Always scoped to a single descriptor; callers continue with the
/// remaining descriptors in the batch.
#[derive(Debug)]
pub enum LoadError {
    /// Neither a URL nor a file path is configured for the service.
    MissingSource { service: String },
    /// The URL responded with a non-success status.
    HttpStatus { url: String, status: StatusCode },
    /// The request itself failed before or while reading the body.
    Transport { url: String, source: reqwest::Error },
    /// The local file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource { service } => {
                write!(f, "no OpenAPI source configured for service {service}")
            }
            Self::HttpStatus { url, status } => {
                write!(f, "{url} responded with status {status}")
            }
            Self::Transport { url, source } => {
                write!(f, "request to {url} failed: {source}")
            }
            Self::Io { path, source } => {
                let path = path.display();
                write!(f, "failed to read {path}: {source}")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::MissingSource { .. } | Self::HttpStatus { .. } => None,
        }
    }
}

/// Fetches OpenAPI documents from URLs or local files.
///
/// Performs exactly one attempt per descriptor: no retries and no caching.
/// Any per-fetch timeout comes from the wrapped [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    client: reqwest::Client,
}

impl DocumentLoader {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Resolves a descriptor to the raw document text.
    ///
    /// # Errors
    /// Returns [`LoadError`] when the descriptor has no source, the URL
    /// fetch fails or responds non-success, or the file cannot be read.
    pub async fn load(&self, descriptor: &ServiceDescriptor) -> Result<String, LoadError> {
        match descriptor.source() {
            Some(DocumentSource::Url(url)) => self.fetch(url).await,
            Some(DocumentSource::File(path)) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
            }
            None => Err(LoadError::MissingSource {
                service: descriptor.name.clone(),
            }),
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| LoadError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
