use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use apidex_core::model::ServiceDescriptor;
use serde::Deserialize;

/// On-disk services manifest.
///
/// ```toml
/// [[services]]
/// name = "Sample API"
/// openapi_file_path = "schemas/sample-api.yaml"
///
/// [[services]]
/// name = "Petstore"
/// openapi_url = "https://petstore3.swagger.io/api/v3/openapi.json"
/// ```
#[derive(Debug, Deserialize)]
struct ServicesManifest {
    #[serde(default)]
    services: Vec<ServiceDescriptor>,
}

/// Error raised when the services manifest cannot be loaded.
///
/// Unlike per-service ingest failures, a missing or empty manifest is fatal
/// at startup: without it the server could only ever answer with no matches.
#[derive(Debug)]
pub enum ManifestError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Empty { path: PathBuf },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                let path = path.display();
                write!(f, "failed to read services manifest {path}: {source}")
            }
            Self::Parse { path, source } => {
                let path = path.display();
                write!(f, "failed to parse services manifest {path}: {source}")
            }
            Self::Empty { path } => {
                let path = path.display();
                write!(f, "services manifest {path} configures no services")
            }
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Empty { .. } => None,
        }
    }
}

/// Loads the service descriptors from a TOML manifest.
///
/// Entries with a bad or missing source are kept: the loader isolates them
/// per service at build time.
///
/// # Errors
/// Returns [`ManifestError`] when the file cannot be read or parsed, or
/// when it configures no services at all.
pub fn load_services(path: &Path) -> Result<Vec<ServiceDescriptor>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: ServicesManifest =
        toml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if manifest.services.is_empty() {
        return Err(ManifestError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(manifest.services)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_and_file_entries() {
        let manifest: ServicesManifest = toml::from_str(
            r#"
            [[services]]
            name = "Sample API"
            openapi_file_path = "schemas/sample-api.yaml"

            [[services]]
            name = "Petstore"
            openapi_url = "https://petstore.example/openapi.json"
            "#,
        )
        .expect("manifest should parse");

        assert_eq!(manifest.services.len(), 2);
        assert!(manifest.services[0].openapi_file_path.is_some());
        assert!(manifest.services[1].openapi_url.is_some());
    }

    #[test]
    fn empty_manifest_is_fatal() {
        let dir = std::env::temp_dir().join("apidex-manifest-tests");
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("empty.toml");
        std::fs::write(&path, "").expect("manifest should be writable");

        let err = load_services(&path).expect_err("empty manifest should fail");
        assert!(matches!(err, ManifestError::Empty { .. }));
    }
}
