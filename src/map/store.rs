//! Single-slot map snapshot on disk
//!
//! Every successful submission overwrites the file; the full-map view
//! reads back whatever is there.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapStoreError {
    #[error("Full map file '{}' not found.", .0.display())]
    Missing(PathBuf),

    #[error("Map file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct MapStore {
    path: PathBuf,
}

impl MapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Overwrite the snapshot
    pub fn save(&self, html: &str) -> Result<(), MapStoreError> {
        std::fs::write(&self.path, html).map_err(|source| MapStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Map saved to {} ({} bytes)", self.path.display(), html.len());
        Ok(())
    }

    /// Read the latest snapshot
    pub fn load(&self) -> Result<String, MapStoreError> {
        std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                MapStoreError::Missing(self.path.clone())
            } else {
                MapStoreError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::new(dir.path().join("disaster_risk_map.html"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, MapStoreError::Missing(_)));
        assert!(err.to_string().starts_with("Full map file '"));
        assert!(err.to_string().ends_with("disaster_risk_map.html' not found."));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::new(dir.path().join("map.html"));
        store.save("<html>one</html>").unwrap();
        store.save("<html>two</html>").unwrap();
        assert_eq!(store.load().unwrap(), "<html>two</html>");
    }
}
