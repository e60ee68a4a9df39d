//! Source loading shared by the subcommands.

use hw_lst::cache::{ModifiedTime, SourceCache};
use hw_lst::reading::Reading;
use hw_lst::source::load_path;
use std::path::Path;
use std::sync::Arc;

/// Loaded readings, reloaded only when the source changes on disk.
pub struct Sources {
    cache: SourceCache<ModifiedTime>,
}

impl Sources {
    pub fn new() -> Self {
        Sources {
            cache: SourceCache::new(ModifiedTime),
        }
    }

    /// Readings of a long table or a directory of per-region files.
    pub fn readings(&mut self, path: &Path) -> anyhow::Result<Arc<Vec<Reading>>> {
        let readings = self.cache.get_or_load(path, load_path)?;
        if readings.is_empty() {
            log::warn!("[HW] input: {} holds no usable readings", path.display());
        }
        Ok(readings)
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn readings_are_loaded_once() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "NM_MICRO,date,valor").unwrap();
        writeln!(file, "Pajeú,2020-01-01,30.5").unwrap();
        file.flush().unwrap();

        let mut sources = Sources::new();
        let first = sources.readings(file.path()).unwrap();
        let second = sources.readings(file.path()).unwrap();
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_source_is_an_error() {
        let mut sources = Sources::new();
        assert!(sources.readings(Path::new("/nonexistent/lst.csv")).is_err());
    }
}
