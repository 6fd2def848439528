use crate::dataset::climate_dataset::ClimateDataset;
use crate::dataset::error::DatasetError;
use crate::dataset::loader::parse_climate_csv;
use log::{debug, info};
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Memoizes cleaned datasets by a hash of the source bytes.
///
/// Loading the same file twice returns the same `Arc`; a file whose content
/// changed hashes differently and is parsed again. Entries live until the
/// cache is dropped.
///
/// Keys pair a 64-bit `DefaultHasher` digest with the byte length. The digest
/// is not cryptographic and not stable across Rust releases, so the cache is
/// only meaningful within one process.
#[derive(Debug, Default)]
pub struct DatasetCache {
    datasets: Mutex<HashMap<ContentKey, Arc<ClimateDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` and returns its cleaned dataset, parsing only on a cache miss.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<ClimateDataset>, DatasetError> {
        let bytes =
            std::fs::read(path).map_err(|e| DatasetError::FileRead(path.to_path_buf(), e))?;
        let dataset = self.get_or_parse(&bytes)?;
        info!("Climate data for {} ready ({} days)", path.display(), dataset.len());
        Ok(dataset)
    }

    /// Returns the cleaned dataset for CSV `bytes`, parsing only on a cache miss.
    pub fn get_or_parse(&self, bytes: &[u8]) -> Result<Arc<ClimateDataset>, DatasetError> {
        let key = ContentKey::of(bytes);

        {
            let cache = self.datasets.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(dataset) = cache.get(&key) {
                debug!("Cache hit for climate data {}", key);
                return Ok(Arc::clone(dataset));
            }
        }

        debug!("Cache miss for climate data {}, parsing", key);
        let parsed = Arc::new(parse_climate_csv(bytes)?);

        let mut cache = self.datasets.lock().unwrap_or_else(PoisonError::into_inner);
        match cache.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&parsed));
                Ok(parsed)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ContentKey {
    digest: u64,
    len: usize,
}

impl ContentKey {
    fn of(bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            digest: hasher.finish(),
            len: bytes.len(),
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x} ({} bytes)", self.digest, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "time,temperature_2m_max,temperature_2m_min,precipitation_sum
2018-06-01,18.0,9.0,0.0
2018-06-02,20.0,11.0,2.5
";

    #[test]
    fn same_content_is_parsed_once() -> Result<(), Box<dyn std::error::Error>> {
        let cache = DatasetCache::new();
        let first = cache.get_or_parse(CSV.as_bytes())?;
        let second = cache.get_or_parse(CSV.as_bytes())?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[test]
    fn changed_content_gets_its_own_entry() -> Result<(), Box<dyn std::error::Error>> {
        let cache = DatasetCache::new();
        let original = cache.get_or_parse(CSV.as_bytes())?;
        let edited = CSV.replace("2.5", "4.0");
        let updated = cache.get_or_parse(edited.as_bytes())?;
        assert!(!Arc::ptr_eq(&original, &updated));
        assert_eq!(updated.records()[1].precipitation, 4.0);
        assert_eq!(cache.len(), 2);
        Ok(())
    }

    #[test]
    fn keys_carry_the_content_length() {
        let short = ContentKey::of(CSV.as_bytes());
        let longer = ContentKey::of(format!("{}\n", CSV).as_bytes());
        assert_eq!(short, ContentKey::of(CSV.as_bytes()));
        assert_eq!(short.len, CSV.len());
        assert_eq!(longer.len, CSV.len() + 1);
        assert_ne!(short, longer);
    }

    #[test]
    fn failed_parse_is_not_cached() {
        let cache = DatasetCache::new();
        assert!(cache.get_or_parse(b"time\n").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn loads_through_the_file_system() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(CSV.as_bytes())?;
        file.flush()?;

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path())?;
        let second = cache.get_or_load(file.path())?;
        assert!(Arc::ptr_eq(&first, &second));
        Ok(())
    }
}
