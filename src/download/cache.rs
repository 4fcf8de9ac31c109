use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "simc-data")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// One directory per upstream branch so snapshots never mix
    pub fn branch_dir(&self, branch: &str) -> PathBuf {
        self.cache_dir.join(branch)
    }

    pub fn dump_path(&self, branch: &str, file: &str) -> PathBuf {
        self.branch_dir(branch).join(file)
    }

    pub fn etag_path(&self, branch: &str, file: &str) -> PathBuf {
        self.branch_dir(branch).join(format!("{}.etag", file))
    }

    pub fn is_cached(&self, branch: &str, file: &str) -> bool {
        self.dump_path(branch, file).exists()
    }

    /// Stored ETag, only meaningful while the dump itself is present
    pub fn read_etag(&self, branch: &str, file: &str) -> Option<String> {
        if !self.is_cached(branch, file) {
            return None;
        }
        fs::read_to_string(self.etag_path(branch, file))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn store(&self, branch: &str, file: &str, text: &str, etag: Option<&str>) -> Result<()> {
        fs::create_dir_all(self.branch_dir(branch)).context("Failed to create branch directory")?;
        fs::write(self.dump_path(branch, file), text)
            .with_context(|| format!("Failed to write {}", file))?;

        let etag_path = self.etag_path(branch, file);
        match etag {
            Some(etag) => fs::write(&etag_path, etag)
                .with_context(|| format!("Failed to write ETag for {}", file))?,
            None if etag_path.exists() => fs::remove_file(&etag_path)?,
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_layout_and_etags() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();

        assert!(!cache.is_cached("shadowlands", "gem_properties.inc"));
        assert_eq!(cache.read_etag("shadowlands", "gem_properties.inc"), None);

        cache
            .store("shadowlands", "gem_properties.inc", "{ 1, 2, 3, 4 },", Some("\"abc\""))
            .unwrap();
        assert!(cache.is_cached("shadowlands", "gem_properties.inc"));
        assert!(!cache.is_cached("shadowlands-ptr", "gem_properties.inc"));
        assert_eq!(
            cache.read_etag("shadowlands", "gem_properties.inc").as_deref(),
            Some("\"abc\"")
        );

        cache
            .store("shadowlands", "gem_properties.inc", "{ 1, 2, 3, 5 },", None)
            .unwrap();
        assert_eq!(cache.read_etag("shadowlands", "gem_properties.inc"), None);
    }
}
