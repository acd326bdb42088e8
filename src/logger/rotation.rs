//! File rotation for the logger
//!
//! Rotated files are renamed to `<stem>.<YYYYmmdd_HHMMSS>[.<n>].<ext>` next to
//! the live file. Names sort by timestamp, then by the numeric suffix used
//! for several rotations within one second.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::{Timestamp, Zoned};

use super::compression::gzip_file;
use super::config::{RotationConfig, RotationStrategy, TimeUnit};
use super::error::LoggerError;

/// Decides when to rotate and performs the rename, compression and pruning.
pub struct RotationManager {
    config: RotationConfig,
    last_rotation: Timestamp,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            last_rotation: Timestamp::now(),
        }
    }

    pub fn should_rotate(&self, current_size: u64) -> bool {
        self.should_rotate_at(current_size, Timestamp::now())
    }

    fn should_rotate_at(&self, current_size: u64, now: Timestamp) -> bool {
        match self.config.strategy {
            RotationStrategy::Size => current_size >= self.config.max_size,
            RotationStrategy::Time(unit) => unit.elapsed(self.last_rotation, now),
            RotationStrategy::Combined => {
                current_size >= self.config.max_size
                    || TimeUnit::Daily.elapsed(self.last_rotation, now)
            }
        }
    }

    /// Moves the live file aside, then prunes old rotations.
    pub fn rotate(&mut self, live_path: &Path) -> Result<(), LoggerError> {
        if live_path.exists() {
            let rotated = rotated_path(live_path, &Zoned::now());
            fs::rename(live_path, &rotated)?;
            if self.config.compress {
                gzip_file(&rotated)?;
            }
        }
        self.last_rotation = Timestamp::now();
        self.prune(live_path)
    }

    /// Deletes the oldest rotated files beyond `max_files`.
    pub fn prune(&self, live_path: &Path) -> Result<(), LoggerError> {
        let (stem, _) = name_parts(live_path)?;
        let mut rotated = rotated_files(live_path)?;
        rotated.sort_by_cached_key(|path| rotation_order(&stem, path));
        let excess = rotated.len().saturating_sub(self.config.max_files);
        for path in rotated.into_iter().take(excess) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn name_parts(live_path: &Path) -> Result<(String, String), LoggerError> {
    let stem = live_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| {
            LoggerError::rotation(format!("Log path has no file name: {}", live_path.display()))
        })?;
    let ext = live_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((stem, ext))
}

/// A free name for the next rotated file.
fn rotated_path(live_path: &Path, now: &Zoned) -> PathBuf {
    let stem = live_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let ext = live_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = now.strftime("%Y%m%d_%H%M%S").to_string();

    let mut candidate = live_path.with_file_name(format!("{}.{}{}", stem, stamp, ext));
    let mut n = 1;
    // Several rotations within one second
    while candidate.exists() || gz_sibling(&candidate).exists() {
        candidate = live_path.with_file_name(format!("{}.{}.{}{}", stem, stamp, n, ext));
        n += 1;
    }
    candidate
}

/// `(timestamp, n)` of a rotated file; the first rotation in a second has `n = 0`.
fn rotation_order(stem: &str, path: &Path) -> (String, u32) {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let rest = name
        .strip_prefix(stem)
        .and_then(|r| r.strip_prefix('.'))
        .unwrap_or(name.as_str());
    let mut segments = rest.split('.');
    let stamp = segments.next().unwrap_or_default().to_string();
    let n = segments
        .next()
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    (stamp, n)
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn rotated_files(live_path: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let (stem, ext) = name_parts(live_path)?;
    let parent = match live_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!("{}.", stem);
    let suffixes = [format!(".{}", ext), format!(".{}.gz", ext)];

    let mut files = Vec::new();
    for entry in fs::read_dir(parent)? {
        let path = entry?.path();
        if path == live_path {
            continue;
        }
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let rest = match name.strip_prefix(&prefix) {
            Some(rest) => rest,
            None => continue,
        };
        // The timestamp segment keeps unrelated files like `shop.log.bak` out
        if rest.starts_with(|c: char| c.is_ascii_digit())
            && suffixes.iter().any(|s| rest.ends_with(s.as_str()))
        {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn config(strategy: RotationStrategy, max_files: usize, compress: bool) -> RotationConfig {
        RotationConfig {
            strategy,
            max_size: 1024,
            max_files,
            compress,
        }
    }

    #[test]
    fn test_should_rotate_by_size() {
        let manager = RotationManager::new(config(RotationStrategy::Size, 5, false));
        assert!(!manager.should_rotate(1023));
        assert!(manager.should_rotate(1024));
    }

    #[test]
    fn test_time_rotation_waits_for_unit() {
        let manager =
            RotationManager::new(config(RotationStrategy::Time(TimeUnit::Hourly), 5, false));
        let start = manager.last_rotation;
        let soon = start.checked_add(jiff::Span::new().minutes(59)).unwrap();
        let later = start.checked_add(jiff::Span::new().hours(1)).unwrap();

        assert!(!manager.should_rotate_at(u64::MAX, soon));
        assert!(manager.should_rotate_at(0, later));
    }

    #[test]
    fn test_rotated_path_format() {
        let now: Zoned = "2024-03-05T10:20:30[UTC]".parse().unwrap();
        let dir = tempdir().unwrap();
        let live = dir.path().join("shop.log");

        assert_eq!(rotated_path(&live, &now), dir.path().join("shop.20240305_102030.log"));

        fs::write(dir.path().join("shop.20240305_102030.log"), "").unwrap();
        assert_eq!(
            rotated_path(&live, &now),
            dir.path().join("shop.20240305_102030.1.log")
        );
    }

    #[test]
    fn test_rotate_moves_live_file() {
        let dir = tempdir().unwrap();
        let live = dir.path().join("shop.log");
        fs::write(&live, "line\n").unwrap();

        let mut manager = RotationManager::new(config(RotationStrategy::Size, 5, false));
        manager.rotate(&live).unwrap();

        assert!(!live.exists());
        assert_eq!(rotated_files(&live).unwrap().len(), 1);
    }

    #[test]
    fn test_rotate_with_compression() {
        let dir = tempdir().unwrap();
        let live = dir.path().join("shop.log");
        fs::write(&live, "line\n").unwrap();

        let mut manager = RotationManager::new(config(RotationStrategy::Size, 5, true));
        manager.rotate(&live).unwrap();

        let rotated = rotated_files(&live).unwrap();
        assert_eq!(rotated.len(), 1);
        assert!(rotated[0].to_string_lossy().ends_with(".log.gz"));
    }

    #[test]
    fn test_prune_ignores_unrelated_files() {
        let dir = tempdir().unwrap();
        let live = dir.path().join("shop.log");
        fs::write(&live, "").unwrap();
        fs::write(dir.path().join("shop.log.bak"), "").unwrap();
        fs::write(dir.path().join("other.20240101_000000.log"), "").unwrap();
        fs::write(dir.path().join("shop.20240101_000000.log"), "").unwrap();

        let manager = RotationManager::new(config(RotationStrategy::Size, 1, false));
        manager.prune(&live).unwrap();

        assert!(dir.path().join("shop.log.bak").exists());
        assert!(dir.path().join("other.20240101_000000.log").exists());
        assert!(dir.path().join("shop.20240101_000000.log").exists());
    }

    #[test]
    fn test_prune_orders_same_second_rotations_numerically() {
        let dir = tempdir().unwrap();
        let live = dir.path().join("shop.log");
        for name in [
            "shop.20240101_000000.log",
            "shop.20240101_000000.1.log",
            "shop.20240101_000000.2.log",
            "shop.20240101_000000.10.log",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let manager = RotationManager::new(config(RotationStrategy::Size, 2, false));
        manager.prune(&live).unwrap();

        assert!(!dir.path().join("shop.20240101_000000.log").exists());
        assert!(!dir.path().join("shop.20240101_000000.1.log").exists());
        assert!(dir.path().join("shop.20240101_000000.2.log").exists());
        assert!(dir.path().join("shop.20240101_000000.10.log").exists());
    }

    #[test]
    fn test_rotation_order_handles_compressed_names() {
        let order = |name: &str| rotation_order("shop", Path::new(name));
        assert_eq!(order("shop.20240101_000000.log.gz"), ("20240101_000000".to_string(), 0));
        assert_eq!(order("shop.20240101_000000.3.log.gz"), ("20240101_000000".to_string(), 3));
        assert!(order("shop.20231231_235959.9.log") < order("shop.20240101_000000.log"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn property_rotation_triggers_at_max_size(
            current_size in 0u64..10_000_000u64,
            max_size in 1u64..10_000_000u64
        ) {
            let manager = RotationManager::new(RotationConfig {
                strategy: RotationStrategy::Size,
                max_size,
                max_files: 5,
                compress: false,
            });
            prop_assert_eq!(manager.should_rotate(current_size), current_size >= max_size);
        }

        #[test]
        fn property_prune_keeps_newest(max_files in 1usize..6, existing in 0usize..10) {
            let dir = tempdir().unwrap();
            let live = dir.path().join("shop.log");
            for i in 0..existing {
                let name = format!("shop.20240101_0000{:02}.log", i);
                fs::write(dir.path().join(name), "").unwrap();
            }

            let manager = RotationManager::new(config(RotationStrategy::Size, max_files, false));
            manager.prune(&live).unwrap();

            let mut remaining = rotated_files(&live).unwrap();
            remaining.sort();
            prop_assert_eq!(remaining.len(), existing.min(max_files));
            if existing > 0 {
                let newest = dir.path().join(format!("shop.20240101_0000{:02}.log", existing - 1));
                prop_assert_eq!(remaining.last(), Some(&newest));
            }
        }
    }
}
