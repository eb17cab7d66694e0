//! Configuration for single-archive jobs and batch runs.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::UnboxError;

/// Directory scanned for archives when none is given.
pub const DEFAULT_INPUT_DIR: &str = "demo/input";

/// Output root used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "demo/output";

/// File name patterns selected by default during discovery.
pub const DEFAULT_PATTERNS: [&str; 5] = ["*.zip", "*.tar", "*.tar.gz", "*.7z", "*.rar"];

/// Options for one extraction job.
///
/// # Examples
///
/// ```
/// use unboxer_core::ExtractOptions;
///
/// let options = ExtractOptions::new("out").with_scratch_root(Some("/var/tmp".into()));
/// assert_eq!(options.output_root, std::path::Path::new("out"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Directory under which `<base_name>/` output directories are created.
    pub output_root: PathBuf,

    /// Where scratch directories are created. `None` places them inside
    /// `output_root` so moves stay on one filesystem.
    pub scratch_root: Option<PathBuf>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl ExtractOptions {
    /// Creates options writing under `output_root`.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            scratch_root: None,
        }
    }

    /// Sets the scratch root.
    #[must_use]
    pub fn with_scratch_root(mut self, scratch_root: Option<PathBuf>) -> Self {
        self.scratch_root = scratch_root;
        self
    }

    /// Returns the directory scratch directories are created in.
    #[must_use]
    pub fn scratch_root(&self) -> &Path {
        self.scratch_root.as_deref().unwrap_or(&self.output_root)
    }
}

/// Configuration for a batch run over a directory of archives.
///
/// # Examples
///
/// ```
/// use unboxer_core::BatchConfig;
///
/// let config = BatchConfig::new("incoming")
///     .with_patterns(vec!["*.zip".into()])
///     .with_workers(Some(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Directory whose immediate files are considered.
    pub input_dir: PathBuf,

    /// Case-insensitive file name globs.
    pub patterns: Vec<String>,

    /// Worker thread count; `None` uses the available parallelism.
    pub workers: Option<usize>,

    /// Options passed to every job.
    pub extract: ExtractOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR)
    }
}

impl BatchConfig {
    /// Creates a configuration scanning `input_dir` with default patterns.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
            workers: None,
            extract: ExtractOptions::default(),
        }
    }

    /// Replaces the discovery patterns.
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the per-job options.
    #[must_use]
    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - `workers` is `Some(0)`
    /// - the pattern list is empty
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(UnboxError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        if self.patterns.is_empty() {
            return Err(UnboxError::InvalidConfig(
                "at least one archive pattern is required".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_default() {
        let options = ExtractOptions::default();
        assert_eq!(options.output_root, Path::new(DEFAULT_OUTPUT_DIR));
        assert_eq!(options.scratch_root(), Path::new(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_scratch_root_override() {
        let options = ExtractOptions::new("out").with_scratch_root(Some("/tmp/s".into()));
        assert_eq!(options.scratch_root(), Path::new("/tmp/s"));
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.input_dir, Path::new(DEFAULT_INPUT_DIR));
        assert_eq!(config.patterns.len(), 5);
        assert!(config.patterns.contains(&"*.tar.gz".to_string()));
        assert_eq!(config.workers, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_workers() {
        let config = BatchConfig::default().with_workers(Some(0));
        assert!(matches!(
            config.validate(),
            Err(UnboxError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_empty_patterns() {
        let config = BatchConfig::default().with_patterns(Vec::new());
        assert!(matches!(
            config.validate(),
            Err(UnboxError::InvalidConfig(_))
        ));
    }
}
