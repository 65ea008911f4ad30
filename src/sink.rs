//! Output sink resolution.
//!
//! A single configuration value, the source root, decides where artifacts
//! go. When it is present every artifact is written to
//! `{root}/{version lowercased}/auto/group/{artifact}.rs`; when it is absent
//! artifacts are printed to stdout and a warning is logged.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::render::EXTENSION;

/// Environment variable holding the source root.
pub const SRC_DIR_ENV: &str = "SRC_DIR";

/// Where the source root value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// The `SRC_DIR` environment variable.
    Environment,
    /// An explicitly supplied property (e.g. `--src-dir`).
    Property,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("an environment variable"),
            Self::Property => f.write_str("a property"),
        }
    }
}

/// Resolved root directory for generated sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    path: PathBuf,
    origin: ConfigOrigin,
}

impl SourceRoot {
    pub fn new(path: impl Into<PathBuf>, origin: ConfigOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }

    /// Apply the precedence environment → property → unset.
    ///
    /// Empty values count as unset.
    pub fn resolve(env_value: Option<PathBuf>, property_value: Option<PathBuf>) -> Option<Self> {
        let non_empty = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());
        let root = non_empty(env_value)
            .map(|path| Self::new(path, ConfigOrigin::Environment))
            .or_else(|| {
                non_empty(property_value).map(|path| Self::new(path, ConfigOrigin::Property))
            })?;
        info!("SRC_DIR is {}: {}", root.origin, root.path.display());
        Some(root)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> ConfigOrigin {
        self.origin
    }

    /// Directory holding every artifact of `version`.
    pub fn group_dir(&self, version: &str) -> PathBuf {
        self.path
            .join(version.to_lowercase())
            .join("auto")
            .join("group")
    }

    /// Full path of the artifact named `artifact_name`.
    pub fn artifact_path(&self, version: &str, artifact_name: &str) -> PathBuf {
        self.group_dir(version)
            .join(format!("{artifact_name}.{EXTENSION}"))
    }
}

/// Destination of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    File(PathBuf),
    Console,
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Console => f.write_str("<console>"),
        }
    }
}

/// Buffered writer for one artifact. Never shared across artifacts.
pub struct OutputSink {
    target: SinkTarget,
    writer: Box<dyn Write>,
}

impl OutputSink {
    /// Wrap an arbitrary writer.
    pub fn new(target: SinkTarget, writer: Box<dyn Write>) -> Self {
        Self { target, writer }
    }

    /// Open stdout as a sink.
    pub fn console() -> Self {
        Self::new(SinkTarget::Console, Box::new(BufWriter::new(io::stdout())))
    }

    /// Create parent directories and open `path` for writing.
    pub fn create(path: &Path) -> Result<Self> {
        let target = SinkTarget::File(path.to_path_buf());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Write {
                target: parent.display().to_string(),
                source: e,
            })?;
        }
        let file = File::create(path).map_err(|e| Error::Write {
            target: target.to_string(),
            source: e,
        })?;
        Ok(Self::new(target, Box::new(BufWriter::new(file))))
    }

    pub fn target(&self) -> &SinkTarget {
        &self.target
    }

    /// Write the full artifact text, flush, and close the sink.
    ///
    /// Any I/O failure is fatal for the whole run.
    pub fn finish(mut self, content: &str) -> Result<()> {
        let result = self
            .writer
            .write_all(content.as_bytes())
            .and_then(|()| self.writer.flush());
        result.map_err(|e| Error::Write {
            target: self.target.to_string(),
            source: e,
        })
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Opens one fresh sink per artifact.
pub trait SinkProvider {
    fn open(&self, version: &str, artifact_name: &str) -> Result<OutputSink>;
}

/// Filesystem provider: files under a [`SourceRoot`], or stdout when unset.
#[derive(Debug, Clone, Default)]
pub struct FsSinkProvider {
    root: Option<SourceRoot>,
}

impl FsSinkProvider {
    pub fn new(root: Option<SourceRoot>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&SourceRoot> {
        self.root.as_ref()
    }
}

impl SinkProvider for FsSinkProvider {
    fn open(&self, version: &str, artifact_name: &str) -> Result<OutputSink> {
        match &self.root {
            Some(root) => {
                let path = root.artifact_path(version, artifact_name);
                info!("building source file: {}", path.display());
                OutputSink::create(&path)
            }
            None => {
                warn!("no SRC_DIR provided, output stream is CONSOLE");
                Ok(OutputSink::console())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_wins_over_property() {
        let root = SourceRoot::resolve(Some("/env".into()), Some("/prop".into())).unwrap();
        assert_eq!(root.path(), Path::new("/env"));
        assert_eq!(root.origin(), ConfigOrigin::Environment);
    }

    #[test]
    fn property_used_when_environment_missing() {
        let root = SourceRoot::resolve(None, Some("/prop".into())).unwrap();
        assert_eq!(root.origin(), ConfigOrigin::Property);

        let root = SourceRoot::resolve(Some(PathBuf::new()), Some("/prop".into())).unwrap();
        assert_eq!(root.path(), Path::new("/prop"));
    }

    #[test]
    fn unset_resolves_to_none() {
        assert!(SourceRoot::resolve(None, None).is_none());
        assert!(SourceRoot::resolve(Some(PathBuf::new()), Some(PathBuf::new())).is_none());
    }

    #[test]
    fn artifact_path_layout() {
        let root = SourceRoot::new("/tmp/out", ConfigOrigin::Property);
        assert_eq!(
            root.artifact_path("4.4", "44_D_68_GroupMgr"),
            PathBuf::from("/tmp/out/4.4/auto/group/44_D_68_GroupMgr.rs")
        );
        assert_eq!(
            root.group_dir("5.0SP1"),
            PathBuf::from("/tmp/out/5.0sp1/auto/group")
        );
    }

    #[test]
    fn unset_root_falls_back_to_console() {
        let sink = FsSinkProvider::default().open("4.4", "44_D_68_GroupMgr").unwrap();
        assert_eq!(sink.target(), &SinkTarget::Console);
    }

    #[test]
    fn create_makes_directories_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/out.rs");
        OutputSink::create(&path).unwrap().finish("fn main() {}\n").unwrap();
        // Idempotent directory creation.
        OutputSink::create(&path).unwrap().finish("// again\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// again\n");
    }

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[test]
    fn flush_failure_is_write_error() {
        let sink = OutputSink::new(SinkTarget::File("x.rs".into()), Box::new(FailingFlush));
        let err = sink.finish("text").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        let msg = err.to_string();
        assert!(msg.contains("x.rs"));
        assert!(msg.contains("disk full"));
    }
}
