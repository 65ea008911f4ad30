//! Group manager generation for a whole FIX version.
//!
//! [`CodeEmitter::generate`] walks the version's context order map and
//! produces one artifact per message type:
//!
//! 1. build the structured artifact (header registrations, then native ones)
//! 2. open a fresh sink for it
//! 3. render, write, flush, close
//!
//! The first sink failure aborts the run. Artifacts already written stay on
//! disk; no further message types are processed.

use tracing::{debug, error, warn};

use crate::artifact::{GroupManagerArtifact, GroupScope};
use crate::error::Result;
use crate::render;
use crate::schema::{HEADER, SchemaModel};
use crate::sink::{FsSinkProvider, SinkProvider, SinkTarget};

/// Statistics collected during generation for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub artifacts_generated: usize,
    pub console_artifacts: usize,
    /// Header groups per artifact (the same set is emitted into every one).
    pub header_groups: usize,
    pub native_groups_generated: usize,
    pub message_types_without_groups: usize,
}

/// Emits group manager artifacts for one FIX version.
#[derive(Debug)]
pub struct CodeEmitter<P = FsSinkProvider> {
    version: String,
    sinks: P,
}

impl CodeEmitter<FsSinkProvider> {
    /// Emitter writing to the filesystem provider `sinks`.
    pub fn new(version: impl Into<String>, sinks: FsSinkProvider) -> Self {
        Self::with_sinks(version, sinks)
    }
}

impl<P: SinkProvider> CodeEmitter<P> {
    /// Emitter writing through a custom sink provider.
    pub fn with_sinks(version: impl Into<String>, sinks: P) -> Self {
        Self {
            version: version.into(),
            sinks,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Generate one artifact per message type of the version.
    pub fn generate(&self, model: &dyn SchemaModel) -> Result<GenerationStats> {
        let group_map = model.repeating_group_map(&self.version)?;
        let context = model.context_order_map(&self.version)?;
        let mut stats = GenerationStats::default();

        for msg_type in context.message_types() {
            if msg_type == HEADER {
                warn!("context order map lists the {HEADER} pseudo message type, skipping");
                continue;
            }
            let artifact = GroupManagerArtifact::build(&self.version, msg_type, group_map);
            let native = artifact.count(&GroupScope::Native);
            debug!(
                msg_type,
                registrations = artifact.registrations.len(),
                native,
                "group manager"
            );

            self.emit(&artifact, &mut stats)?;

            stats.artifacts_generated += 1;
            stats.header_groups = artifact.count(&GroupScope::Header);
            stats.native_groups_generated += native;
            if native == 0 {
                stats.message_types_without_groups += 1;
            }
        }

        Ok(stats)
    }

    /// Open, write, flush, and close the sink for one artifact.
    fn emit(&self, artifact: &GroupManagerArtifact, stats: &mut GenerationStats) -> Result<()> {
        let sink = self.sinks.open(&self.version, &artifact.artifact_name)?;
        if sink.target() == &SinkTarget::Console {
            stats.console_artifacts += 1;
        }
        let source = render::render(artifact);
        sink.finish(&source).inspect_err(|e| {
            error!("aborting group code generation for FIX {}: {e}", self.version);
        })
    }
}
