//! Generate FIX repeating-group managers from a parsed FIX schema model.
//!
//! `fix-group-gen` reads a schema model (per FIX version: the repeating groups
//! of every message type plus the ordered list of message types) and emits
//! one Rust module per message type. Each module defines a group manager that
//! registers a singleton for every repeating group the message can carry.
//!
//! # Features
//!
//! - Standard header groups are registered and defined in every artifact
//! - Native groups get names derived from the message type and its hash, so
//!   identifiers never collide across artifacts
//! - Member fields keep their declaration order
//! - Emitted singletons are race-free on first access (`OnceLock`)
//! - Deterministic output: byte-identical across runs
//! - Falls back to stdout when no source root is configured
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use fix_group_gen::codegen::CodeEmitter;
//! use fix_group_gen::sink::{FsSinkProvider, SourceRoot};
//!
//! let schema = fix_group_gen::schema::load_schema(Path::new("fix-schema.json"))?;
//! let root = SourceRoot::resolve(std::env::var_os("SRC_DIR").map(Into::into), None);
//! let stats = CodeEmitter::new("4.4", FsSinkProvider::new(root)).generate(&schema)?;
//! eprintln!("Generated {} group managers", stats.artifacts_generated);
//! # Ok::<(), fix_group_gen::error::Error>(())
//! ```

pub mod artifact;
pub mod codegen;
pub mod error;
pub mod naming;
pub mod render;
pub mod schema;
pub mod sink;
