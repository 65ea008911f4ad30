//! Rust source rendering of a [`GroupManagerArtifact`].
//!
//! The emitted module targets the group runtime (`crate::group`), which
//! provides `FixGroupMgr`, `FixRepeatingGroup`, and the `GroupManager` trait.
//! Each group class is a singleton: `get_instance` hides a function-local
//! `OnceLock`, so concurrent first calls construct the group exactly once.
//!
//! Rendering is a pure function of the artifact, so identical input always
//! produces byte-identical output.

use std::fmt;

use crate::artifact::{GroupClass, GroupManagerArtifact, Registration};

/// File extension of rendered artifacts.
pub const EXTENSION: &str = "rs";

/// Render `artifact` as a Rust module.
pub fn render(artifact: &GroupManagerArtifact) -> String {
    RustSource(artifact).to_string()
}

/// [`fmt::Display`] adapter writing an artifact as Rust source.
pub struct RustSource<'a>(pub &'a GroupManagerArtifact);

impl fmt::Display for RustSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artifact = self.0;
        write_preamble(f, artifact)?;
        write_manager(f, artifact)?;
        for group in &artifact.groups {
            writeln!(f)?;
            write_group_class(f, group)?;
        }
        Ok(())
    }
}

fn write_preamble(f: &mut fmt::Formatter<'_>, artifact: &GroupManagerArtifact) -> fmt::Result {
    writeln!(
        f,
        "//! Repeating-group manager for FIX {} message type `{}`.",
        artifact.version, artifact.msg_type
    )?;
    writeln!(f, "//!")?;
    writeln!(f, "//! Namespace: `{}`", artifact.namespace)?;
    writeln!(f, "//!")?;
    writeln!(
        f,
        "//! This file is auto-generated. It should never be coded by hand. Regenerate"
    )?;
    writeln!(f, "//! it with `fix-group-gen` instead.")?;
    writeln!(f)?;
    writeln!(f, "#![allow(non_camel_case_types)]")?;
    writeln!(f)?;
    writeln!(f, "use std::sync::OnceLock;")?;
    writeln!(f)?;
    writeln!(
        f,
        "use crate::group::{{FixGroupMgr, FixRepeatingGroup, GroupManager}};"
    )?;
    writeln!(f)
}

fn write_manager(f: &mut fmt::Formatter<'_>, artifact: &GroupManagerArtifact) -> fmt::Result {
    let name = &artifact.manager_type;

    writeln!(
        f,
        "/// Group manager for message type `{}`.",
        artifact.msg_type
    )?;
    writeln!(f, "pub struct {name} {{")?;
    writeln!(f, "    mgr: FixGroupMgr,")?;
    writeln!(f, "}}")?;
    writeln!(f)?;
    writeln!(f, "impl {name} {{")?;
    writeln!(f, "    pub fn new() -> Self {{")?;
    writeln!(f, "        let mut mgr = FixGroupMgr::new();")?;
    for registration in &artifact.registrations {
        write_registration(f, registration)?;
    }
    writeln!(f, "        Self {{ mgr }}")?;
    writeln!(f, "    }}")?;
    writeln!(f, "}}")?;
    writeln!(f)?;
    writeln!(f, "impl Default for {name} {{")?;
    writeln!(f, "    fn default() -> Self {{")?;
    writeln!(f, "        Self::new()")?;
    writeln!(f, "    }}")?;
    writeln!(f, "}}")?;
    writeln!(f)?;
    writeln!(f, "impl GroupManager for {name} {{")?;
    writeln!(f, "    fn group_mgr(&self) -> &FixGroupMgr {{")?;
    writeln!(f, "        &self.mgr")?;
    writeln!(f, "    }}")?;
    writeln!(f, "}}")
}

fn write_registration(f: &mut fmt::Formatter<'_>, registration: &Registration) -> fmt::Result {
    let Registration {
        group_id,
        delimiter,
        class_name,
    } = registration;
    writeln!(
        f,
        "        mgr.put_group(\"{group_id}\", {class_name}::get_instance(\"{group_id}\", \"{delimiter}\"));"
    )
}

fn write_group_class(f: &mut fmt::Formatter<'_>, group: &GroupClass) -> fmt::Result {
    let name = &group.class_name;

    writeln!(
        f,
        "/// Repeating group {} (delimiter {}).",
        group.group_id, group.delimiter
    )?;
    writeln!(f, "pub struct {name}(FixRepeatingGroup);")?;
    writeln!(f)?;
    writeln!(f, "impl {name} {{")?;
    writeln!(
        f,
        "    fn get_instance(id: &str, delim: &str) -> &'static FixRepeatingGroup {{"
    )?;
    writeln!(
        f,
        "        static INSTANCE: OnceLock<{name}> = OnceLock::new();"
    )?;
    writeln!(f, "        &INSTANCE.get_or_init(|| Self::new(id, delim)).0")?;
    writeln!(f, "    }}")?;
    writeln!(f)?;
    writeln!(f, "    fn new(id: &str, delim: &str) -> Self {{")?;
    if group.members.is_empty() {
        writeln!(f, "        Self(FixRepeatingGroup::new(id, delim))")?;
    } else {
        writeln!(f, "        let mut group = FixRepeatingGroup::new(id, delim);")?;
        for member in &group.members {
            writeln!(f, "        group.add_member(\"{member}\");")?;
        }
        writeln!(f, "        Self(group)")?;
    }
    writeln!(f, "    }}")?;
    writeln!(f, "}}")
}
