//! Naming policy for generated identifiers and artifact files.
//!
//! A downstream runtime locates group managers and group singletons by name,
//! so these rules are a compatibility contract:
//!
//! | Item | Pattern | Example (FIX 4.4, MsgType `D`) |
//! |------|---------|--------------------------------|
//! | hash tag | `{msgType}_{hash(msgType)}` | `D_68` |
//! | header group | `Header_Group_{groupId}` | `Header_Group_627` |
//! | native group | `Msg_{hashTag}_Group_{groupId}` | `Msg_D_68_Group_78` |
//! | artifact stem | `{compactVersion}_{hashTag}_GroupMgr` | `44_D_68_GroupMgr` |
//! | manager type | `Fix{artifactStem}` | `Fix44_D_68_GroupMgr` |
//! | namespace | `{version lowercased}.auto.group` | `4.4.auto.group` |
//!
//! `hash` is the Java `String.hashCode` of the message type, so names match
//! those produced by the JVM tooling for the same dictionary.

/// Java `String.hashCode`: `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 code
/// units with wrapping 32-bit arithmetic.
pub fn java_string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Collision-resistant tag for a message type: `{msgType}_{hash}`.
///
/// Negative hashes keep their sign (`-`), exactly as the JVM prints them.
pub fn msg_hash_tag(msg_type: &str) -> String {
    format!("{msg_type}_{}", java_string_hash(msg_type))
}

/// Class name of a group declared by the standard header.
///
/// Identical in every artifact, independent of message type.
pub fn header_group_class_name(group_id: &str) -> String {
    format!("Header_Group_{group_id}")
}

/// Class name of a group native to one message type.
pub fn native_group_class_name(msg_type: &str, group_id: &str) -> String {
    format!("Msg_{}_Group_{group_id}", msg_hash_tag(msg_type))
}

/// FIX version with dots removed: `"4.4"` → `"44"`, `"5.0SP1"` → `"50SP1"`.
pub fn compact_version(version: &str) -> String {
    version.replace('.', "")
}

/// File stem of the artifact for `msg_type`: `44_D_68_GroupMgr`.
pub fn artifact_stem(version: &str, msg_type: &str) -> String {
    format!(
        "{}_{}_GroupMgr",
        compact_version(version),
        msg_hash_tag(msg_type)
    )
}

/// Rust type name of the group manager. A leading digit is not a valid
/// identifier start, hence the `Fix` prefix.
pub fn manager_type_name(version: &str, msg_type: &str) -> String {
    format!("Fix{}", artifact_stem(version, msg_type))
}

/// Namespace every artifact of `version` belongs to.
pub fn namespace(version: &str) -> String {
    format!("{}.auto.group", version.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_hash_matches_jvm() {
        assert_eq!(java_string_hash(""), 0);
        assert_eq!(java_string_hash("D"), 68);
        assert_eq!(java_string_hash("0"), 48);
        assert_eq!(java_string_hash("AE"), 65 * 31 + 69);
        assert_eq!(java_string_hash("HEADER"), 2_127_025_805);
        // Overflows and wraps negative on the JVM.
        assert_eq!(java_string_hash("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn hash_tag_format() {
        assert_eq!(msg_hash_tag("D"), "D_68");
        assert_eq!(msg_hash_tag("AE"), "AE_2084");
        assert_eq!(
            msg_hash_tag("polygenelubricants"),
            "polygenelubricants_-2147483648"
        );
    }

    #[test]
    fn header_names_ignore_message_type() {
        assert_eq!(header_group_class_name("627"), "Header_Group_627");
    }

    #[test]
    fn native_names_embed_hash_tag() {
        assert_eq!(native_group_class_name("D", "78"), "Msg_D_68_Group_78");
        assert_eq!(native_group_class_name("AE", "552"), "Msg_AE_2084_Group_552");
        assert_ne!(
            native_group_class_name("D", "78"),
            native_group_class_name("8", "78")
        );
    }

    #[test]
    fn version_forms() {
        assert_eq!(compact_version("4.4"), "44");
        assert_eq!(compact_version("5.0SP1"), "50SP1");
        assert_eq!(namespace("4.4"), "4.4.auto.group");
        assert_eq!(namespace("5.0SP1"), "5.0sp1.auto.group");
    }

    #[test]
    fn artifact_and_manager_names() {
        assert_eq!(artifact_stem("4.4", "D"), "44_D_68_GroupMgr");
        assert_eq!(artifact_stem("5.0SP1", "AE"), "50SP1_AE_2084_GroupMgr");
        assert_eq!(manager_type_name("4.4", "D"), "Fix44_D_68_GroupMgr");
    }
}
