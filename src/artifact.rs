//! Structured form of one group manager artifact.
//!
//! [`GroupManagerArtifact::build`] applies the naming policy and the
//! header-then-native ordering rules to the schema model. The result carries
//! no formatting; [`crate::render`] turns it into source text.

use crate::naming;
use crate::schema::{GroupMap, RepeatingGroupBuilder, RepeatingGroupBuilderMap};

/// Which group map a generated class comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    /// Declared by the standard header, shared by every message type.
    Header,
    /// Declared by the artifact's own message type.
    Native,
}

/// One `put_group` statement in the manager's initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub group_id: String,
    pub delimiter: String,
    pub class_name: String,
}

/// One singleton group class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupClass {
    pub scope: GroupScope,
    pub group_id: String,
    pub delimiter: String,
    pub class_name: String,
    /// Member field tags in declaration order.
    pub members: Vec<String>,
}

/// Everything needed to render the artifact for one message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupManagerArtifact {
    pub version: String,
    pub msg_type: String,
    pub namespace: String,
    /// File stem, also used to place the artifact on disk.
    pub artifact_name: String,
    pub manager_type: String,
    /// Header registrations first, then native ones.
    pub registrations: Vec<Registration>,
    /// Header classes first, then native ones.
    pub groups: Vec<GroupClass>,
}

impl GroupManagerArtifact {
    /// Build the artifact for `msg_type` from the version's group map.
    ///
    /// A message type without native groups yields header-only content.
    pub fn build(version: &str, msg_type: &str, group_map: &RepeatingGroupBuilderMap) -> Self {
        let header = group_map.header_groups();
        let native = group_map.groups_for(msg_type);

        let mut registrations = Vec::new();
        let mut groups = Vec::new();
        for (scope, map) in [(GroupScope::Header, header), (GroupScope::Native, native)] {
            let Some(map) = map else {
                continue;
            };
            collect_scope(&scope, msg_type, map, &mut registrations, &mut groups);
        }

        Self {
            version: version.to_string(),
            msg_type: msg_type.to_string(),
            namespace: naming::namespace(version),
            artifact_name: naming::artifact_stem(version, msg_type),
            manager_type: naming::manager_type_name(version, msg_type),
            registrations,
            groups,
        }
    }

    /// Number of group classes in `scope`.
    pub fn count(&self, scope: &GroupScope) -> usize {
        self.groups.iter().filter(|g| &g.scope == scope).count()
    }
}

fn collect_scope(
    scope: &GroupScope,
    msg_type: &str,
    map: &GroupMap,
    registrations: &mut Vec<Registration>,
    groups: &mut Vec<GroupClass>,
) {
    for group in map.values() {
        let class_name = class_name_for(scope, msg_type, group);
        registrations.push(Registration {
            group_id: group.group_id().to_string(),
            delimiter: group.delimiter().to_string(),
            class_name: class_name.clone(),
        });
        groups.push(GroupClass {
            scope: scope.clone(),
            group_id: group.group_id().to_string(),
            delimiter: group.delimiter().to_string(),
            class_name,
            members: group.members().to_vec(),
        });
    }
}

fn class_name_for(scope: &GroupScope, msg_type: &str, group: &RepeatingGroupBuilder) -> String {
    match scope {
        GroupScope::Header => naming::header_group_class_name(group.group_id()),
        GroupScope::Native => naming::native_group_class_name(msg_type, group.group_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_map() -> RepeatingGroupBuilderMap {
        let mut map = RepeatingGroupBuilderMap::new();
        map.insert(
            "HEADER",
            RepeatingGroupBuilder::new("627", "628", ["628", "629", "630"]),
        );
        map.insert(
            "D",
            RepeatingGroupBuilder::new("78", "79", ["79", "661", "736", "467", "80"]),
        );
        map.insert("D", RepeatingGroupBuilder::new("386", "336", ["336", "625"]));
        map
    }

    #[test]
    fn header_registrations_precede_native() {
        let artifact = GroupManagerArtifact::build("4.4", "D", &group_map());
        let names: Vec<_> = artifact
            .registrations
            .iter()
            .map(|r| r.class_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Header_Group_627", "Msg_D_68_Group_78", "Msg_D_68_Group_386"]
        );
        assert_eq!(artifact.registrations[1].group_id, "78");
        assert_eq!(artifact.registrations[1].delimiter, "79");
    }

    #[test]
    fn class_definitions_keep_member_order() {
        let artifact = GroupManagerArtifact::build("4.4", "D", &group_map());
        assert_eq!(artifact.count(&GroupScope::Header), 1);
        assert_eq!(artifact.count(&GroupScope::Native), 2);
        assert_eq!(artifact.groups[0].scope, GroupScope::Header);
        assert_eq!(artifact.groups[1].members, ["79", "661", "736", "467", "80"]);
    }

    #[test]
    fn message_without_groups_is_header_only() {
        let artifact = GroupManagerArtifact::build("4.4", "0", &group_map());
        assert_eq!(artifact.registrations.len(), 1);
        assert_eq!(artifact.count(&GroupScope::Native), 0);
        assert_eq!(artifact.artifact_name, "44_0_48_GroupMgr");
    }

    #[test]
    fn no_header_map_means_no_header_groups() {
        let mut map = RepeatingGroupBuilderMap::new();
        map.insert("D", RepeatingGroupBuilder::new("78", "79", ["79"]));
        let artifact = GroupManagerArtifact::build("4.2", "D", &map);
        assert_eq!(artifact.count(&GroupScope::Header), 0);
        assert_eq!(artifact.registrations.len(), 1);
        assert_eq!(artifact.namespace, "4.2.auto.group");
        assert_eq!(artifact.manager_type, "Fix42_D_68_GroupMgr");
    }

    #[test]
    fn header_classes_identical_across_messages() {
        let map = group_map();
        let d = GroupManagerArtifact::build("4.4", "D", &map);
        let heartbeat = GroupManagerArtifact::build("4.4", "0", &map);
        assert_eq!(d.groups[0], heartbeat.groups[0]);
    }
}
