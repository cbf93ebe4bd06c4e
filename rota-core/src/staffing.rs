//! Default staffing: fill a group's roles with available members.

use tracing::{info, warn};

use crate::activity::Mutation;
use crate::directory::{Directory, RoleDefinition};
use crate::error::RotaResult;
use crate::records::NewAssignment;
use crate::store::ForkStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillOptions {
    /// Advisory; only `overwrite_filled` decides whether a filled role is touched
    pub fill_only_empty: bool,
    pub overwrite_filled: bool,
}

/// What a fill run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    pub mutations: Vec<Mutation>,
    /// Roles left alone because they already had an assignment
    pub skipped_roles: Vec<String>,
    /// Roles that needed someone but the group had no available member
    pub unstaffed_roles: Vec<String>,
}

impl ForkStore {
    /// Assign a member of `group_id` to each of the group's roles for `event_id`,
    /// in the template or in the given fork.
    ///
    /// A role that already has an assignment in the same set is skipped unless
    /// `overwrite_filled` is set, in which case a new assignment is added
    /// alongside the existing one.
    pub fn fill_defaults(
        &mut self,
        directory: &Directory,
        event_id: &str,
        group_id: &str,
        options: FillOptions,
        occurrence_id: Option<&str>,
    ) -> RotaResult<FillReport> {
        let scope = self.scope_for(event_id, occurrence_id)?;
        let existing = self.assignments_for(event_id, &scope);
        let roles: Vec<&RoleDefinition> = directory.roles_for_group(group_id).collect();

        let mut report = FillReport::default();

        for role in roles {
            let filled = existing
                .iter()
                .any(|a| a.role_id.as_deref() == Some(role.id.as_str()));

            if filled && !options.overwrite_filled {
                report.skipped_roles.push(role.id.clone());
                continue;
            }

            let Some(member) = directory.first_available_member(group_id) else {
                warn!(group_id, role_id = %role.id, "No available member to fill role");
                report.unstaffed_roles.push(role.id.clone());
                continue;
            };

            let assignment = NewAssignment::new(event_id, group_id)
                .role(&role.id)
                .person(&member.person_id);
            report
                .mutations
                .push(self.insert_assignment(assignment, occurrence_id)?);
        }

        info!(
            event_id,
            group_id,
            occurrence_id = ?occurrence_id,
            filled = report.mutations.len(),
            skipped = report.skipped_roles.len(),
            unstaffed = report.unstaffed_roles.len(),
            "Filled default staffing"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MembershipRole;
    use crate::error::RotaError;
    use crate::records::Scope;
    use crate::store::fixtures::{EVENT, date};

    fn role(id: &str, group_id: &str) -> RoleDefinition {
        RoleDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            group_id: group_id.to_string(),
            tasks: Vec::new(),
        }
    }

    fn directory() -> Directory {
        let mut directory = Directory::default();
        directory.add_member("g-tech", "p-lead", MembershipRole::Leader);
        directory.add_member("g-tech", "p-sam", MembershipRole::Member);
        directory.insert_role(role("rd-sound", "g-tech"));
        directory.insert_role(role("rd-video", "g-tech"));
        directory.insert_role(role("rd-keys", "g-music"));
        directory
    }

    fn only_empty() -> FillOptions {
        FillOptions {
            fill_only_empty: true,
            overwrite_filled: false,
        }
    }

    #[test_log::test]
    fn test_fill_assigns_every_role_of_the_group() {
        let mut store = ForkStore::new();
        let report = store
            .fill_defaults(&directory(), EVENT, "g-tech", only_empty(), None)
            .unwrap();

        assert_eq!(report.mutations.len(), 2);
        let assignments = store.assignments_for(EVENT, &Scope::Template);
        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().all(|a| a.person_id.as_deref() == Some("p-sam")));
        assert!(assignments.iter().all(|a| a.group_id == "g-tech"));
    }

    #[test]
    fn test_fill_only_empty_keeps_existing_assignments() {
        let mut store = ForkStore::new();
        store
            .insert_assignment(
                NewAssignment::new(EVENT, "g-tech").role("rd-sound").person("p-guest"),
                None,
            )
            .unwrap();
        let before = store.assignments_for(EVENT, &Scope::Template);

        let report = store
            .fill_defaults(&directory(), EVENT, "g-tech", only_empty(), None)
            .unwrap();

        assert_eq!(report.skipped_roles, vec!["rd-sound".to_string()]);
        let after = store.assignments_for(EVENT, &Scope::Template);
        assert!(after.contains(&before[0]));
        let sound: Vec<_> = after
            .iter()
            .filter(|a| a.role_id.as_deref() == Some("rd-sound"))
            .collect();
        assert_eq!(sound.len(), 1);
        assert_eq!(sound[0].person_id.as_deref(), Some("p-guest"));
    }

    #[test]
    fn test_overwrite_creates_assignment_for_every_role() {
        let mut store = ForkStore::new();
        store
            .insert_assignment(
                NewAssignment::new(EVENT, "g-tech").role("rd-sound").person("p-guest"),
                None,
            )
            .unwrap();

        let options = FillOptions {
            fill_only_empty: true,
            overwrite_filled: true,
        };
        let report = store
            .fill_defaults(&directory(), EVENT, "g-tech", options, None)
            .unwrap();

        assert_eq!(report.mutations.len(), 2);
        assert!(report.skipped_roles.is_empty());
        assert_eq!(store.assignments_for(EVENT, &Scope::Template).len(), 3);
    }

    #[test]
    fn test_fill_in_fork_leaves_template_untouched() {
        let mut store = ForkStore::new();
        let occ = store.ensure_fork(EVENT, date(2025, 2, 23));

        store
            .fill_defaults(&directory(), EVENT, "g-tech", only_empty(), Some(&occ))
            .unwrap();

        assert!(store.assignments_for(EVENT, &Scope::Template).is_empty());
        let forked = store.assignments_for(EVENT, &Scope::Occurrence(occ.clone()));
        assert_eq!(forked.len(), 2);
        assert!(forked.iter().all(|a| a.origin_id.is_none()));
    }

    #[test_log::test]
    fn test_group_without_members_reports_unstaffed_roles() {
        let mut store = ForkStore::new();
        let report = store
            .fill_defaults(&directory(), EVENT, "g-music", only_empty(), None)
            .unwrap();

        assert!(report.mutations.is_empty());
        assert_eq!(report.unstaffed_roles, vec!["rd-keys".to_string()]);
    }

    #[test]
    fn test_fill_into_unknown_fork_fails_without_writes() {
        let mut store = ForkStore::new();
        let result = store.fill_defaults(&directory(), EVENT, "g-tech", only_empty(), Some("nope"));

        assert!(matches!(result, Err(RotaError::OccurrenceNotFound(_))));
        assert!(store.assignments().is_empty());
    }
}
