//! Personal roster: the services a person is scheduled for.

use serde::Serialize;
use tracing::debug;

use crate::date_range::DateRange;
use crate::directory::{Directory, RoleDefinition};
use crate::error::RotaResult;
use crate::records::Assignment;
use crate::recurrence::{Instance, expand_with_overrides};
use crate::store::ForkStore;

/// One assignment of a person on one dated instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Duty {
    pub instance: Instance,
    pub assignment: Assignment,
    /// Role with its checklist, when the assignment names a known role
    pub role: Option<RoleDefinition>,
}

/// Duties of `person_id` within `range`, in instance order.
///
/// Each date is read from its fork when one exists, otherwise from the template.
pub fn roster_for(
    person_id: &str,
    directory: &Directory,
    store: &ForkStore,
    range: &DateRange,
) -> RotaResult<Vec<Duty>> {
    let instances = expand_with_overrides(directory.events(), range, store)?;
    let mut duties = Vec::new();

    for instance in instances {
        let data = store.resolve_for_date(&instance.event_id, Some(instance.date));

        for assignment in data.assignments {
            if assignment.person_id.as_deref() != Some(person_id) {
                continue;
            }
            let role = assignment
                .role_id
                .as_deref()
                .and_then(|id| directory.role(id))
                .cloned();

            duties.push(Duty {
                instance: instance.clone(),
                assignment,
                role,
            });
        }
    }

    debug!(person_id, duties = duties.len(), "Built roster");
    Ok(duties)
}
