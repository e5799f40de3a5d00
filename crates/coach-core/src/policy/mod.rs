//! Access policy - pure predicates deciding who may act on what
//!
//! Callers decide how a failed predicate is reported: role checks surface as
//! forbidden, ownership checks on lookups surface as not found.

use chrono::NaiveDate;

use crate::entities::{Relationship, Training, User};
use crate::schedule::today;

/// A resource guarded by the policy
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Relationship(&'a Relationship),
    Training {
        training: &'a Training,
        relationship: &'a Relationship,
    },
}

impl<'a> Resource<'a> {
    pub fn relationship(&self) -> &'a Relationship {
        match *self {
            Self::Relationship(rel) | Self::Training { relationship: rel, .. } => rel,
        }
    }

    /// A training paired with a relationship it does not belong to is never accessible
    fn is_consistent(&self) -> bool {
        match self {
            Self::Relationship(_) => true,
            Self::Training {
                training,
                relationship,
            } => training.relation_id == relationship.id,
        }
    }
}

impl<'a> From<&'a Relationship> for Resource<'a> {
    fn from(rel: &'a Relationship) -> Self {
        Self::Relationship(rel)
    }
}

pub fn is_coach(user: &User) -> bool {
    user.is_coach()
}

pub fn is_runner(user: &User) -> bool {
    user.is_runner()
}

/// The resource's relationship is coached by `user`
pub fn owns_as_coach(user: &User, resource: Resource<'_>) -> bool {
    resource.is_consistent() && resource.relationship().coach_id == user.id
}

/// `user` has no established relationship as a runner.
///
/// `relationships` are the relationships in which the user is the runner.
pub fn lacks_coach(user: &User, relationships: &[Relationship]) -> bool {
    !relationships
        .iter()
        .any(|rel| rel.runner_id == user.id && rel.is_established())
}

pub fn can_view(user: &User, resource: Resource<'_>) -> bool {
    can_view_on(user, resource, today())
}

/// Owning coach always; the runner only through an established relationship and,
/// for trainings, once `visible_since` has passed
pub fn can_view_on(user: &User, resource: Resource<'_>, today: NaiveDate) -> bool {
    if owns_as_coach(user, resource) {
        return true;
    }
    let rel = resource.relationship();
    if !resource.is_consistent() || rel.runner_id != user.id || !rel.is_established() {
        return false;
    }
    match resource {
        Resource::Relationship(_) => true,
        Resource::Training { training, .. } => training.is_visible_on(today),
    }
}

/// Only the owning coach modifies. Trainings additionally need an established relationship.
pub fn can_modify(user: &User, resource: Resource<'_>) -> bool {
    if !owns_as_coach(user, resource) {
        return false;
    }
    match resource {
        Resource::Relationship(_) => true,
        Resource::Training { relationship, .. } => relationship.is_established(),
    }
}

/// The runner may write the execution report of a training they can see
pub fn can_report_execution(user: &User, training: &Training, relationship: &Relationship) -> bool {
    can_report_execution_on(user, training, relationship, today())
}

pub fn can_report_execution_on(
    user: &User,
    training: &Training,
    relationship: &Relationship,
    today: NaiveDate,
) -> bool {
    relationship.runner_id == user.id
        && can_view_on(
            user,
            Resource::Training {
                training,
                relationship,
            },
            today,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RelationStatus;
    use crate::value_objects::{Role, Snowflake};

    fn user(id: i64, role: Role) -> User {
        User::new(
            Snowflake::new(id),
            format!("user{id}"),
            format!("user{id}@users.com"),
            role,
        )
    }

    fn relationship(coach: &User, runner: &User, status: RelationStatus) -> Relationship {
        let mut rel = Relationship::invite(Snowflake::new(100), coach.id, runner.id);
        rel.status = status;
        rel
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_role_predicates() {
        let coach = user(1, Role::Coach);
        let runner = user(2, Role::Runner);
        assert!(is_coach(&coach) && !is_runner(&coach));
        assert!(is_runner(&runner) && !is_coach(&runner));
    }

    #[test]
    fn test_owns_as_coach() {
        let coach = user(1, Role::Coach);
        let other = user(3, Role::Coach);
        let runner = user(2, Role::Runner);
        let rel = relationship(&coach, &runner, RelationStatus::Established);
        let training = Training::new(Snowflake::new(9), rel.id, date(2024, 3, 4), "x".into());

        assert!(owns_as_coach(&coach, (&rel).into()));
        assert!(!owns_as_coach(&other, (&rel).into()));
        assert!(!owns_as_coach(&runner, (&rel).into()));
        assert!(owns_as_coach(
            &coach,
            Resource::Training {
                training: &training,
                relationship: &rel
            }
        ));

        let foreign = Training::new(Snowflake::new(9), Snowflake::new(555), training.date, "x".into());
        assert!(!owns_as_coach(
            &coach,
            Resource::Training {
                training: &foreign,
                relationship: &rel
            }
        ));
    }

    #[test]
    fn test_lacks_coach() {
        let coach = user(1, Role::Coach);
        let runner = user(2, Role::Runner);
        assert!(lacks_coach(&runner, &[]));

        let invited = relationship(&coach, &runner, RelationStatus::InvitedByCoach);
        let revoked = relationship(&coach, &runner, RelationStatus::Revoked);
        assert!(lacks_coach(&runner, &[invited.clone(), revoked]));

        let established = relationship(&coach, &runner, RelationStatus::Established);
        assert!(!lacks_coach(&runner, &[invited, established]));
    }

    #[test]
    fn test_runner_view_requires_established_and_visible() {
        let coach = user(1, Role::Coach);
        let runner = user(2, Role::Runner);
        let today = date(2024, 3, 6);

        let pending = relationship(&coach, &runner, RelationStatus::InvitedByCoach);
        assert!(!can_view_on(&runner, (&pending).into(), today));
        assert!(can_view_on(&coach, (&pending).into(), today));

        let rel = relationship(&coach, &runner, RelationStatus::Established);
        let mut training = Training::new(Snowflake::new(9), rel.id, date(2024, 3, 8), "x".into());
        training.visible_since = Some(date(2024, 3, 7));
        let resource = Resource::Training {
            training: &training,
            relationship: &rel,
        };
        assert!(!can_view_on(&runner, resource, today));
        assert!(can_view_on(&runner, resource, date(2024, 3, 7)));
        assert!(can_view_on(&coach, resource, today));
        assert!(!can_view_on(&user(3, Role::Runner), resource, date(2024, 3, 7)));
    }

    #[test]
    fn test_only_owning_coach_modifies() {
        let coach = user(1, Role::Coach);
        let runner = user(2, Role::Runner);
        let rel = relationship(&coach, &runner, RelationStatus::Established);
        let training = Training::new(Snowflake::new(9), rel.id, date(2024, 3, 4), "x".into());
        let resource = Resource::Training {
            training: &training,
            relationship: &rel,
        };

        assert!(can_modify(&coach, resource));
        assert!(!can_modify(&runner, resource));
        assert!(!can_modify(&user(3, Role::Coach), resource));

        let revoked = relationship(&coach, &runner, RelationStatus::Revoked);
        assert!(can_modify(&coach, (&revoked).into()));
        assert!(!can_modify(
            &coach,
            Resource::Training {
                training: &Training::new(Snowflake::new(9), revoked.id, training.date, "x".into()),
                relationship: &revoked
            }
        ));
    }

    #[test]
    fn test_execution_report() {
        let coach = user(1, Role::Coach);
        let runner = user(2, Role::Runner);
        let rel = relationship(&coach, &runner, RelationStatus::Established);
        let training = Training::new(Snowflake::new(9), rel.id, date(2024, 3, 4), "x".into());
        let today = date(2024, 3, 4);

        assert!(can_report_execution_on(&runner, &training, &rel, today));
        assert!(!can_report_execution_on(&coach, &training, &rel, today));
    }
}
