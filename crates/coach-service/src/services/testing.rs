//! In-memory repositories for service tests
//!
//! One store backs all three repository traits so that cross-table queries
//! (roster ordering, runner joins, cascades) behave like the PostgreSQL ones.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use coach_common::JwtService;
use coach_core::traits::{
    PageRequest, RelationshipRepository, RepoResult, RunnerTraining, TrainingRepository,
    UserRepository,
};
use coach_core::{
    DomainError, RelationStatus, Relationship, Role, Snowflake, SnowflakeGenerator, Training, User,
};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct Tables {
    users: Vec<(User, String)>,
    relationships: Vec<Relationship>,
    trainings: Vec<Training>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.tables.lock().unwrap())
    }

    pub fn trainings(&self) -> Vec<Training> {
        self.with(|t| t.trainings.clone())
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        self.with(|t| t.relationships.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone())))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.with(|t| {
            t.users
                .iter()
                .find(|(u, _)| u.username == username)
                .map(|(u, _)| u.clone())
        }))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.with(|t| t.users.iter().any(|(u, _)| u.username == username)))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.with(|t| t.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(email))))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.with(|t| {
            if t.users.iter().any(|(u, _)| u.username == user.username) {
                return Err(DomainError::UsernameTaken);
            }
            if t.users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(DomainError::EmailTaken);
            }
            t.users.push((user.clone(), password_hash.to_string()));
            Ok(())
        })
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.with(|t| t.users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone())))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.with(|t| {
            let before = t.users.len();
            t.users.retain(|(u, _)| u.id != id);
            if t.users.len() == before {
                return Err(DomainError::UserNotFound(id.to_string()));
            }
            let gone: Vec<Snowflake> = t
                .relationships
                .iter()
                .filter(|r| r.coach_id == id || r.runner_id == id)
                .map(|r| r.id)
                .collect();
            t.relationships.retain(|r| !gone.contains(&r.id));
            t.trainings.retain(|tr| !gone.contains(&tr.relation_id));
            Ok(())
        })
    }
}

#[async_trait]
impl RelationshipRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Relationship>> {
        Ok(self.with(|t| t.relationships.iter().find(|r| r.id == id).cloned()))
    }

    async fn find_by_pair(
        &self,
        coach_id: Snowflake,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        Ok(self.with(|t| {
            t.relationships
                .iter()
                .find(|r| r.coach_id == coach_id && r.runner_id == runner_id)
                .cloned()
        }))
    }

    async fn list_by_coach(
        &self,
        coach_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Vec<Relationship>> {
        Ok(self.with(|t| {
            let username = |id: Snowflake| {
                t.users
                    .iter()
                    .find(|(u, _)| u.id == id)
                    .map(|(u, _)| u.username.clone())
                    .unwrap_or_default()
            };
            let mut roster: Vec<Relationship> = t
                .relationships
                .iter()
                .filter(|r| r.coach_id == coach_id && r.status != RelationStatus::InvitedByRunner)
                .cloned()
                .collect();
            roster.sort_by_key(|r| username(r.runner_id));
            roster
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect()
        }))
    }

    async fn count_by_coach(&self, coach_id: Snowflake) -> RepoResult<i64> {
        Ok(self.with(|t| {
            t.relationships
                .iter()
                .filter(|r| r.coach_id == coach_id && r.status != RelationStatus::InvitedByRunner)
                .count() as i64
        }))
    }

    async fn list_by_runner(&self, runner_id: Snowflake) -> RepoResult<Vec<Relationship>> {
        Ok(self.with(|t| {
            t.relationships
                .iter()
                .filter(|r| r.runner_id == runner_id)
                .cloned()
                .collect()
        }))
    }

    async fn find_established_for_runner(
        &self,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        Ok(self.with(|t| {
            t.relationships
                .iter()
                .find(|r| r.runner_id == runner_id && r.is_established())
                .cloned()
        }))
    }

    async fn nickname_taken(
        &self,
        coach_id: Snowflake,
        nickname: &str,
        except: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self.with(|t| {
            t.relationships.iter().any(|r| {
                r.coach_id == coach_id && r.id != except && r.nickname.as_deref() == Some(nickname)
            })
        }))
    }

    async fn create(&self, relationship: &Relationship) -> RepoResult<()> {
        self.with(|t| {
            let duplicate = t.relationships.iter().any(|r| {
                r.coach_id == relationship.coach_id && r.runner_id == relationship.runner_id
            });
            if duplicate {
                return Err(DomainError::RelationshipExists);
            }
            t.relationships.push(relationship.clone());
            Ok(())
        })
    }

    async fn update(&self, relationship: &Relationship) -> RepoResult<()> {
        self.with(|t| {
            let clash = relationship.nickname.is_some()
                && t.relationships.iter().any(|r| {
                    r.id != relationship.id
                        && r.coach_id == relationship.coach_id
                        && r.nickname == relationship.nickname
                });
            if clash {
                return Err(DomainError::NicknameTaken);
            }
            let slot = t
                .relationships
                .iter_mut()
                .find(|r| r.id == relationship.id)
                .ok_or(DomainError::RelationshipNotFound)?;
            slot.status = relationship.status;
            slot.nickname.clone_from(&relationship.nickname);
            Ok(())
        })
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.with(|t| {
            let before = t.relationships.len();
            t.relationships.retain(|r| r.id != id);
            if t.relationships.len() == before {
                return Err(DomainError::RelationshipNotFound);
            }
            t.trainings.retain(|tr| tr.relation_id != id);
            Ok(())
        })
    }
}

#[async_trait]
impl TrainingRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Training>> {
        Ok(self.with(|t| t.trainings.iter().find(|tr| tr.id == Some(id)).cloned()))
    }

    async fn find_by_relation_and_date(
        &self,
        relation_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Option<Training>> {
        Ok(self.with(|t| {
            t.trainings
                .iter()
                .find(|tr| tr.relation_id == relation_id && tr.date == date)
                .cloned()
        }))
    }

    async fn find_in_range(
        &self,
        relation_id: Snowflake,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<Vec<Training>> {
        Ok(self.with(|t| {
            let mut rows: Vec<Training> = t
                .trainings
                .iter()
                .filter(|tr| tr.relation_id == relation_id)
                .filter(|tr| start.is_none_or(|s| tr.date >= s))
                .filter(|tr| end.is_none_or(|e| tr.date <= e))
                .cloned()
                .collect();
            rows.sort_by_key(|tr| tr.date);
            rows
        }))
    }

    async fn find_for_runners_on_date(
        &self,
        runner_ids: &[Snowflake],
        date: NaiveDate,
    ) -> RepoResult<Vec<RunnerTraining>> {
        Ok(self.with(|t| {
            t.trainings
                .iter()
                .filter(|tr| tr.date == date)
                .filter_map(|tr| {
                    let rel = t.relationships.iter().find(|r| r.id == tr.relation_id)?;
                    runner_ids.contains(&rel.runner_id).then(|| RunnerTraining {
                        runner_id: rel.runner_id,
                        coach_id: rel.coach_id,
                        training: tr.clone(),
                    })
                })
                .collect()
        }))
    }

    async fn create(&self, training: &Training) -> RepoResult<()> {
        self.with(|t| {
            if training.id.is_none() {
                return Err(DomainError::InternalError("cannot insert a placeholder training".into()));
            }
            let duplicate = t
                .trainings
                .iter()
                .any(|tr| tr.relation_id == training.relation_id && tr.date == training.date);
            if duplicate {
                return Err(DomainError::TrainingExists);
            }
            t.trainings.push(training.clone());
            Ok(())
        })
    }

    async fn update(&self, training: &Training) -> RepoResult<()> {
        self.with(|t| {
            let slot = t
                .trainings
                .iter_mut()
                .find(|tr| tr.id.is_some() && tr.id == training.id)
                .ok_or(DomainError::TrainingNotFound)?;
            slot.description.clone_from(&training.description);
            slot.execution.clone_from(&training.execution);
            slot.visible_since = training.visible_since;
            Ok(())
        })
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.with(|t| {
            let before = t.trainings.len();
            t.trainings.retain(|tr| tr.id != Some(id));
            if t.trainings.len() == before {
                return Err(DomainError::TrainingNotFound);
            }
            Ok(())
        })
    }
}

/// A service context over a fresh in-memory store
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub ctx: ServiceContext,
    ids: SnowflakeGenerator,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .relationship_repo(store.clone())
            .training_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 86_400)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();
        Self {
            store,
            ctx,
            ids: SnowflakeGenerator::new(2),
        }
    }

    pub async fn user(&self, username: &str, role: Role) -> User {
        let user = User::new(
            self.ids.generate(),
            username.to_string(),
            format!("{username}@example.com"),
            role,
        );
        UserRepository::create(self.store.as_ref(), &user, "hash").await.unwrap();
        user
    }

    pub async fn relationship(&self, coach: &User, runner: &User, status: RelationStatus) -> Relationship {
        let mut rel = Relationship::invite(self.ids.generate(), coach.id, runner.id);
        rel.status = status;
        RelationshipRepository::create(self.store.as_ref(), &rel).await.unwrap();
        rel
    }

    pub async fn training(&self, rel: &Relationship, date: NaiveDate, description: &str) -> Training {
        let training = Training::new(self.ids.generate(), rel.id, date, description.to_string());
        TrainingRepository::create(self.store.as_ref(), &training).await.unwrap();
        training
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
