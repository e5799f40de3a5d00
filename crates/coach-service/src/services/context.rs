//! Service context - dependency container for services

use std::sync::Arc;

use coach_common::JwtService;
use coach_core::traits::{RelationshipRepository, TrainingRepository, UserRepository};
use coach_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Repositories, token service and id generator shared by every service
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    relationship_repo: Arc<dyn RelationshipRepository>,
    training_repo: Arc<dyn TrainingRepository>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        relationship_repo: Arc<dyn RelationshipRepository>,
        training_repo: Arc<dyn TrainingRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            relationship_repo,
            training_repo,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn relationship_repo(&self) -> &dyn RelationshipRepository {
        self.relationship_repo.as_ref()
    }

    pub fn training_repo(&self) -> &dyn TrainingRepository {
        self.training_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating a ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    relationship_repo: Option<Arc<dyn RelationshipRepository>>,
    training_repo: Option<Arc<dyn TrainingRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn relationship_repo(mut self, repo: Arc<dyn RelationshipRepository>) -> Self {
        self.relationship_repo = Some(repo);
        self
    }

    pub fn training_repo(mut self, repo: Arc<dyn TrainingRepository>) -> Self {
        self.training_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a repository or the JWT service is missing.
    /// The id generator defaults to worker 0.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T: ?Sized>(value: Option<Arc<T>>, name: &str) -> ServiceResult<Arc<T>> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.user_repo, "user_repo")?,
            required(self.relationship_repo, "relationship_repo")?,
            required(self.training_repo, "training_repo")?,
            required(self.jwt_service, "jwt_service")?,
            self.snowflake_generator.unwrap_or_default(),
        ))
    }
}
