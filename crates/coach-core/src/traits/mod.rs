//! Repository ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    PageRequest, RelationshipRepository, RepoResult, RunnerTraining, TrainingRepository,
    UserRepository,
};
