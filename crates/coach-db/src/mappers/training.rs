//! Training model -> entity

use coach_core::entities::Training;
use coach_core::traits::RunnerTraining;
use coach_core::value_objects::Snowflake;

use crate::models::{RunnerTrainingModel, TrainingModel};

impl From<TrainingModel> for Training {
    fn from(model: TrainingModel) -> Self {
        Training {
            id: Some(Snowflake::new(model.id)),
            relation_id: Snowflake::new(model.relationship_id),
            date: model.date,
            description: model.description,
            execution: model.execution,
            visible_since: model.visible_since,
        }
    }
}

impl From<RunnerTrainingModel> for RunnerTraining {
    fn from(model: RunnerTrainingModel) -> Self {
        RunnerTraining {
            runner_id: Snowflake::new(model.runner_id),
            coach_id: Snowflake::new(model.coach_id),
            training: model.training.into(),
        }
    }
}
