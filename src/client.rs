use std::path::PathBuf;

use thiserror::Error;

use crate::models::{GoalDetailsPayload, PayloadError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no goal named {0:?} for this user")]
    NotFound(String),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("failed to read goal payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("goal backend query failed: {0}")]
    Backend(#[from] sqlx::Error),
}

/// The fetch collaborator. Resolves a goal name to its status payload
/// or fails; no retries happen at this layer.
pub trait GoalService {
    async fn get_goal_details(&self, goal_name: &str) -> Result<GoalDetailsPayload, ServiceError>;
}

/// Serves a payload previously saved with `show --json`, standing in
/// for the network backend.
pub struct FileGoalService {
    path: PathBuf,
}

impl FileGoalService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl GoalService for FileGoalService {
    async fn get_goal_details(&self, goal_name: &str) -> Result<GoalDetailsPayload, ServiceError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let payload = GoalDetailsPayload::from_json(&raw)?;
        if payload.goal_name != goal_name {
            return Err(ServiceError::NotFound(goal_name.to_string()));
        }
        Ok(payload)
    }
}
