//! Typed task endpoints layered over the request wrapper.
//!
//! All task traffic is bearer-decorated; every method here opts in through
//! `RequestOptions::authenticated()`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskPriority, TaskStatus};

use super::{ApiClient, ApiError, RequestOptions};

/// Path of the task collection, and where the create form lands afterwards
const TASKS_PATH: &str = "/tasks";

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Partial update for `PATCH /tasks/{uuid}`; absent fields stay untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl ApiClient {
    /// Fetch the caller's tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let value: serde_json::Value = self
            .get(TASKS_PATH, &RequestOptions::authenticated())
            .await?;
        parse_task_list(value)
    }

    pub async fn fetch_task(&self, uuid: &str) -> Result<Task, ApiError> {
        self.get(
            &format!("{}/{}", TASKS_PATH, uuid),
            &RequestOptions::authenticated(),
        )
        .await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.post(TASKS_PATH, task, &RequestOptions::authenticated())
            .await
    }

    /// Create a task and, on success, push `redirect_to` through the wired
    /// navigator - the flow behind the web client's create form, which lands
    /// back on the task list
    pub async fn create_task_with_redirect(
        &self,
        task: &NewTask,
        redirect_to: &str,
    ) -> Result<Task, ApiError> {
        self.post(
            TASKS_PATH,
            task,
            &RequestOptions::authenticated().with_redirect(redirect_to),
        )
        .await
    }

    pub async fn update_task(&self, uuid: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.patch(
            &format!("{}/{}", TASKS_PATH, uuid),
            update,
            &RequestOptions::authenticated(),
        )
        .await
    }

    pub async fn delete_task(&self, uuid: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .delete(
                &format!("{}/{}", TASKS_PATH, uuid),
                &RequestOptions::authenticated(),
            )
            .await?;
        Ok(())
    }
}

/// Accept both a bare array and the `{"data": [...]}` wrapper the backend
/// uses when the list goes through a resource collection
fn parse_task_list(value: serde_json::Value) -> Result<Vec<Task>, ApiError> {
    if let Ok(tasks) = serde_json::from_value::<Vec<Task>>(value.clone()) {
        return Ok(tasks);
    }

    #[derive(Deserialize)]
    struct TasksWrapper {
        #[serde(default)]
        data: Vec<Task>,
    }

    let wrapper: TasksWrapper = serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse task list: {}", e)))?;
    Ok(wrapper.data)
}
