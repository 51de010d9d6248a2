/*
[INPUT]:  Task names
[OUTPUT]: Task listings, task status snapshots, stop confirmations
[POS]:    HTTP layer - task endpoints
[UPDATE]: When adding new task endpoints or changing response format
*/

use crate::http::{InterceptorClient, Result};
use crate::types::{TaskListResponse, TaskStatus, TaskSummary};
use reqwest::Method;

impl InterceptorClient {
    /// List known tasks
    ///
    /// GET /tasks
    pub async fn list_tasks(&self) -> Result<Vec<TaskSummary>> {
        let builder = self.request(Method::GET, &["tasks"])?;
        let response: TaskListResponse = self.send_json(builder).await?;
        Ok(response.tasks)
    }

    /// Fetch a task's status and output
    ///
    /// GET /tasks/{name}
    pub async fn get_task(&self, name: &str) -> Result<TaskStatus> {
        let builder = self.request(Method::GET, &["tasks", name])?;
        self.send_json(builder).await
    }

    /// Ask the service to stop a task
    ///
    /// POST /tasks/{name}/stop
    pub async fn stop_task(&self, name: &str) -> Result<()> {
        let builder = self.request(Method::POST, &["tasks", name, "stop"])?;
        self.send_empty(builder).await
    }
}
