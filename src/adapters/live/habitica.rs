//! Live adapter for the `RemoteTasks` port using the Habitica v3 tasks API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::error::RemoteError;
use crate::ports::tasks::{NewTask, RemoteTask, RemoteTasks, TaskFuture};

/// Default endpoint for the authenticated user's tasks.
pub const HABITICA_TASKS_URL: &str = "https://habitica.com/api/v3/tasks/user";

/// Live client for the Habitica tasks API.
pub struct HabiticaClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HabiticaClient {
    /// Creates a client for `base_url` (the user tasks endpoint).
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("x-api-user", &self.credentials.user_id)
            .header("x-api-key", &self.credentials.api_token)
    }
}

/// Request body for creating a todo.
#[derive(Serialize)]
struct CreateTodoBody<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    date: &'a str,
    priority: f64,
    notes: &'a str,
}

/// Envelope of a task list response.
#[derive(Deserialize)]
struct ListResponse {
    data: Vec<RemoteTask>,
}

fn transport(e: &reqwest::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

/// Maps anything but `expected` to a [`RemoteError::Status`].
async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<String, RemoteError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| transport(&e))?;
    if status == expected {
        Ok(body)
    } else {
        Err(RemoteError::Status { status: status.as_u16(), body })
    }
}

impl RemoteTasks for HabiticaClient {
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>> {
        Box::pin(async move {
            let response = self
                .authed(self.client.get(&self.base_url).query(&[("type", "todos")]))
                .send()
                .await
                .map_err(|e| transport(&e))?;
            let body = expect_status(response, StatusCode::OK).await?;
            let list: ListResponse =
                serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))?;
            Ok(list.data)
        })
    }

    fn create_todo(&self, task: &NewTask) -> TaskFuture<'_, ()> {
        let task = task.clone();
        Box::pin(async move {
            let body = CreateTodoBody {
                text: &task.text,
                kind: "todo",
                date: &task.date,
                priority: task.priority,
                notes: &task.notes,
            };
            let response = self
                .authed(self.client.post(&self.base_url))
                .json(&body)
                .send()
                .await
                .map_err(|e| transport(&e))?;
            expect_status(response, StatusCode::CREATED).await?;
            Ok(())
        })
    }

    fn delete_todo(&self, id: &str) -> TaskFuture<'_, ()> {
        let url = format!("{}/{id}", self.base_url);
        Box::pin(async move {
            let response = self
                .authed(self.client.delete(&url))
                .send()
                .await
                .map_err(|e| transport(&e))?;
            expect_status(response, StatusCode::OK).await?;
            Ok(())
        })
    }
}
