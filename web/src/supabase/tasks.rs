//! PostgREST calls for the `tasks` table, implementing the core repository
//! contract. Ordering is delegated to the store's query; the client never
//! reorders locally.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use taskboard_core::task::{StoreError, Task, TaskDraft, TaskStore};

use super::{Session, Supabase};

/// Task-repository handle bound to whatever session was active when it was
/// created. Without a session requests carry only the anon key, which the
/// store's row-level security rejects for task access.
pub struct TaskApi {
    client: Supabase,
    access_token: Option<String>,
}

impl Supabase {
    pub fn tasks(&self, session: Option<&Session>) -> TaskApi {
        TaskApi {
            client: self.clone(),
            access_token: session.map(|s| s.access_token.clone()),
        }
    }
}

/// Wire shape of a `tasks` row. The table column is `user_id`; the domain
/// model calls it `owner`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TaskRow {
    id: String,
    title: String,
    description: Option<String>,
    is_completed: bool,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            is_completed: row.is_completed,
            owner: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertTask<'a> {
    title: &'a str,
    description: Option<&'a str>,
    user_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<RestErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body),
        Err(_) => String::new(),
    };
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl TaskApi {
    fn request(&self, method: Method) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.client.anon_key);
        self.client
            .http
            .request(method, self.client.rest_endpoint("tasks"))
            .header("apikey", &self.client.anon_key)
            .bearer_auth(token)
    }
}

#[async_trait(?Send)]
impl TaskStore for TaskApi {
    async fn list_owned(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{owner}")),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;
        let rows: Vec<TaskRow> = response.json().await.map_err(transport)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, owner: &str, draft: &TaskDraft) -> Result<(), StoreError> {
        let rows = [InsertTask {
            title: draft.title(),
            description: draft.description(),
            user_id: owner,
        }];
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn set_completed(&self, id: &str, completed: bool) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{id}"))])
            .json(&serde_json::json!({ "is_completed": completed }))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}
