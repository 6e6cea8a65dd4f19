//! Seams between the dashboard logic and the browser.
//!
//! The frontend implements these against `fetch`, `XMLHttpRequest` and the
//! blocking dialog functions; tests implement them in memory.

#![allow(async_fn_in_trait)]

use crate::dto::{
  ClearAllReply,
  Task,
  TaskId
};
use crate::error::ApiError;
use crate::files::FileCategory;

/// The task server's request/response endpoints.
pub trait DashboardApi {
  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, ApiError>;

  async fn list_archives(
    &self
  ) -> Result<Vec<String>, ApiError>;

  /// Resolves the task that produced a converted file.
  async fn lookup_task_id(
    &self,
    output_name: &str
  ) -> Result<Option<TaskId>, ApiError>;

  async fn delete_file(
    &self,
    category: FileCategory,
    name: &str
  ) -> Result<(), ApiError>;

  async fn clear_all(
    &self
  ) -> Result<ClearAllReply, ApiError>;
}

/// Blocking user dialogs.
pub trait Prompter {
  fn confirm(&self, message: &str) -> bool;

  fn alert(&self, message: &str);
}
