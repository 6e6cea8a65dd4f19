//! User-initiated file actions. Unlike the read paths, failures here are
//! reported to the user with a blocking alert.

use crate::api::{
  DashboardApi,
  Prompter
};
use crate::error::ApiError;
use crate::files::FileCategory;

pub const FILE_DELETED: &str =
  "File deleted";
pub const DELETE_FAILED: &str =
  "Delete failed";
pub const CLEAR_ALL_PROMPT: &str =
  "Clear all files and task records? \
   This cannot be undone.";

/// How a user action ended.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ActionOutcome {
  /// The user declined the confirmation; nothing was sent.
  Cancelled,
  Failed,
  /// The server accepted the action; the dashboard must refresh.
  Succeeded
}

impl ActionOutcome {
  pub fn needs_refresh(self) -> bool {
    self == Self::Succeeded
  }
}

pub fn delete_prompt(
  filename: &str
) -> String {
  format!("Delete \"{filename}\"?")
}

pub fn clear_all_failure_message(
  error: &ApiError
) -> String {
  match error.detail() {
    | Some(detail) => {
      format!("Clear failed: {detail}")
    }
    | None => {
      "Clear failed: unknown error"
        .to_string()
    }
  }
}

pub async fn delete_file<A, P>(
  api: &A,
  prompter: &P,
  category: FileCategory,
  filename: &str
) -> ActionOutcome
where
  A: DashboardApi,
  P: Prompter
{
  if !prompter
    .confirm(&delete_prompt(filename))
  {
    tracing::info!(
      category = %category,
      file = %filename,
      "delete canceled"
    );
    return ActionOutcome::Cancelled;
  }

  match api
    .delete_file(category, filename)
    .await
  {
    | Ok(()) => {
      tracing::info!(
        category = %category,
        file = %filename,
        "deleted file"
      );
      prompter.alert(FILE_DELETED);
      ActionOutcome::Succeeded
    }
    | Err(err) => {
      tracing::error!(error = %err, category = %category, file = %filename, "delete failed");
      prompter.alert(DELETE_FAILED);
      ActionOutcome::Failed
    }
  }
}

pub async fn clear_all<A, P>(
  api: &A,
  prompter: &P
) -> ActionOutcome
where
  A: DashboardApi,
  P: Prompter
{
  if !prompter.confirm(CLEAR_ALL_PROMPT) {
    tracing::info!("clear all canceled");
    return ActionOutcome::Cancelled;
  }

  match api.clear_all().await {
    | Ok(reply) => {
      tracing::warn!(
        message = %reply.message,
        "cleared all files and tasks"
      );
      prompter.alert(&reply.message);
      ActionOutcome::Succeeded
    }
    | Err(err) => {
      tracing::error!(error = %err, "clear all failed");
      prompter.alert(
        &clear_all_failure_message(&err)
      );
      ActionOutcome::Failed
    }
  }
}
