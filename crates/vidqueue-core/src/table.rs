use crate::dto::{
  Task,
  TaskId,
  TaskStatus,
  format_progress
};
use crate::event::ProgressUpdate;

/// Detail text shown when a progress report carries no frame information.
pub const DETAIL_NOT_APPLICABLE: &str =
  "N/A";

/// One rendered row of the task table.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
  pub id:       TaskId,
  pub filename: String,
  pub status:   TaskStatus,
  pub progress: f64,
  pub detail:   String
}

impl TaskRow {
  fn from_task(task: &Task) -> Self {
    Self {
      id:       task.id.clone(),
      filename: task.filename.clone(),
      status:   task.status,
      progress: task.progress,
      detail:   String::new()
    }
  }

  pub fn dom_id(&self) -> String {
    format!("task-{}", self.id)
  }

  pub fn detail_dom_id(&self) -> String {
    format!("detail-{}", self.id)
  }

  pub fn progress_label(&self) -> String {
    format_progress(self.progress)
  }

  pub fn has_download(&self) -> bool {
    self.status == TaskStatus::Completed
  }

  fn apply(
    &mut self,
    update: &ProgressUpdate
  ) {
    self.status = TaskStatus::Processing;
    self.progress = update.progress;
    self.detail = update
      .frame_info
      .clone()
      .unwrap_or_else(|| {
        DETAIL_NOT_APPLICABLE.to_string()
      });
  }
}

/// Client-side copy of the task table, in server order.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct TaskTable {
  rows: Vec<TaskRow>
}

impl TaskTable {
  pub fn from_tasks(
    tasks: &[Task]
  ) -> Self {
    Self {
      rows: tasks
        .iter()
        .map(TaskRow::from_task)
        .collect()
    }
  }

  /// Drops every row and rebuilds from a fresh fetch. Detail cells start
  /// empty again.
  pub fn rebuild(
    &mut self,
    tasks: &[Task]
  ) {
    *self = Self::from_tasks(tasks);
  }

  pub fn rows(&self) -> &[TaskRow] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn row(
    &self,
    id: &TaskId
  ) -> Option<&TaskRow> {
    self
      .rows
      .iter()
      .find(|row| &row.id == id)
  }

  pub fn contains(
    &self,
    id: &TaskId
  ) -> bool {
    self.row(id).is_some()
  }

  /// Rewrites the row named by the update. Returns `false`, leaving the
  /// table untouched, when no such row is rendered yet.
  pub fn patch(
    &mut self,
    update: &ProgressUpdate
  ) -> bool {
    let Some(row) = self
      .rows
      .iter_mut()
      .find(|row| row.id == update.task_id)
    else {
      tracing::debug!(
        task_id = %update.task_id,
        "progress for unrendered row"
      );
      return false;
    };

    row.apply(update);
    true
  }
}
