use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::api::{
  DashboardApi,
  Prompter
};
use crate::dto::{
  ClearAllReply,
  Task,
  TaskId
};
use crate::error::ApiError;
use crate::files::FileCategory;

/// In-memory task server that records every request it receives.
pub struct FakeApi {
  pub tasks:         Vec<Task>,
  pub archives:      Vec<String>,
  pub owners:        BTreeMap<String, TaskId>,
  pub tasks_error:   Option<ApiError>,
  pub archive_error: Option<ApiError>,
  pub delete_error:  Option<ApiError>,
  pub clear_error:   Option<ApiError>,
  pub clear_message: String,
  pub calls:         RefCell<Vec<String>>
}

impl Default for FakeApi {
  fn default() -> Self {
    Self {
      tasks:         vec![],
      archives:      vec![],
      owners:        BTreeMap::new(),
      tasks_error:   None,
      archive_error: None,
      delete_error:  None,
      clear_error:   None,
      clear_message: "all cleared"
        .to_string(),
      calls:         RefCell::new(vec![])
    }
  }
}

impl FakeApi {
  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  fn record(&self, call: String) {
    self.calls.borrow_mut().push(call);
  }

  fn result<T>(
    error: &Option<ApiError>,
    value: T
  ) -> Result<T, ApiError> {
    match error {
      | Some(err) => Err(err.clone()),
      | None => Ok(value)
    }
  }
}

impl DashboardApi for FakeApi {
  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, ApiError> {
    self.record("list tasks".to_string());
    Self::result(
      &self.tasks_error,
      self.tasks.clone()
    )
  }

  async fn list_archives(
    &self
  ) -> Result<Vec<String>, ApiError> {
    self
      .record("list archives".to_string());
    Self::result(
      &self.archive_error,
      self.archives.clone()
    )
  }

  async fn lookup_task_id(
    &self,
    output_name: &str
  ) -> Result<Option<TaskId>, ApiError>
  {
    self.record(format!(
      "lookup {output_name}"
    ));
    match self.owners.get(output_name) {
      | Some(owner) => {
        Ok(Some(owner.clone()))
      }
      | None => Err(ApiError::Status {
        status: 404,
        detail: Some(
          "Task not found".to_string()
        )
      })
    }
  }

  async fn delete_file(
    &self,
    category: FileCategory,
    name: &str
  ) -> Result<(), ApiError> {
    self.record(format!(
      "delete {category}/{name}"
    ));
    Self::result(&self.delete_error, ())
  }

  async fn clear_all(
    &self
  ) -> Result<ClearAllReply, ApiError> {
    self.record("clear all".to_string());
    Self::result(
      &self.clear_error,
      ClearAllReply {
        message: self
          .clear_message
          .clone()
      }
    )
  }
}

/// Answers every confirmation the same way and records what was shown.
pub struct ScriptedPrompter {
  answer:        bool,
  confirmations: RefCell<Vec<String>>,
  alerts:        RefCell<Vec<String>>
}

impl ScriptedPrompter {
  pub fn accepting() -> Self {
    Self::answering(true)
  }

  pub fn declining() -> Self {
    Self::answering(false)
  }

  fn answering(answer: bool) -> Self {
    Self {
      answer,
      confirmations: RefCell::new(
        vec![]
      ),
      alerts: RefCell::new(vec![])
    }
  }

  pub fn confirmations(
    &self
  ) -> Vec<String> {
    self.confirmations.borrow().clone()
  }

  pub fn alerts(&self) -> Vec<String> {
    self.alerts.borrow().clone()
  }
}

impl Prompter for ScriptedPrompter {
  fn confirm(&self, message: &str) -> bool {
    self
      .confirmations
      .borrow_mut()
      .push(message.to_string());
    self.answer
  }

  fn alert(&self, message: &str) {
    self
      .alerts
      .borrow_mut()
      .push(message.to_string());
  }
}
