use std::rc::Rc;

use vidqueue_core::dto::Task;
use vidqueue_core::event::NotificationEvent;
use vidqueue_core::files::{
  FileCategory,
  FileEntry,
  FileLists
};
use vidqueue_core::reconcile::Reaction;
use vidqueue_core::table::TaskTable;
use vidqueue_core::upload::UploadProgress;
use yew::Reducible;

/// Everything the dashboard renders.
#[derive(Clone, PartialEq, Default)]
pub struct DashboardState {
  pub table:           TaskTable,
  pub files:           FileLists,
  /// Bumped whenever the table and every file list must be refetched.
  pub refresh_seq:     u64,
  pub upload_progress: Option<UploadProgress>
}

pub enum DashboardAction {
  RefreshRequested,
  TasksLoaded(Vec<Task>),
  FilesLoaded(FileCategory, Vec<FileEntry>),
  Notified(NotificationEvent),
  UploadProgressed(UploadProgress),
  UploadHidden
}

impl DashboardState {
  fn with(
    self: Rc<Self>,
    update: impl FnOnce(&mut Self)
  ) -> Rc<Self> {
    let mut next = Rc::unwrap_or_clone(self);
    update(&mut next);
    Rc::new(next)
  }

  fn request_refresh(&mut self) {
    self.refresh_seq =
      self.refresh_seq.wrapping_add(1);
  }
}

impl Reducible for DashboardState {
  type Action = DashboardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    match action {
      | DashboardAction::RefreshRequested => {
        self.with(Self::request_refresh)
      }
      | DashboardAction::TasksLoaded(
        tasks
      ) => self.with(|state| {
        state.table.rebuild(&tasks)
      }),
      | DashboardAction::FilesLoaded(
        category,
        entries
      ) => self.with(|state| {
        state.files.replace(category, entries)
      }),
      | DashboardAction::Notified(event) => {
        match Reaction::from(event) {
          | Reaction::FullRefresh => {
            self.with(Self::request_refresh)
          }
          | Reaction::PatchRow(update) => {
            if !self
              .table
              .contains(&update.task_id)
            {
              return self;
            }
            self.with(|state| {
              state.table.patch(&update);
            })
          }
        }
      }
      | DashboardAction::UploadProgressed(
        progress
      ) => self.with(|state| {
        state.upload_progress =
          Some(progress)
      }),
      | DashboardAction::UploadHidden => {
        self.with(|state| {
          state.upload_progress = None
        })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use vidqueue_core::dto::TaskId;

  use super::*;

  fn loaded() -> Rc<DashboardState> {
    let tasks: Vec<Task> = serde_json::from_str(
      r#"[
        {"id":1,"filename":"a.mp4","status":"processing","progress":10.0},
        {"id":2,"filename":"b.mp4","status":"queued","progress":0.0}
      ]"#,
    )
    .expect("tasks decode");
    Rc::new(DashboardState::default())
      .reduce(DashboardAction::TasksLoaded(tasks))
  }

  fn frame(raw: &str) -> NotificationEvent {
    NotificationEvent::from_json(raw)
      .expect("frame decodes")
      .expect("frame is actionable")
  }

  #[test]
  fn progress_patches_row_without_refresh() {
    let state = loaded().reduce(DashboardAction::Notified(frame(
      r#"{"task_id":2,"status":"processing","progress":55.0}"#,
    )));

    let row = state
      .table
      .row(&TaskId::from(2))
      .expect("row 2");
    assert_eq!(row.progress_label(), "55.00%");
    assert_eq!(row.detail, "N/A");
    assert_eq!(state.refresh_seq, 0);
  }

  #[test]
  fn progress_for_unknown_task_keeps_state() {
    let before = loaded();
    let after = Rc::clone(&before).reduce(DashboardAction::Notified(frame(
      r#"{"task_id":9,"status":"processing","progress":5.0}"#,
    )));
    assert!(Rc::ptr_eq(&before, &after));
  }

  #[test]
  fn terminal_and_clear_frames_bump_refresh() {
    let state = loaded()
      .reduce(DashboardAction::Notified(frame(
        r#"{"task_id":1,"status":"failed","error":"bad codec"}"#,
      )))
      .reduce(DashboardAction::Notified(frame(r#"{"clear_all":true}"#)));
    assert_eq!(state.refresh_seq, 2);
  }

  #[test]
  fn reload_clears_detail_cells() {
    let patched = loaded().reduce(DashboardAction::Notified(frame(
      r#"{"task_id":1,"status":"processing","progress":20.0,"frame_info":"frame 3/9"}"#,
    )));
    assert_eq!(
      patched.table.row(&TaskId::from(1)).map(|row| row.detail.as_str()),
      Some("frame 3/9")
    );

    let tasks: Vec<Task> = serde_json::from_str(
      r#"[{"id":1,"filename":"a.mp4","status":"processing","progress":20.0}]"#,
    )
    .expect("tasks decode");
    let reloaded = patched.reduce(DashboardAction::TasksLoaded(tasks));
    assert_eq!(reloaded.table.len(), 1);
    assert_eq!(
      reloaded.table.row(&TaskId::from(1)).map(|row| row.detail.as_str()),
      Some("")
    );
  }

  #[test]
  fn upload_bar_shows_then_hides() {
    let progress = UploadProgress::from_bytes(50.0, 200.0, true)
      .expect("computable");
    let state = loaded().reduce(DashboardAction::UploadProgressed(progress));
    assert_eq!(
      state.upload_progress.map(UploadProgress::label),
      Some("25%".to_string())
    );

    let state = state.reduce(DashboardAction::UploadHidden);
    assert_eq!(state.upload_progress, None);
  }
}
