use crate::event::{
  NotificationEvent,
  ProgressUpdate
};

/// What the dashboard does in response to one notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
  /// Refetch the task table and all three file lists.
  FullRefresh,
  /// Rewrite a single table row in place.
  PatchRow(ProgressUpdate)
}

impl From<NotificationEvent> for Reaction {
  fn from(
    event: NotificationEvent
  ) -> Self {
    match event {
      // A finished task may gain a download link or an output file, so the
      // row is not patched.
      | NotificationEvent::ClearAll
      | NotificationEvent::Finished(_) => {
        Self::FullRefresh
      }
      | NotificationEvent::Progress(
        update
      ) => Self::PatchRow(update)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dto::{
    TaskId,
    TaskStatus
  };
  use crate::event::TaskOutcome;

  #[test]
  fn clear_and_finish_refresh_everything(
  ) {
    let finished = |status| {
      NotificationEvent::Finished(
        TaskOutcome {
          task_id: TaskId::from(2),
          status,
          error: None
        }
      )
    };

    for event in [
      NotificationEvent::ClearAll,
      finished(TaskStatus::Completed),
      finished(TaskStatus::Failed)
    ] {
      assert_eq!(
        Reaction::from(event),
        Reaction::FullRefresh
      );
    }
  }

  #[test]
  fn progress_patches_one_row() {
    let update = ProgressUpdate {
      task_id:    TaskId::from(3),
      progress:   12.0,
      frame_info: None
    };
    let reaction = Reaction::from(
      NotificationEvent::Progress(
        update.clone()
      )
    );
    assert_eq!(
      reaction,
      Reaction::PatchRow(update)
    );
  }
}
