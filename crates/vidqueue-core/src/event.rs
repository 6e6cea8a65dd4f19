//! Decoding of the frames pushed over the notification channel.

use serde::Deserialize;

use crate::dto::{
  TaskId,
  TaskStatus
};

/// One decoded push notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
  /// Every file and task record was wiped server-side.
  ClearAll,
  /// A task is running and reported fresh progress.
  Progress(ProgressUpdate),
  /// A task reached `completed` or `failed`.
  Finished(TaskOutcome)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
  pub task_id:    TaskId,
  pub progress:   f64,
  pub frame_info: Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome {
  pub task_id: TaskId,
  pub status:  TaskStatus,
  pub error:   Option<String>
}

impl TaskOutcome {
  /// Server-reported reason for a failed task. Only ever logged.
  pub fn failure_reason(
    &self
  ) -> Option<&str> {
    match self.status {
      | TaskStatus::Failed => Some(
        self
          .error
          .as_deref()
          .unwrap_or("no reason given")
      ),
      | _ => None
    }
  }
}

#[derive(Debug, Deserialize)]
struct WireNotification {
  #[serde(default)]
  clear_all:  bool,
  task_id:    Option<TaskId>,
  status:     Option<TaskStatus>,
  progress:   Option<f64>,
  frame_info: Option<String>,
  error:      Option<String>
}

impl NotificationEvent {
  /// Decodes a text frame.
  ///
  /// `Ok(None)` means the frame was valid JSON but carries nothing the
  /// dashboard reacts to, for instance a `queued` status or a
  /// `processing` frame without a progress value.
  pub fn from_json(
    text: &str
  ) -> Result<Option<Self>, serde_json::Error>
  {
    let wire: WireNotification =
      serde_json::from_str(text)?;
    Ok(Self::from_wire(wire))
  }

  fn from_wire(
    wire: WireNotification
  ) -> Option<Self> {
    if wire.clear_all {
      return Some(Self::ClearAll);
    }

    let task_id = wire.task_id?;
    match wire.status? {
      | status
        if status.is_terminal() =>
      {
        Some(Self::Finished(
          TaskOutcome {
            task_id,
            status,
            error: wire.error
          }
        ))
      }
      | TaskStatus::Processing => {
        let progress = wire.progress?;
        Some(Self::Progress(
          ProgressUpdate {
            task_id,
            progress,
            frame_info: wire.frame_info
          }
        ))
      }
      | _ => None
    }
  }

  pub fn task_id(
    &self
  ) -> Option<&TaskId> {
    match self {
      | Self::ClearAll => None,
      | Self::Progress(update) => {
        Some(&update.task_id)
      }
      | Self::Finished(outcome) => {
        Some(&outcome.task_id)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode(
    text: &str
  ) -> Option<NotificationEvent> {
    NotificationEvent::from_json(text)
      .expect("frame is valid json")
  }

  #[test]
  fn clear_all_wins_over_other_fields()
  {
    let event = decode(
      r#"{"clear_all":true,"task_id":4,"status":"processing","progress":3.0}"#
    );
    assert_eq!(
      event,
      Some(NotificationEvent::ClearAll)
    );
  }

  #[test]
  fn processing_frame_becomes_progress()
  {
    let event = decode(
      r#"{"task_id":1,"status":"processing","progress":77.3,"frame_info":"frame 120/200"}"#
    );
    assert_eq!(
      event,
      Some(NotificationEvent::Progress(
        ProgressUpdate {
          task_id:    TaskId::from(1),
          progress:   77.3,
          frame_info: Some(
            "frame 120/200".to_string()
          )
        }
      ))
    );
  }

  #[test]
  fn failure_frame_keeps_error_text() {
    let event = decode(
      r#"{"task_id":9,"status":"failed","error":"ffmpeg exited"}"#
    );
    let Some(
      NotificationEvent::Finished(outcome)
    ) = event
    else {
      panic!("expected finished event");
    };
    assert_eq!(
      outcome.status,
      TaskStatus::Failed
    );
    assert_eq!(
      outcome.failure_reason(),
      Some("ffmpeg exited")
    );
  }

  #[test]
  fn only_failed_outcomes_carry_a_reason() {
    let Some(NotificationEvent::Finished(
      completed
    )) = decode(
      r#"{"task_id":3,"status":"completed","error":"stale"}"#
    )
    else {
      panic!("expected finished event");
    };
    assert_eq!(
      completed.failure_reason(),
      None
    );

    let Some(NotificationEvent::Finished(
      silent
    )) = decode(
      r#"{"task_id":4,"status":"failed"}"#
    )
    else {
      panic!("expected finished event");
    };
    assert_eq!(
      silent.failure_reason(),
      Some("no reason given")
    );
  }

  #[test]
  fn completed_frame_ignores_progress() {
    let event = decode(
      r#"{"task_id":"x1","status":"completed","progress":100.0}"#
    );
    assert!(matches!(
      event,
      Some(NotificationEvent::Finished(
        TaskOutcome {
          status: TaskStatus::Completed,
          ..
        }
      ))
    ));
  }

  #[test]
  fn frames_without_a_reaction_are_ignored(
  ) {
    assert_eq!(
      decode(
        r#"{"task_id":1,"status":"pending"}"#
      ),
      None
    );
    assert_eq!(
      decode(
        r#"{"task_id":1,"status":"processing"}"#
      ),
      None
    );
    assert_eq!(
      decode(r#"{"status":"completed"}"#),
      None
    );
    assert_eq!(decode("{}"), None);
  }

  #[test]
  fn non_json_frame_is_an_error() {
    assert!(
      NotificationEvent::from_json(
        "not json"
      )
      .is_err()
    );
  }
}
