use std::fmt;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

/// Server-assigned task identifier.
///
/// The server hands out integers today, but the client never does
/// arithmetic on them, so both JSON numbers and strings are accepted and
/// kept as text.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
  pub fn new(
    raw: impl Into<String>
  ) -> Self {
    Self(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<u64> for TaskId {
  fn from(value: u64) -> Self {
    Self(value.to_string())
  }
}

impl From<&str> for TaskId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl<'de> Deserialize<'de> for TaskId {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
      Unsigned(u64),
      Signed(i64),
      Text(String)
    }

    Ok(match RawId::deserialize(
      deserializer
    )? {
      | RawId::Unsigned(value) => {
        Self(value.to_string())
      }
      | RawId::Signed(value) => {
        Self(value.to_string())
      }
      | RawId::Text(value) => Self(value)
    })
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  #[serde(alias = "pending")]
  Queued,
  Processing,
  Completed,
  Failed
}

impl TaskStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Queued => "queued",
      | Self::Processing => "processing",
      | Self::Completed => "completed",
      | Self::Failed => "failed"
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(
      self,
      Self::Completed | Self::Failed
    )
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Task {
  pub id:          TaskId,
  pub filename:    String,
  pub status:      TaskStatus,
  #[serde(default)]
  pub progress:    f64,
  #[serde(default)]
  pub output_file: Option<String>,
  #[serde(default)]
  pub frame_info:  Option<String>
}

/// Body of `GET /task_id/{filename}`.
#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskIdLookup {
  pub task_id: Option<TaskId>
}

/// Success body of `POST /clear_all/`.
#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ClearAllReply {
  #[serde(default)]
  pub message: String
}

/// Error body the server attaches to failed requests.
#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ErrorDetail {
  pub detail: Option<String>
}

/// Renders a progress value the way every progress cell shows it.
pub fn format_progress(
  progress: f64
) -> String {
  format!("{progress:.2}%")
}
