use thiserror::Error;

/// Failures seen while talking to the task server.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
  /// The request never produced a response.
  #[error("transport failure: {0}")]
  Transport(String),

  /// The server answered with a non-success status.
  #[error("server returned status {status}")]
  Status {
    status: u16,
    detail: Option<String>
  },

  /// The response body did not have the expected shape.
  #[error("could not decode response: {0}")]
  Decode(String),

  #[error("browser window is not available")]
  NoWindow
}

impl ApiError {
  /// Server-provided explanation, when the error body carried one.
  pub fn detail(&self) -> Option<&str> {
    match self {
      | Self::Status {
        detail, ..
      } => detail.as_deref(),
      | _ => None
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::Status { status: 404, .. }
    )
  }
}

impl From<serde_json::Error>
  for ApiError
{
  fn from(
    error: serde_json::Error
  ) -> Self {
    Self::Decode(error.to_string())
  }
}
