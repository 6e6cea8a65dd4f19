#![allow(async_fn_in_trait)]

use std::rc::Rc;

use crate::api::Prompter;
use crate::error::ApiError;

pub const NO_FILES_SELECTED: &str =
  "Please choose files to upload";
pub const UPLOAD_FAILED: &str =
  "Upload failed";

/// Byte-level progress of the transfer in flight, as a percentage.
#[derive(
  Debug, Clone, Copy, PartialEq, Default,
)]
pub struct UploadProgress {
  percent: f64
}

impl UploadProgress {
  pub fn started() -> Self {
    Self { percent: 0.0 }
  }

  /// `None` when the browser cannot tell how large the payload is.
  pub fn from_bytes(
    loaded: f64,
    total: f64,
    length_computable: bool
  ) -> Option<Self> {
    if !length_computable || total <= 0.0
    {
      return None;
    }
    let percent = (loaded * 100.0 / total)
      .clamp(0.0, 100.0);
    Some(Self { percent })
  }

  pub fn percent(self) -> f64 {
    self.percent
  }

  /// Numeric label shown on the bar.
  pub fn label(self) -> String {
    format!("{}%", self.percent.round())
  }

  /// CSS width of the filled part of the bar.
  pub fn bar_width(self) -> String {
    format!("{}%", self.percent)
  }
}

/// Error for a transfer the browser ended without a response: `abort`,
/// `timeout` or a plain network `error` event.
pub fn interrupted_transfer(
  event_type: &str
) -> ApiError {
  let reason = match event_type {
    | "abort" => "upload aborted",
    | "timeout" => "upload timed out",
    | _ => "network error during upload"
  };
  ApiError::Transport(reason.to_string())
}

/// Sends the multipart payload.
pub trait UploadTransport {
  type Selection;

  fn selection_len(
    &self,
    selection: &Self::Selection
  ) -> usize;

  async fn send(
    &self,
    selection: &Self::Selection,
    on_progress: Rc<dyn Fn(UploadProgress)>
  ) -> Result<(), ApiError>;
}

/// The file picker and progress indicator the upload drives.
pub trait UploadSurface {
  fn show_progress(
    &self,
    progress: UploadProgress
  );

  fn hide_progress(&self);

  fn clear_selection(&self);
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum UploadOutcome {
  /// Nothing was selected, so nothing was sent.
  Rejected,
  Failed,
  Uploaded
}

impl UploadOutcome {
  pub fn needs_refresh(self) -> bool {
    self == Self::Uploaded
  }
}

pub async fn upload_files<T, P, S>(
  transport: &T,
  prompter: &P,
  selection: &T::Selection,
  surface: &Rc<S>
) -> UploadOutcome
where
  T: UploadTransport,
  P: Prompter,
  S: UploadSurface + 'static
{
  let count =
    transport.selection_len(selection);
  if count == 0 {
    tracing::warn!(
      "upload requested with no files \
       selected"
    );
    prompter.alert(NO_FILES_SELECTED);
    return UploadOutcome::Rejected;
  }

  tracing::info!(
    files = count,
    "starting upload"
  );
  surface
    .show_progress(UploadProgress::started());

  let on_progress = {
    let surface = Rc::clone(surface);
    Rc::new(
      move |progress: UploadProgress| {
        surface.show_progress(progress);
      }
    )
  };

  let outcome = match transport
    .send(selection, on_progress)
    .await
  {
    | Ok(()) => {
      tracing::info!(
        files = count,
        "upload finished"
      );
      surface.clear_selection();
      UploadOutcome::Uploaded
    }
    | Err(err) => {
      tracing::error!(error = %err, files = count, "upload failed");
      prompter.alert(UPLOAD_FAILED);
      UploadOutcome::Failed
    }
  };

  surface.hide_progress();
  outcome
}
