use vidqueue_core::Prompter;
use vidqueue_core::upload::{
  UploadProgress,
  UploadSurface
};
use web_sys::HtmlInputElement;
use yew::{
  NodeRef,
  UseReducerDispatcher
};

use super::state::{
  DashboardAction,
  DashboardState
};

/// Blocking browser dialogs.
pub struct BrowserPrompter;

impl Prompter for BrowserPrompter {
  fn confirm(
    &self,
    message: &str
  ) -> bool {
    gloo::dialogs::confirm(message)
  }

  fn alert(&self, message: &str) {
    gloo::dialogs::alert(message);
  }
}

/// The upload panel as the upload flow sees it: the progress bar lives in
/// dashboard state, the file picker is the `<input>` behind `input`.
pub struct UploadPanelSurface {
  dispatcher:
    UseReducerDispatcher<DashboardState>,
  input:      NodeRef
}

impl UploadPanelSurface {
  pub fn new(
    dispatcher: UseReducerDispatcher<
      DashboardState
    >,
    input: NodeRef
  ) -> Self {
    Self { dispatcher, input }
  }
}

impl UploadSurface for UploadPanelSurface {
  fn show_progress(
    &self,
    progress: UploadProgress
  ) {
    self.dispatcher.dispatch(
      DashboardAction::UploadProgressed(
        progress
      )
    );
  }

  fn hide_progress(&self) {
    self
      .dispatcher
      .dispatch(DashboardAction::UploadHidden);
  }

  fn clear_selection(&self) {
    match self
      .input
      .cast::<HtmlInputElement>()
    {
      | Some(input) => input.set_value(""),
      | None => tracing::warn!(
        "file input not mounted; \
         selection left as is"
      )
    }
  }
}
