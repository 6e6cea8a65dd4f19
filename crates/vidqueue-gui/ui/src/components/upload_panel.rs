use vidqueue_core::upload::UploadProgress;
use yew::{
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct UploadPanelProps {
  pub input_ref: NodeRef,
  /// `None` keeps the progress bar hidden.
  pub progress:  Option<UploadProgress>,
  pub on_upload: Callback<MouseEvent>
}

#[function_component(UploadPanel)]
pub fn upload_panel(
  props: &UploadPanelProps
) -> Html {
  let busy = props.progress.is_some();

  html! {
      <section class="panel upload">
          <div class="header">{ "Upload" }</div>
          <div class="upload-controls">
              <input id="fileInput" type="file" multiple={true} ref={props.input_ref.clone()} />
              <button class="btn" disabled={busy} onclick={props.on_upload.clone()}>{ "Upload" }</button>
          </div>
          {
              match props.progress {
                  Some(progress) => html! {
                      <div id="uploadProgressContainer" class="progress">
                          <div
                              id="uploadProgress"
                              class="progress-bar"
                              style={format!("width:{};", progress.bar_width())}
                          >
                              { progress.label() }
                          </div>
                      </div>
                  },
                  None => html! {}
              }
          }
      </section>
  }
}
