use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct GlobalActionsProps {
  pub on_download_zip: Callback<MouseEvent>,
  pub on_clear_all:    Callback<MouseEvent>
}

#[function_component(GlobalActions)]
pub fn global_actions(
  props: &GlobalActionsProps
) -> Html {
  html! {
      <div class="actions">
          <button class="btn" onclick={props.on_download_zip.clone()}>{ "Download archive" }</button>
          <button class="btn danger" onclick={props.on_clear_all.clone()}>{ "Clear all" }</button>
      </div>
  }
}
