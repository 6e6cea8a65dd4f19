use vidqueue_core::files::{
  FileCategory,
  FileEntry
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FileListItemProps {
  pub entry:     FileEntry,
  pub on_delete:
    Callback<(FileCategory, String)>
}

#[function_component(FileListItem)]
pub fn file_list_item(
  props: &FileListItemProps
) -> Html {
  let category = props.entry.category;
  let name = props.entry.name.clone();
  let on_delete = props.on_delete.clone();

  html! {
      <li class="file">
          <span class="file-name">{ &props.entry.name }</span>
          {
              match &props.entry.download_href {
                  Some(href) => html! { <a class="btn" href={href.clone()}>{ "Download" }</a> },
                  None => html! {}
              }
          }
          <button
              class="btn danger"
              onclick={move |_| on_delete.emit((category, name.clone()))}
          >
              { "Delete" }
          </button>
      </li>
  }
}
