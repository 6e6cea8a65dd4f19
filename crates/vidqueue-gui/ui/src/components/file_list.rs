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

use super::FileListItem;

#[derive(Properties, PartialEq)]
pub struct FileListProps {
  pub category:  FileCategory,
  pub entries:   Vec<FileEntry>,
  pub on_delete:
    Callback<(FileCategory, String)>
}

#[function_component(FileList)]
pub fn file_list(
  props: &FileListProps
) -> Html {
  html! {
      <section class="panel files">
          <div class="header">{ props.category.heading() }</div>
          <ul id={props.category.list_dom_id()}>
              {
                  for props.entries.iter().cloned().map(|entry| html! {
                      <FileListItem
                          entry={entry}
                          on_delete={props.on_delete.clone()}
                      />
                  })
              }
          </ul>
      </section>
  }
}
