use vidqueue_core::dto::TaskStatus;
use vidqueue_core::table::TaskRow;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TasksTableRowProps {
  pub row:           TaskRow,
  pub download_href: Option<String>
}

#[function_component(TasksTableRow)]
pub fn tasks_table_row(
  props: &TasksTableRowProps
) -> Html {
  let row = &props.row;
  let status_class = match row.status {
    | TaskStatus::Queued => {
      "status queued"
    }
    | TaskStatus::Processing => {
      "status processing"
    }
    | TaskStatus::Completed => {
      "status completed"
    }
    | TaskStatus::Failed => {
      "status failed"
    }
  };

  html! {
      <tr id={row.dom_id()}>
          <td>{ row.id.to_string() }</td>
          <td>{ &row.filename }</td>
          <td class={status_class}>{ row.status.as_str() }</td>
          <td>{ row.progress_label() }</td>
          <td>
              {
                  match &props.download_href {
                      Some(href) => html! { <a href={href.clone()}>{ "Download" }</a> },
                      None => html! {}
                  }
              }
          </td>
          <td id={row.detail_dom_id()}>{ &row.detail }</td>
      </tr>
  }
}
