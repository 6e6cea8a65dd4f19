use vidqueue_core::routes::Routes;
use vidqueue_core::table::TaskRow;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::TasksTableRow;

#[derive(Properties, PartialEq)]
pub struct TasksTableProps {
  pub rows:   Vec<TaskRow>,
  pub routes: Routes
}

#[function_component(TasksTable)]
pub fn tasks_table(
  props: &TasksTableProps
) -> Html {
  html! {
      <section class="panel">
          <div class="header">{ "Tasks" }</div>
          <table id="tasksTable">
              <thead>
                  <tr>
                      <th>{ "ID" }</th>
                      <th>{ "File" }</th>
                      <th>{ "Status" }</th>
                      <th>{ "Progress" }</th>
                      <th>{ "Action" }</th>
                      <th>{ "Detail" }</th>
                  </tr>
              </thead>
              <tbody>
                  {
                      for props.rows.iter().cloned().map(|row| {
                          let download_href = row
                              .has_download()
                              .then(|| props.routes.download(&row.id));
                          html! {
                              <TasksTableRow
                                  key={row.dom_id()}
                                  row={row}
                                  download_href={download_href}
                              />
                          }
                      })
                  }
              </tbody>
          </table>
      </section>
  }
}
