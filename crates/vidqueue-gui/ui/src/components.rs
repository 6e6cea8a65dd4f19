mod file_list;
mod file_list_item;
mod global_actions;
mod tasks_table;
mod tasks_table_row;
mod upload_panel;

pub use file_list::FileList;
pub use file_list_item::FileListItem;
pub use global_actions::GlobalActions;
pub use tasks_table::TasksTable;
pub use tasks_table_row::TasksTableRow;
pub use upload_panel::UploadPanel;
