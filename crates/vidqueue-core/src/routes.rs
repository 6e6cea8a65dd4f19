use crate::dto::TaskId;
use crate::files::FileCategory;

pub const TASKS_PATH: &str = "/tasks/";
pub const LIST_ZIP_PATH: &str =
  "/list_zip/";
pub const UPLOAD_PATH: &str = "/upload/";
pub const CLEAR_ALL_PATH: &str =
  "/clear_all/";
pub const DOWNLOAD_ZIP_PATH: &str =
  "/download_zip/";

/// URL builder for the task server's HTTP surface.
///
/// File names handed in here must already be percent-encoded by the
/// caller. Task ids are encoded here.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct Routes {
  base: String
}

impl Routes {
  pub fn new(base: &str) -> Self {
    Self {
      base: base
        .trim_end_matches('/')
        .to_string()
    }
  }

  fn join(&self, path: &str) -> String {
    format!("{}{path}", self.base)
  }

  pub fn tasks(&self) -> String {
    self.join(TASKS_PATH)
  }

  pub fn list_zip(&self) -> String {
    self.join(LIST_ZIP_PATH)
  }

  pub fn upload(&self) -> String {
    self.join(UPLOAD_PATH)
  }

  pub fn clear_all(&self) -> String {
    self.join(CLEAR_ALL_PATH)
  }

  pub fn download_zip(&self) -> String {
    self.join(DOWNLOAD_ZIP_PATH)
  }

  pub fn download(
    &self,
    task_id: &TaskId
  ) -> String {
    self.join(&format!(
      "/download/{}",
      urlencoding::encode(task_id.as_str())
    ))
  }

  pub fn task_id_lookup(
    &self,
    encoded_name: &str
  ) -> String {
    self.join(&format!(
      "/task_id/{encoded_name}"
    ))
  }

  pub fn delete_file(
    &self,
    category: FileCategory,
    encoded_name: &str
  ) -> String {
    self.join(&format!(
      "/files/{}/{encoded_name}",
      category.as_str()
    ))
  }
}

/// Builds the WebSocket URL for the page currently loaded from
/// `page_protocol` (`"https:"`, `"http:"`) and `host`.
pub fn channel_url(
  page_protocol: &str,
  host: &str,
  path: &str
) -> String {
  let scheme =
    if page_protocol == "https:" {
      "wss"
    } else {
      "ws"
    };
  format!("{scheme}://{host}{path}")
}

/// Channel URL for a client whose HTTP routes may live on another origin.
/// An absolute `api_base` wins over the page location.
pub fn channel_url_for(
  api_base: &str,
  page_protocol: &str,
  page_host: &str,
  path: &str
) -> String {
  let base = api_base.trim_end_matches('/');
  if let Some(rest) =
    base.strip_prefix("https://")
  {
    return format!("wss://{rest}{path}");
  }
  if let Some(rest) =
    base.strip_prefix("http://")
  {
    return format!("ws://{rest}{path}");
  }
  channel_url(page_protocol, page_host, path)
}
