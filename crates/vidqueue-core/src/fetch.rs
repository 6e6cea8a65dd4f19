//! Read paths that feed the task table and the file lists.
//!
//! Every failure here is logged and reported as `None`; the caller then
//! leaves the corresponding view as it was.

use crate::api::DashboardApi;
use crate::dto::Task;
use crate::files::{
  self,
  FileCategory,
  FileEntry
};
use crate::routes::Routes;

pub async fn fetch_tasks<A>(
  api: &A
) -> Option<Vec<Task>>
where
  A: DashboardApi
{
  match api.list_tasks().await {
    | Ok(tasks) => {
      tracing::debug!(
        total = tasks.len(),
        "fetched task list"
      );
      Some(tasks)
    }
    | Err(err) => {
      tracing::error!(error = %err, "task list fetch failed");
      None
    }
  }
}

pub async fn fetch_file_list<A>(
  api: &A,
  routes: &Routes,
  category: FileCategory
) -> Option<Vec<FileEntry>>
where
  A: DashboardApi
{
  let entries = match category {
    | FileCategory::Upload => {
      fetch_uploads(api).await
    }
    | FileCategory::Output => {
      fetch_outputs(api, routes).await
    }
    | FileCategory::Zip => {
      fetch_archives(api, routes).await
    }
  };

  if let Some(entries) = &entries {
    tracing::debug!(
      category = %category,
      total = entries.len(),
      "fetched file list"
    );
  }
  entries
}

async fn fetch_uploads<A>(
  api: &A
) -> Option<Vec<FileEntry>>
where
  A: DashboardApi
{
  let tasks = fetch_tasks(api).await?;
  Some(files::upload_entries(&tasks))
}

async fn fetch_outputs<A>(
  api: &A,
  routes: &Routes
) -> Option<Vec<FileEntry>>
where
  A: DashboardApi
{
  let tasks = fetch_tasks(api).await?;
  let mut entries = Vec::new();

  // One lookup per file; the server offers no batch form.
  for name in files::output_names(&tasks)
  {
    let owner = match api
      .lookup_task_id(&name)
      .await
    {
      | Ok(owner) => owner,
      | Err(err) if err.is_not_found() => {
        tracing::debug!(
          file = %name,
          "no task owns output file"
        );
        None
      }
      | Err(err) => {
        tracing::warn!(
          error = %err,
          file = %name,
          "could not resolve owning task"
        );
        None
      }
    };

    if let Some(entry) =
      files::output_entry(
        routes,
        name,
        owner.as_ref()
      )
    {
      entries.push(entry);
    }
  }

  Some(entries)
}

async fn fetch_archives<A>(
  api: &A,
  routes: &Routes
) -> Option<Vec<FileEntry>>
where
  A: DashboardApi
{
  match api.list_archives().await {
    | Ok(names) => Some(
      files::zip_entries(routes, names)
    ),
    | Err(err) => {
      tracing::error!(error = %err, "archive list fetch failed");
      None
    }
  }
}
