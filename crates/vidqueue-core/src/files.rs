//! Projections of server data into the three file lists.
//!
//! Nothing here is cached: every refresh recomputes the lists from the
//! latest task collection and archive listing.

use std::fmt;

use crate::dto::{
  Task,
  TaskId
};
use crate::routes::Routes;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
pub enum FileCategory {
  Upload,
  Output,
  Zip
}

impl FileCategory {
  pub const ALL: [Self; 3] = [
    Self::Upload,
    Self::Output,
    Self::Zip
  ];

  /// Path segment used by `DELETE /files/{category}/{name}`.
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Upload => "upload",
      | Self::Output => "output",
      | Self::Zip => "zip"
    }
  }

  pub fn heading(self) -> &'static str {
    match self {
      | Self::Upload => "Uploaded files",
      | Self::Output => "Converted files",
      | Self::Zip => "Archives"
    }
  }

  /// DOM id of the list container.
  pub fn list_dom_id(self) -> &'static str {
    match self {
      | Self::Upload => "uploadFilesList",
      | Self::Output => "outputFilesList",
      | Self::Zip => "zipFilesList"
    }
  }
}

impl fmt::Display for FileCategory {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A list item: a label, an optional download link, and a delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
  pub category:      FileCategory,
  pub name:          String,
  pub download_href: Option<String>
}

/// The three rendered lists.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct FileLists {
  pub uploads:  Vec<FileEntry>,
  pub outputs:  Vec<FileEntry>,
  pub archives: Vec<FileEntry>
}

impl FileLists {
  pub fn get(
    &self,
    category: FileCategory
  ) -> &[FileEntry] {
    match category {
      | FileCategory::Upload => {
        &self.uploads
      }
      | FileCategory::Output => {
        &self.outputs
      }
      | FileCategory::Zip => &self.archives
    }
  }

  pub fn replace(
    &mut self,
    category: FileCategory,
    entries: Vec<FileEntry>
  ) {
    match category {
      | FileCategory::Upload => {
        self.uploads = entries
      }
      | FileCategory::Output => {
        self.outputs = entries
      }
      | FileCategory::Zip => {
        self.archives = entries
      }
    }
  }
}

/// Last segment of a server-side path, tolerating either separator.
pub fn final_path_segment(
  path: &str
) -> &str {
  path
    .rsplit(['/', '\\'])
    .next()
    .unwrap_or(path)
}

pub fn upload_entries(
  tasks: &[Task]
) -> Vec<FileEntry> {
  tasks
    .iter()
    .map(|task| FileEntry {
      category:      FileCategory::Upload,
      name:          task.filename.clone(),
      download_href: None
    })
    .collect()
}

/// Names of converted files, one per task that has produced output.
pub fn output_names(
  tasks: &[Task]
) -> Vec<String> {
  tasks
    .iter()
    .filter_map(|task| {
      task.output_file.as_deref()
    })
    .filter(|path| !path.is_empty())
    .map(final_path_segment)
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .collect()
}

/// Entry for a converted file once its owning task is known. Files whose
/// owner could not be resolved are not listed.
pub fn output_entry(
  routes: &Routes,
  name: String,
  owner: Option<&TaskId>
) -> Option<FileEntry> {
  let owner = owner?;
  Some(FileEntry {
    category: FileCategory::Output,
    download_href: Some(
      routes.download(owner)
    ),
    name
  })
}

/// Archives all share the one bundle download endpoint.
pub fn zip_entries(
  routes: &Routes,
  names: Vec<String>
) -> Vec<FileEntry> {
  let href = routes.download_zip();
  names
    .into_iter()
    .map(|name| FileEntry {
      category: FileCategory::Zip,
      name,
      download_href: Some(href.clone())
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dto::TaskStatus;

  fn task(
    id: u64,
    filename: &str,
    output_file: Option<&str>
  ) -> Task {
    Task {
      id: TaskId::from(id),
      filename: filename.to_string(),
      status: if output_file.is_some() {
        TaskStatus::Completed
      } else {
        TaskStatus::Processing
      },
      progress: 0.0,
      output_file: output_file
        .map(str::to_string),
      frame_info: None
    }
  }

  #[test]
  fn uploads_list_every_task_filename() {
    let tasks = vec![
      task(1, "u1_a.mp4", None),
      task(2, "u2_b.mov", Some("x")),
    ];
    let entries = upload_entries(&tasks);
    let names: Vec<&str> = entries
      .iter()
      .map(|entry| entry.name.as_str())
      .collect();
    assert_eq!(
      names,
      vec!["u1_a.mp4", "u2_b.mov"]
    );
    assert!(entries.iter().all(|entry| {
      entry.download_href.is_none()
    }));
  }

  #[test]
  fn outputs_use_final_segment_and_skip_empty(
  ) {
    let tasks = vec![
      task(
        1,
        "a.mp4",
        Some(
          "outputs/transcoded_a.mp4.mp4"
        )
      ),
      task(2, "b.mp4", None),
      task(3, "c.mp4", Some("")),
      task(
        4,
        "d.mp4",
        Some(r"outputs\transcoded_d.mp4")
      ),
    ];
    assert_eq!(
      output_names(&tasks),
      vec![
        "transcoded_a.mp4.mp4",
        "transcoded_d.mp4"
      ]
    );
  }

  #[test]
  fn unresolved_output_is_omitted() {
    let routes = Routes::default();
    assert_eq!(
      output_entry(
        &routes,
        "x.mp4".to_string(),
        None
      ),
      None
    );

    let entry = output_entry(
      &routes,
      "x.mp4".to_string(),
      Some(&TaskId::from(8))
    )
    .expect("resolved entry");
    assert_eq!(
      entry.download_href.as_deref(),
      Some("/download/8")
    );
  }

  #[test]
  fn zips_share_bundle_download() {
    let entries = zip_entries(
      &Routes::default(),
      vec![
        "one.zip".to_string(),
        "two.zip".to_string(),
      ]
    );
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| {
      entry.download_href.as_deref()
        == Some("/download_zip/")
    }));
  }

  #[test]
  fn replace_swaps_one_category_only() {
    let mut lists = FileLists::default();
    lists.replace(
      FileCategory::Zip,
      zip_entries(
        &Routes::default(),
        vec!["a.zip".to_string()]
      )
    );
    assert_eq!(
      lists.get(FileCategory::Zip).len(),
      1
    );
    assert!(
      lists
        .get(FileCategory::Upload)
        .is_empty()
    );
    assert!(
      lists
        .get(FileCategory::Output)
        .is_empty()
    );
  }
}
