use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use serde::de::DeserializeOwned;
use vidqueue_core::dto::{
  ClearAllReply,
  ErrorDetail,
  Task,
  TaskId,
  TaskIdLookup
};
use vidqueue_core::files::FileCategory;
use vidqueue_core::routes::Routes;
use vidqueue_core::upload::{
  UploadProgress,
  UploadTransport,
  interrupted_transfer
};
use vidqueue_core::{
  ApiError,
  DashboardApi
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
  Event,
  FileList,
  FormData,
  ProgressEvent,
  RequestInit,
  Response,
  XmlHttpRequest
};

pub fn js_error(err: JsValue) -> ApiError {
  ApiError::Transport(format!("{err:?}"))
}

pub fn encode_segment(raw: &str) -> String {
  String::from(
    js_sys::encode_uri_component(raw)
  )
}

async fn read_text(
  response: &Response
) -> Result<String, ApiError> {
  let body = JsFuture::from(
    response.text().map_err(js_error)?
  )
  .await
  .map_err(js_error)?;
  Ok(body.as_string().unwrap_or_default())
}

/// `fetch`-backed client for the task server.
#[derive(Clone)]
pub struct HttpApi {
  routes: Routes
}

impl HttpApi {
  pub fn new(routes: Routes) -> Self {
    Self { routes }
  }

  pub fn routes(&self) -> &Routes {
    &self.routes
  }

  async fn send(
    &self,
    method: &str,
    url: &str
  ) -> Result<Response, ApiError> {
    let window = web_sys::window()
      .ok_or(ApiError::NoWindow)?;
    let init = RequestInit::new();
    init.set_method(method);

    let value = JsFuture::from(
      window
        .fetch_with_str_and_init(url, &init)
    )
    .await
    .map_err(js_error)?;
    let response: Response =
      value.dyn_into().map_err(js_error)?;

    if response.ok() {
      return Ok(response);
    }

    let status = response.status();
    let detail = read_text(&response)
      .await
      .ok()
      .and_then(|body| {
        serde_json::from_str::<ErrorDetail>(
          &body
        )
        .ok()
      })
      .and_then(|error| error.detail);
    tracing::debug!(
      %method,
      %url,
      status,
      detail = ?detail,
      "request rejected"
    );
    Err(ApiError::Status {
      status,
      detail
    })
  }

  async fn get_json<T>(
    &self,
    url: &str
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned
  {
    let response =
      self.send("GET", url).await?;
    let body = read_text(&response).await?;
    Ok(serde_json::from_str(&body)?)
  }
}

impl DashboardApi for HttpApi {
  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, ApiError> {
    self.get_json(&self.routes.tasks()).await
  }

  async fn list_archives(
    &self
  ) -> Result<Vec<String>, ApiError> {
    self
      .get_json(&self.routes.list_zip())
      .await
  }

  async fn lookup_task_id(
    &self,
    output_name: &str
  ) -> Result<Option<TaskId>, ApiError>
  {
    let url = self.routes.task_id_lookup(
      &encode_segment(output_name)
    );
    let lookup: TaskIdLookup =
      self.get_json(&url).await?;
    Ok(lookup.task_id)
  }

  async fn delete_file(
    &self,
    category: FileCategory,
    name: &str
  ) -> Result<(), ApiError> {
    let url = self.routes.delete_file(
      category,
      &encode_segment(name)
    );
    self.send("DELETE", &url).await?;
    Ok(())
  }

  async fn clear_all(
    &self
  ) -> Result<ClearAllReply, ApiError> {
    let response = self
      .send("POST", &self.routes.clear_all())
      .await?;
    let body = read_text(&response).await?;
    Ok(serde_json::from_str(&body)?)
  }
}

/// Files picked in the upload input.
pub struct FileSelection(Option<FileList>);

impl FileSelection {
  pub fn new(files: Option<FileList>) -> Self {
    Self(files)
  }
}

/// Multipart upload through `XMLHttpRequest`, which unlike `fetch`
/// reports upload progress.
pub struct XhrUploader {
  url: String
}

impl XhrUploader {
  pub fn new(url: String) -> Self {
    Self { url }
  }
}

impl UploadTransport for XhrUploader {
  type Selection = FileSelection;

  fn selection_len(
    &self,
    selection: &Self::Selection
  ) -> usize {
    selection
      .0
      .as_ref()
      .map_or(0, |files| {
        files.length() as usize
      })
  }

  async fn send(
    &self,
    selection: &Self::Selection,
    on_progress: Rc<dyn Fn(UploadProgress)>
  ) -> Result<(), ApiError> {
    let Some(files) = selection.0.as_ref()
    else {
      return Err(ApiError::Transport(
        "no file list to upload".to_string()
      ));
    };

    let form =
      FormData::new().map_err(js_error)?;
    for index in 0..files.length() {
      if let Some(file) = files.get(index) {
        form
          .append_with_blob_and_filename(
            "files",
            &file,
            &file.name()
          )
          .map_err(js_error)?;
      }
    }

    let request = XmlHttpRequest::new()
      .map_err(js_error)?;
    request
      .open_with_async(
        "POST", &self.url, true
      )
      .map_err(js_error)?;

    let progress_handler = Closure::<
      dyn FnMut(ProgressEvent)
    >::new(
      move |event: ProgressEvent| {
        if let Some(progress) =
          UploadProgress::from_bytes(
            event.loaded(),
            event.total(),
            event.length_computable()
          )
        {
          (*on_progress)(progress);
        }
      }
    );
    let upload =
      request.upload().map_err(js_error)?;
    upload.set_onprogress(Some(
      progress_handler
        .as_ref()
        .unchecked_ref()
    ));

    let mut settle = None;
    let finished =
      Promise::new(&mut |resolve, reject| {
        settle = Some((resolve, reject));
      });
    let Some((resolve, reject)) = settle
    else {
      return Err(ApiError::Transport(
        "upload promise executor did not \
         run"
          .to_string()
      ));
    };

    let load_handler =
      Closure::<dyn FnMut(Event)>::new(
        move |_event: Event| {
          let _ =
            resolve.call0(&JsValue::NULL);
        }
      );
    let interruption =
      Rc::new(RefCell::new(None));
    let error_handler = {
      let interruption =
        Rc::clone(&interruption);
      Closure::<dyn FnMut(Event)>::new(
        move |event: Event| {
          let err = interrupted_transfer(
            &event.type_()
          );
          let _ = reject.call1(
            &JsValue::NULL,
            &JsValue::from_str(
              &err.to_string()
            )
          );
          *interruption.borrow_mut() =
            Some(err);
        }
      )
    };
    request.set_onload(Some(
      load_handler.as_ref().unchecked_ref()
    ));
    let on_interrupted: &js_sys::Function =
      error_handler.as_ref().unchecked_ref();
    request.set_onerror(Some(on_interrupted));
    request.set_onabort(Some(on_interrupted));
    request.set_ontimeout(Some(on_interrupted));

    request
      .send_with_opt_form_data(Some(&form))
      .map_err(js_error)?;
    let settled =
      JsFuture::from(finished).await;

    // The handlers have to outlive the request; detach before dropping.
    upload.set_onprogress(None);
    request.set_onload(None);
    request.set_onerror(None);
    request.set_onabort(None);
    request.set_ontimeout(None);
    drop((
      progress_handler,
      load_handler,
      error_handler
    ));

    if let Err(err) = settled {
      return Err(
        interruption
          .borrow_mut()
          .take()
          .unwrap_or_else(|| js_error(err))
      );
    }
    let status =
      request.status().map_err(js_error)?;
    if (200..300).contains(&status) {
      Ok(())
    } else {
      Err(ApiError::Status {
        status,
        detail: None
      })
    }
  }
}
