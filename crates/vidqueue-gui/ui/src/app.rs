mod state;
mod surfaces;

use std::rc::Rc;

use gloo::console::log;
use vidqueue_core::actions;
use vidqueue_core::config::ClientConfig;
use vidqueue_core::event::NotificationEvent;
use vidqueue_core::fetch::{
  fetch_file_list,
  fetch_tasks
};
use vidqueue_core::files::FileCategory;
use vidqueue_core::upload::upload_files;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_node_ref,
  use_reducer_eq,
  use_state
};

use self::state::{
  DashboardAction,
  DashboardState
};
use self::surfaces::{
  BrowserPrompter,
  UploadPanelSurface
};
use crate::api::{
  FileSelection,
  HttpApi,
  XhrUploader
};
use crate::channel::{
  NotificationChannel,
  channel_url
};
use crate::components::{
  FileList,
  GlobalActions,
  TasksTable,
  UploadPanel
};

const DASHBOARD_CONFIG_TOML: &str =
  include_str!("../assets/dashboard.toml");

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(load_client_config);
  let state =
    use_reducer_eq(DashboardState::default);
  let file_input = use_node_ref();
  let api = HttpApi::new(config.routes());

  {
    let dispatcher = state.dispatcher();
    let api = api.clone();

    use_effect_with(
      state.refresh_seq,
      move |seq| {
        tracing::info!(
          seq = *seq,
          "refreshing dashboard"
        );

        {
          let api = api.clone();
          let dispatcher = dispatcher.clone();
          wasm_bindgen_futures::spawn_local(
            async move {
              if let Some(tasks) =
                fetch_tasks(&api).await
              {
                dispatcher.dispatch(
                  DashboardAction::TasksLoaded(
                    tasks
                  )
                );
              }
            }
          );
        }

        for category in FileCategory::ALL {
          let api = api.clone();
          let dispatcher = dispatcher.clone();
          wasm_bindgen_futures::spawn_local(
            async move {
              if let Some(entries) =
                fetch_file_list(
                  &api,
                  api.routes(),
                  category
                )
                .await
              {
                dispatcher.dispatch(
                  DashboardAction::FilesLoaded(
                    category, entries
                  )
                );
              }
            }
          );
        }

        || ()
      }
    );
  }

  {
    let dispatcher = state.dispatcher();
    let config = (*config).clone();

    use_effect_with((), move |_| {
      let on_event = Callback::from(
        move |event: NotificationEvent| {
          dispatcher.dispatch(
            DashboardAction::Notified(event)
          );
        }
      );

      let channel = match channel_url(&config)
      {
        | Some(url) => {
          let channel =
            NotificationChannel::new(
              url,
              config.reconnect_delay_ms,
              on_event
            );
          channel.connect();
          Some(channel)
        }
        | None => {
          tracing::warn!(
            "no page location; live \
             updates disabled"
          );
          None
        }
      };

      move || {
        if let Some(channel) = channel {
          channel.close();
        }
      }
    });
  }

  let on_upload = {
    let dispatcher = state.dispatcher();
    let file_input = file_input.clone();
    let upload_url = api.routes().upload();

    Callback::from(move |_: MouseEvent| {
      let files = file_input
        .cast::<HtmlInputElement>()
        .and_then(|input| input.files());
      let selection =
        FileSelection::new(files);
      let transport =
        XhrUploader::new(upload_url.clone());
      let surface =
        Rc::new(UploadPanelSurface::new(
          dispatcher.clone(),
          file_input.clone()
        ));
      let dispatcher = dispatcher.clone();

      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = upload_files(
            &transport,
            &BrowserPrompter,
            &selection,
            &surface
          )
          .await;
          if outcome.needs_refresh() {
            dispatcher.dispatch(
              DashboardAction::RefreshRequested
            );
          }
        }
      );
    })
  };

  let on_delete = {
    let dispatcher = state.dispatcher();
    let api = api.clone();

    Callback::from(
      move |(category, name): (
        FileCategory,
        String
      )| {
        ui_debug(
          "delete",
          &format!("{category}/{name}")
        );
        let api = api.clone();
        let dispatcher = dispatcher.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            let outcome = actions::delete_file(
              &api,
              &BrowserPrompter,
              category,
              &name
            )
            .await;
            if outcome.needs_refresh() {
              dispatcher.dispatch(
                DashboardAction::RefreshRequested
              );
            }
          }
        );
      }
    )
  };

  let on_clear_all = {
    let dispatcher = state.dispatcher();
    let api = api.clone();

    Callback::from(move |_: MouseEvent| {
      let api = api.clone();
      let dispatcher = dispatcher.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          let outcome = actions::clear_all(
            &api,
            &BrowserPrompter
          )
          .await;
          if outcome.needs_refresh() {
            dispatcher.dispatch(
              DashboardAction::RefreshRequested
            );
          }
        }
      );
    })
  };

  let on_download_zip = {
    let href = api.routes().download_zip();

    Callback::from(move |_: MouseEvent| {
      ui_debug("download_zip", &href);
      let Some(window) = web_sys::window()
      else {
        tracing::warn!(
          "no window; cannot start \
           archive download"
        );
        return;
      };
      if let Err(error) =
        window.location().set_href(&href)
      {
        tracing::error!(?error, "archive download navigation failed");
      }
    })
  };

  html! {
      <div class="dashboard">
          <header class="topbar">
              <h1>{ "Conversion queue" }</h1>
              <GlobalActions
                  on_download_zip={on_download_zip}
                  on_clear_all={on_clear_all}
              />
          </header>
          <UploadPanel
              input_ref={file_input.clone()}
              progress={state.upload_progress}
              on_upload={on_upload}
          />
          <TasksTable
              rows={state.table.rows().to_vec()}
              routes={api.routes().clone()}
          />
          <div class="file-lists">
              {
                  for FileCategory::ALL.into_iter().map(|category| html! {
                      <FileList
                          category={category}
                          entries={state.files.get(category).to_vec()}
                          on_delete={on_delete.clone()}
                      />
                  })
              }
          </div>
      </div>
  }
}

fn load_client_config() -> ClientConfig {
  match ClientConfig::from_toml_str(
    DASHBOARD_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        api_base = %config.api_base,
        channel_path = %config.channel_path,
        reconnect_delay_ms =
          config.reconnect_delay_ms,
        "loaded dashboard config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed to parse dashboard config; using defaults");
      ClientConfig::default()
    }
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
