use std::cell::RefCell;
use std::rc::{
  Rc,
  Weak
};

use gloo::timers::future::TimeoutFuture;
use vidqueue_core::channel::ChannelLifecycle;
use vidqueue_core::config::ClientConfig;
use vidqueue_core::event::NotificationEvent;
use vidqueue_core::routes::channel_url_for;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
  CloseEvent,
  Event,
  MessageEvent,
  WebSocket
};
use yew::Callback;

/// WebSocket URL for the current page and configuration.
pub fn channel_url(
  config: &ClientConfig
) -> Option<String> {
  let location =
    web_sys::window()?.location();
  let protocol = location
    .protocol()
    .unwrap_or_else(|_| "http:".to_string());
  let host =
    location.host().unwrap_or_default();
  if host.is_empty()
    && config.api_base.is_empty()
  {
    return None;
  }
  Some(channel_url_for(
    &config.api_base,
    &protocol,
    &host,
    &config.channel_path
  ))
}

struct SocketHandlers {
  on_open:    Closure<dyn FnMut(Event)>,
  on_message: Closure<dyn FnMut(MessageEvent)>,
  on_error:   Closure<dyn FnMut(Event)>,
  on_close:   Closure<dyn FnMut(CloseEvent)>
}

/// Push channel to the task server. Owns at most one socket at a time and
/// reopens it after a fixed delay whenever it drops.
pub struct NotificationChannel {
  url:       String,
  lifecycle: RefCell<ChannelLifecycle>,
  socket:    RefCell<Option<WebSocket>>,
  handlers:  RefCell<Option<SocketHandlers>>,
  on_event:  Callback<NotificationEvent>
}

impl NotificationChannel {
  pub fn new(
    url: String,
    reconnect_delay_ms: u32,
    on_event: Callback<NotificationEvent>
  ) -> Rc<Self> {
    Rc::new(Self {
      url,
      lifecycle: RefCell::new(
        ChannelLifecycle::new(
          reconnect_delay_ms
        )
      ),
      socket: RefCell::new(None),
      handlers: RefCell::new(None),
      on_event
    })
  }

  pub fn connect(self: &Rc<Self>) {
    if !self
      .lifecycle
      .borrow_mut()
      .begin_connect()
    {
      tracing::debug!(
        phase = ?self.lifecycle.borrow().phase(),
        "skipping channel connect"
      );
      return;
    }

    self.detach();
    let attempt =
      self.lifecycle.borrow().attempts();
    tracing::debug!(
      url = %self.url,
      attempt,
      "opening notification channel"
    );

    let socket =
      match WebSocket::new(&self.url) {
        | Ok(socket) => socket,
        | Err(err) => {
          tracing::warn!(error = ?err, url = %self.url, "could not open notification channel");
          self.handle_close();
          return;
        }
      };

    let handlers = self.attach(&socket);
    *self.socket.borrow_mut() =
      Some(socket);
    *self.handlers.borrow_mut() =
      Some(handlers);
  }

  /// Stops the reconnect cycle and closes the socket.
  pub fn close(&self) {
    self.lifecycle.borrow_mut().shutdown();
    let socket =
      self.socket.borrow().clone();
    self.detach();
    if let Some(socket) = socket {
      let _ = socket.close();
    }
    tracing::info!(
      "notification channel shut down"
    );
  }

  fn attach(
    self: &Rc<Self>,
    socket: &WebSocket
  ) -> SocketHandlers {
    let on_open = {
      let channel = Rc::downgrade(self);
      Closure::<dyn FnMut(Event)>::new(
        move |_event: Event| {
          if let Some(channel) =
            channel.upgrade()
          {
            channel.handle_open();
          }
        }
      )
    };
    let on_message = {
      let channel = Rc::downgrade(self);
      Closure::<dyn FnMut(MessageEvent)>::new(
        move |event: MessageEvent| {
          if let Some(channel) =
            channel.upgrade()
          {
            channel.handle_message(&event);
          }
        }
      )
    };
    let on_error = {
      let channel = Rc::downgrade(self);
      Closure::<dyn FnMut(Event)>::new(
        move |_event: Event| {
          if let Some(channel) =
            channel.upgrade()
          {
            channel.handle_error();
          }
        }
      )
    };
    let on_close = {
      let channel: Weak<Self> =
        Rc::downgrade(self);
      Closure::<dyn FnMut(CloseEvent)>::new(
        move |event: CloseEvent| {
          tracing::info!(
            code = event.code(),
            clean = event.was_clean(),
            "notification channel closed"
          );
          if let Some(channel) =
            channel.upgrade()
          {
            channel.handle_close();
          }
        }
      )
    };

    socket.set_onopen(Some(
      on_open.as_ref().unchecked_ref()
    ));
    socket.set_onmessage(Some(
      on_message.as_ref().unchecked_ref()
    ));
    socket.set_onerror(Some(
      on_error.as_ref().unchecked_ref()
    ));
    socket.set_onclose(Some(
      on_close.as_ref().unchecked_ref()
    ));

    SocketHandlers {
      on_open,
      on_message,
      on_error,
      on_close
    }
  }

  /// Unhooks and forgets the current socket. Never called from inside one
  /// of the socket's own handlers.
  fn detach(&self) {
    if let Some(socket) =
      self.socket.borrow_mut().take()
    {
      socket.set_onopen(None);
      socket.set_onmessage(None);
      socket.set_onerror(None);
      socket.set_onclose(None);
    }
    drop(self.handlers.borrow_mut().take());
  }

  fn handle_open(&self) {
    self.lifecycle.borrow_mut().opened();
    tracing::info!(
      url = %self.url,
      "notification channel open"
    );
  }

  fn handle_message(
    &self,
    event: &MessageEvent
  ) {
    let Some(text) = event.data().as_string()
    else {
      tracing::debug!(
        "ignoring non-text channel frame"
      );
      return;
    };

    match NotificationEvent::from_json(
      &text
    ) {
      | Ok(Some(notification)) => {
        tracing::debug!(
          task_id = ?notification.task_id(),
          "channel notification"
        );
        if let NotificationEvent::Finished(
          outcome
        ) = &notification
          && let Some(reason) =
            outcome.failure_reason()
        {
          tracing::warn!(task_id = %outcome.task_id, error = %reason, "task failed");
        }
        self.on_event.emit(notification);
      }
      | Ok(None) => {
        tracing::debug!(
          frame = %text,
          "ignoring channel frame"
        );
      }
      | Err(err) => {
        tracing::warn!(error = %err, frame = %text, "malformed channel frame");
      }
    }
  }

  fn handle_error(&self) {
    if !self.lifecycle.borrow().errored() {
      return;
    }
    tracing::warn!(
      url = %self.url,
      "notification channel error; closing"
    );
    let socket =
      self.socket.borrow().clone();
    if let Some(socket) = socket {
      let _ = socket.close();
    }
  }

  fn handle_close(self: &Rc<Self>) {
    let Some(delay_ms) =
      self.lifecycle.borrow_mut().closed()
    else {
      return;
    };

    tracing::info!(
      delay_ms,
      "scheduling channel reconnect"
    );
    let channel = Rc::downgrade(self);
    wasm_bindgen_futures::spawn_local(
      async move {
        TimeoutFuture::new(delay_ms).await;
        if let Some(channel) =
          channel.upgrade()
        {
          channel.connect();
        }
      }
    );
  }
}
