//! Connection lifecycle of the notification channel.
//!
//! The browser adapter owns the socket; this state machine decides when to
//! close it and when to schedule the next connection attempt. A lost
//! connection schedules exactly one reconnect after a fixed delay, and the
//! cycle repeats for as long as the channel is not shut down.

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ChannelPhase {
  Idle,
  Connecting,
  Open,
  /// A reconnect is scheduled and has not fired yet.
  Reconnecting,
  Shutdown
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLifecycle {
  phase:              ChannelPhase,
  reconnect_delay_ms: u32,
  attempts:           u64
}

impl ChannelLifecycle {
  pub fn new(
    reconnect_delay_ms: u32
  ) -> Self {
    Self {
      phase: ChannelPhase::Idle,
      reconnect_delay_ms,
      attempts: 0
    }
  }

  pub fn phase(&self) -> ChannelPhase {
    self.phase
  }

  /// Number of connection attempts started so far.
  pub fn attempts(&self) -> u64 {
    self.attempts
  }

  /// Returns `false` when a connection is already live or pending, or the
  /// channel was shut down.
  pub fn begin_connect(&mut self) -> bool {
    match self.phase {
      | ChannelPhase::Idle
      | ChannelPhase::Reconnecting => {
        self.phase =
          ChannelPhase::Connecting;
        self.attempts += 1;
        true
      }
      | ChannelPhase::Connecting
      | ChannelPhase::Open
      | ChannelPhase::Shutdown => false
    }
  }

  pub fn opened(&mut self) {
    if self.phase
      == ChannelPhase::Connecting
    {
      self.phase = ChannelPhase::Open;
    }
  }

  /// A transport error was reported. Returns whether the adapter must
  /// close the socket itself.
  pub fn errored(&self) -> bool {
    matches!(
      self.phase,
      ChannelPhase::Connecting
        | ChannelPhase::Open
    )
  }

  /// The socket closed, or could not be created. Returns the delay before
  /// the one reconnect attempt, or `None` if one is already scheduled or
  /// the channel was shut down.
  pub fn closed(&mut self) -> Option<u32> {
    match self.phase {
      | ChannelPhase::Connecting
      | ChannelPhase::Open => {
        self.phase =
          ChannelPhase::Reconnecting;
        Some(self.reconnect_delay_ms)
      }
      | ChannelPhase::Idle
      | ChannelPhase::Reconnecting
      | ChannelPhase::Shutdown => None
    }
  }

  pub fn shutdown(&mut self) {
    self.phase = ChannelPhase::Shutdown;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn close_schedules_exactly_one_reconnect(
  ) {
    let mut lifecycle =
      ChannelLifecycle::new(5_000);
    assert!(lifecycle.begin_connect());
    lifecycle.opened();

    assert_eq!(
      lifecycle.closed(),
      Some(5_000)
    );
    assert_eq!(lifecycle.closed(), None);
    assert_eq!(
      lifecycle.phase(),
      ChannelPhase::Reconnecting
    );
  }

  #[test]
  fn error_closes_then_reconnects_once() {
    let mut lifecycle =
      ChannelLifecycle::new(5_000);
    lifecycle.begin_connect();
    lifecycle.opened();

    assert!(lifecycle.errored());
    assert_eq!(
      lifecycle.closed(),
      Some(5_000)
    );
    assert!(!lifecycle.errored());
  }

  #[test]
  fn reconnect_cycle_repeats_with_fixed_delay(
  ) {
    let mut lifecycle =
      ChannelLifecycle::new(5_000);

    for attempt in 1..=50 {
      assert!(lifecycle.begin_connect());
      assert_eq!(
        lifecycle.attempts(),
        attempt
      );
      // Half the attempts never open at all.
      if attempt % 2 == 0 {
        lifecycle.opened();
      }
      assert_eq!(
        lifecycle.closed(),
        Some(5_000)
      );
    }
  }

  #[test]
  fn connect_is_refused_while_live() {
    let mut lifecycle =
      ChannelLifecycle::new(5_000);
    assert!(lifecycle.begin_connect());
    assert!(!lifecycle.begin_connect());
    lifecycle.opened();
    assert!(!lifecycle.begin_connect());
    assert_eq!(lifecycle.attempts(), 1);
  }

  #[test]
  fn shutdown_stops_the_cycle() {
    let mut lifecycle =
      ChannelLifecycle::new(5_000);
    lifecycle.begin_connect();
    lifecycle.opened();
    lifecycle.shutdown();

    assert_eq!(lifecycle.closed(), None);
    assert!(!lifecycle.begin_connect());
    assert!(!lifecycle.errored());
  }
}
