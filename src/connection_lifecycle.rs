use log::{debug, error, info, trace, warn};

use crate::advertising_controller::{AdvertisingController, AdvertisingError};
use crate::bluetooth_error::BluetoothError;
use crate::gap_advertiser::GapAdvertiser;
use crate::gap_event::GapEvent;
use crate::gatt_connection::{Connection, ConnectionHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
  /// Not advertising and not connected.  Only seen before [ConnectionLifecycle::start], after a
  /// host reset, or after a failed attempt to (re)start advertising.
  Idle,
  Advertising,
  Connected(Connection),
}

/// Advertise/connect/disconnect state machine for a single peer.  Every event that ends an
/// advertisement or a connection restarts advertising, so the peripheral is always either
/// serving a peer or discoverable.  A failed restart is not retried here: the next terminal
/// event is the retry.
#[derive(Debug)]
pub struct ConnectionLifecycle<A> {
  advertising: AdvertisingController<A>,
  state: ConnectionState,
}

type Outcome<A> = Result<(), AdvertisingError<<A as GapAdvertiser>::SystemError>>;

impl<A: GapAdvertiser> ConnectionLifecycle<A> {
  pub fn new(advertising: AdvertisingController<A>) -> Self {
    Self {
      advertising,
      state: ConnectionState::Idle,
    }
  }

  pub fn state(&self) -> &ConnectionState {
    &self.state
  }

  pub fn connection(&self) -> Option<&Connection> {
    match &self.state {
      ConnectionState::Connected(connection) => Some(connection),
      _ => None,
    }
  }

  pub fn is_connected(&self) -> bool {
    self.connection().is_some()
  }

  pub fn advertising(&self) -> &AdvertisingController<A> {
    &self.advertising
  }

  /// Begin advertising for the first time.
  pub fn start(&mut self) -> Outcome<A> {
    if self.state != ConnectionState::Idle {
      debug!("Lifecycle already started: state={:?}", self.state);
      return Ok(());
    }
    self.restart_advertising()
  }

  /// Apply one event from the host stack.  An advertising failure has already been logged by
  /// the time it is returned.
  pub fn on_event(&mut self, event: GapEvent) -> Outcome<A> {
    trace!("event: {event:?}");
    match event {
      GapEvent::Connect { result: Ok(handle) } => {
        self.on_connected(handle);
        Ok(())
      }
      GapEvent::Connect { result: Err(status) } => {
        if self.is_connected() {
          warn!("Ignoring failed connection attempt while connected: status={status}");
          return Ok(());
        }
        // Active flag stays set: the controller stops whatever is still running.
        info!("Connection attempt failed: status={status}");
        self.restart_advertising()
      }
      GapEvent::AdvertisementComplete { reason } => {
        info!("Advertising complete: reason={reason:?}");
        if self.is_connected() {
          self.advertising.mark_stopped();
          return Ok(());
        }
        self.restart_advertising()
      }
      GapEvent::Disconnect { handle, reason } => self.on_disconnected(handle, reason),
      GapEvent::HostReset { reason } => {
        error!("Host stack reset: reason={reason}");
        if let Some(connection) = self.connection() {
          info!("Dropping connection {} after reset", connection.handle());
        }
        self.advertising.mark_stopped();
        self.state = ConnectionState::Idle;
        Ok(())
      }
      GapEvent::HostSynced => {
        if self.is_connected() {
          debug!("Host synced while connected");
          return Ok(());
        }
        info!("Host synced, advertising");
        self.restart_advertising()
      }
      GapEvent::MtuUpdate { handle, mtu } => {
        match &mut self.state {
          ConnectionState::Connected(connection) if connection.handle() == handle => {
            info!("MTU changed on {handle}: mtu={mtu}");
            connection.set_mtu(mtu);
          }
          _ => debug!("Ignoring MTU update for stale connection {handle}"),
        }
        Ok(())
      }
    }
  }

  fn on_connected(&mut self, handle: ConnectionHandle) {
    if let Some(current) = self.connection() {
      warn!("Ignoring connection {handle}, already connected on {}", current.handle());
      return;
    }

    info!("Accepted incoming connection {handle}");
    // Stacks end advertising when they accept a connection.
    self.advertising.mark_stopped();
    self.state = ConnectionState::Connected(Connection::new(handle));
  }

  fn on_disconnected(&mut self, handle: ConnectionHandle, reason: BluetoothError) -> Outcome<A> {
    match self.connection().map(|c| c.handle()) {
      Some(current) if current == handle => {
        info!("Disconnection from {handle}: reason={reason}");
        self.state = ConnectionState::Idle;
        self.restart_advertising()
      }
      Some(current) => {
        warn!("Ignoring disconnect of {handle}, connected on {current}");
        Ok(())
      }
      None if self.advertising.is_active() => {
        warn!("Disconnect of {handle} while not connected");
        Ok(())
      }
      None => {
        warn!("Disconnect of {handle} while not connected, advertising is down");
        self.restart_advertising()
      }
    }
  }

  fn restart_advertising(&mut self) -> Outcome<A> {
    match self.advertising.start() {
      Ok(()) => {
        self.state = ConnectionState::Advertising;
        Ok(())
      }
      Err(e) => {
        error!("Advertising start failed: {e}");
        self.state = ConnectionState::Idle;
        Err(e)
      }
    }
  }
}
