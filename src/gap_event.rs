use crate::bluetooth_error::BluetoothError;
use crate::gatt_connection::ConnectionHandle;
use crate::mtu::Mtu;

/// Sink for GAP events from the host stack.  Events are delivered one at a time, in order,
/// from a single thread.
pub trait GapEventHandler {
  fn on_event(&mut self, event: GapEvent);
}

impl<F> GapEventHandler for F
where
  F: FnMut(GapEvent),
{
  fn on_event(&mut self, event: GapEvent) {
    (self)(event)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapEvent {
  /// A connection was established or an attempt to establish one failed.  Either way the
  /// advertisement that led to it is over.
  Connect {
    result: Result<ConnectionHandle, BluetoothError>,
  },

  /// The peer went away.
  Disconnect {
    handle: ConnectionHandle,
    reason: BluetoothError,
  },

  /// Advertising ended without a connection.
  AdvertisementComplete { reason: AdvStopReason },

  /// MTU negotiation has completed on a connection.
  MtuUpdate { handle: ConnectionHandle, mtu: Mtu },

  /// The host stack reset itself.  Any connection and advertisement are gone and no request
  /// may be made until [GapEvent::HostSynced].  `reason` is the stack's own error code.
  HostReset { reason: i32 },

  /// The host stack is in sync with the controller, at boot and after every reset.
  HostSynced,
}

impl GapEvent {
  /// Decode the status/handle pair most stacks report for connection attempts, where a
  /// status of zero means success.
  pub fn connect(status: u8, handle: u16) -> Self {
    let result = match status {
      0 => Ok(ConnectionHandle(handle)),
      s => Err(BluetoothError::from(s)),
    };
    GapEvent::Connect { result }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdvStopReason {
  /// The advertising duration elapsed.
  Timeout,

  /// The stack cancelled advertising, e.g. at another layer's request.
  Cancelled,
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  #[test]
  pub fn test_connect_status_decoding() {
    assert_eq!(
      GapEvent::connect(0, 7),
      GapEvent::Connect { result: Ok(ConnectionHandle(7)) }
    );
    assert_eq!(
      GapEvent::connect(0x3e, 7),
      GapEvent::Connect { result: Err(BluetoothError::FailedToEstablish) }
    );
  }

  #[test]
  pub fn test_closure_as_handler() {
    let mut seen = Vec::new();
    {
      let mut handler = |event: GapEvent| seen.push(event);
      handler.on_event(GapEvent::AdvertisementComplete { reason: AdvStopReason::Timeout });
    }
    assert_eq!(seen, [GapEvent::AdvertisementComplete { reason: AdvStopReason::Timeout }]);
  }
}
