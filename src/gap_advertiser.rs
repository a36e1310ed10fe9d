use core::fmt::Debug;

use crate::advertisement::AdvertisementRequest;

/// Advertising half of the host stack.  Calls are synchronous requests; completion of an
/// advertisement (timeout, connection) is reported later as a
/// [crate::gap_event::GapEvent].
pub trait GapAdvertiser {
  type SystemError: Debug;

  /// Configure the payload and begin advertising.  Most stacks refuse this while an
  /// advertisement is already running, see [crate::advertising_controller::AdvertisingController].
  fn start_advertising(&mut self, request: &AdvertisementRequest) -> Result<(), Self::SystemError>;

  /// Stop the running advertisement.  Stopping when the stack has already ended advertising
  /// on its own (connection, timeout) must succeed: implementations map their "not
  /// advertising" status to `Ok`.
  fn stop_advertising(&mut self) -> Result<(), Self::SystemError>;

  /// Transmit power the controller will advertise with, in dBm.
  fn tx_power_level(&mut self) -> Result<i8, Self::SystemError>;
}
