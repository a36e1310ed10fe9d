use core::fmt::Debug;

use crate::bluetooth_address::BluetoothAddress;
use crate::gap_advertiser::GapAdvertiser;
use crate::registry::AttributeRegistry;

/// The host stack as seen by the peripheral logic.  Radio bring-up, ATT framing and MTU
/// negotiation all live behind this trait; implementations deliver their events to a
/// [crate::gap_event::GapEventHandler] and route attribute reads to
/// [crate::server::DeviceInfoServer::on_attribute_read].
///
/// The implementation should be embedded friendly as it is common for BLE peripherals to run on
/// embedded platforms.
pub trait Peripheral {
  type SystemError: Debug;

  type Advertiser: GapAdvertiser<SystemError = Self::SystemError> + Debug;

  /// Sets the device name that can be read from the built-in GAP service after connection.
  fn set_name(&mut self, name: &str) -> Result<(), Self::SystemError>;

  /// Register the attribute table.  Called exactly once, before advertising starts.  The
  /// stack must assign value handles as laid out by [AttributeRegistry::handle_mapping].
  fn register_services(
    &mut self,
    registry: &AttributeRegistry<'_>,
  ) -> Result<(), Self::SystemError>;

  /// Address we advertise with.  Only used for logging.
  fn local_address(&self) -> Result<BluetoothAddress, Self::SystemError>;

  fn advertiser(&mut self) -> Self::Advertiser;
}
