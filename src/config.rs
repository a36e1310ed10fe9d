use crate::advertising_controller::{AdvertisingConfig, TxPowerLevel};
use crate::dispatcher::InvariantPolicy;

/// Compiled-in configuration of the peripheral.  Nothing is loaded at run time; integrators
/// that want a different identity construct their own value starting from
/// [DeviceConfig::DEFAULT].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
  /// Complete local name placed in the advertisement and handed to the GAP service.
  pub device_name: &'static str,

  /// Value of the Manufacturer Name String characteristic.
  pub manufacturer_name: &'static str,

  /// Value of the Model Number String characteristic.
  pub model_number: &'static str,

  pub tx_power: TxPowerLevel,

  /// Handle the host stack will give to our first service declaration.
  pub first_handle: u16,

  pub invariant_policy: InvariantPolicy,
}

impl DeviceConfig {
  pub const DEFAULT: DeviceConfig = DeviceConfig {
    device_name: "blehr_sensor_1.0",
    manufacturer_name: "Artio",
    model_number: "Zero",
    tx_power: TxPowerLevel::Auto,
    first_handle: 1,
    invariant_policy: InvariantPolicy::DEFAULT,
  };

  pub fn advertising(&self) -> AdvertisingConfig {
    AdvertisingConfig {
      device_name: self.device_name,
      tx_power: self.tx_power,
      ..Default::default()
    }
  }
}

impl Default for DeviceConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}
