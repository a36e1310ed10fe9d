//! The standard Device Information Service, reduced to the two strings this peripheral
//! exposes.

use crate::config::DeviceConfig;
use crate::descriptors::{GattCharacteristic, GattService, UUID};

/// Device Information Service (assigned number 0x180A).
pub const DEVICE_INFORMATION_SERVICE_UUID: UUID = UUID::Short(0x180a);

/// Manufacturer Name String characteristic (assigned number 0x2A29).
pub const MANUFACTURER_NAME_UUID: UUID = UUID::Short(0x2a29);

/// Model Number String characteristic (assigned number 0x2A24).
pub const MODEL_NUMBER_UUID: UUID = UUID::Short(0x2a24);

pub const DEVICE_INFORMATION_CHARACTERISTICS: usize = 2;

/// Build the fixed characteristic table.  The values borrow from `config` so the table lives
/// exactly as long as the configuration it was built from.
pub fn characteristics(
  config: &DeviceConfig,
) -> [GattCharacteristic<'_>; DEVICE_INFORMATION_CHARACTERISTICS] {
  [
    GattCharacteristic::read_only(MANUFACTURER_NAME_UUID, &config.manufacturer_name),
    GattCharacteristic::read_only(MODEL_NUMBER_UUID, &config.model_number),
  ]
}

pub fn service<'a>(characteristics: &'a [GattCharacteristic<'a>]) -> GattService<'a> {
  GattService::primary(DEVICE_INFORMATION_SERVICE_UUID, characteristics)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptors::GattServiceType;

  #[test]
  pub fn test_table_order_and_values() {
    let config = DeviceConfig::DEFAULT;
    let chars = characteristics(&config);
    let service = service(&chars);

    assert_eq!(service.uuid, UUID::Short(0x180a));
    assert_eq!(service.service_type, GattServiceType::Primary);
    assert_eq!(service.characteristics[0].uuid, UUID::Short(0x2a29));
    assert_eq!(service.characteristics[0].value.produce(), b"Artio");
    assert_eq!(service.characteristics[1].uuid, UUID::Short(0x2a24));
    assert_eq!(service.characteristics[1].value.produce(), b"Zero");
    assert!(service.characteristics.iter().all(|c| c.is_readable()));
  }
}
