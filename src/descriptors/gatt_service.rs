use crate::descriptors::gatt_characteristic::GattCharacteristic;
use crate::descriptors::uuid::UUID;

/// A service and its characteristics in registration order.  The order matters only to the
/// host stack, which hands out attribute handles walking the table front to back.
#[derive(Debug)]
pub struct GattService<'a> {
  pub uuid: UUID,
  pub service_type: GattServiceType,
  pub characteristics: &'a [GattCharacteristic<'a>],
}

impl<'a> GattService<'a> {
  pub fn primary(uuid: UUID, characteristics: &'a [GattCharacteristic<'a>]) -> Self {
    Self {
      uuid,
      service_type: GattServiceType::Primary,
      characteristics,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GattServiceType {
  Primary,
  Secondary,
}
