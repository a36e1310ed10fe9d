use core::fmt::{Debug, Formatter};

use crate::descriptors::uuid::UUID;
use enumset::EnumSet;

/// Source of a characteristic's value.  Producers must be pure: the same bytes are returned
/// on every call and producing them has no side effects, which is what allows the attribute
/// table to be shared between threads without locking.
pub trait ValueProducer: Sync {
  fn produce(&self) -> &[u8];
}

impl ValueProducer for &'static str {
  fn produce(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl ValueProducer for &'static [u8] {
  fn produce(&self) -> &[u8] {
    self
  }
}

impl ValueProducer for fn() -> &'static [u8] {
  fn produce(&self) -> &[u8] {
    (self)()
  }
}

pub struct GattCharacteristic<'a> {
  pub uuid: UUID,
  pub properties: EnumSet<GattCharacteristicProperty>,
  pub permissions: EnumSet<GattCharacteristicPermission>,
  pub value: &'a dyn ValueProducer,
}

impl<'a> GattCharacteristic<'a> {
  /// Characteristic that can only ever be read, which is the only kind this peripheral serves.
  pub fn read_only(uuid: UUID, value: &'a dyn ValueProducer) -> Self {
    Self {
      uuid,
      properties: EnumSet::only(GattCharacteristicProperty::Read),
      permissions: EnumSet::only(GattCharacteristicPermission::Read),
      value,
    }
  }

  pub fn is_readable(&self) -> bool {
    self.properties.contains(GattCharacteristicProperty::Read)
      && self.permissions.contains(GattCharacteristicPermission::Read)
  }
}

impl<'a> Debug for GattCharacteristic<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("GattCharacteristic")
      .field("uuid", &self.uuid)
      .field("properties", &self.properties)
      .field("permissions", &self.permissions)
      .field("value_len", &self.value.produce().len())
      .finish()
  }
}

#[derive(Debug, enumset::EnumSetType)]
pub enum GattCharacteristicProperty {
  Broadcast,
  ExtendedProps,
  Indicate,
  Notify,
  Read,
  Write,
  WriteSigned,
  WriteNoResponse,
}

#[derive(Debug, enumset::EnumSetType)]
pub enum GattCharacteristicPermission {
  Read,
  ReadEncrypted,
  Write,
  WriteEncrypted,
  WriteEncryptedMitm,
  WriteSigned,
  WriteSignedMitm,
}
