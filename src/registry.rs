use core::fmt::{Display, Formatter};

use log::debug;

use crate::descriptors::{AttributeHandle, GattCharacteristic, GattService, UUID};

/// Upper bound on characteristics across all registered services.
pub const MAX_CHARACTERISTICS: usize = 16;

/// Immutable table of every service this peripheral exposes, validated once and then only
/// ever read.  Handles are laid out the way the host stack assigns them: each service
/// declaration takes one handle, and each characteristic takes a declaration handle followed
/// by its value handle.
#[derive(Debug)]
pub struct AttributeRegistry<'a> {
  services: &'a [GattService<'a>],
  entries: heapless::Vec<HandleEntry<'a>, MAX_CHARACTERISTICS>,
}

#[derive(Debug, Clone, Copy)]
pub struct HandleEntry<'a> {
  pub service_uuid: UUID,
  pub value_handle: AttributeHandle,
  pub characteristic: &'a GattCharacteristic<'a>,
}

impl<'a> AttributeRegistry<'a> {
  pub fn new(services: &'a [GattService<'a>], first_handle: u16) -> Result<Self, RegistryError> {
    let mut next = first_handle;
    if next == 0 {
      return Err(RegistryError::InvalidFirstHandle);
    }

    let mut entries = heapless::Vec::<HandleEntry<'a>, MAX_CHARACTERISTICS>::new();
    for service in services {
      debug!("Laying out service {} at handle {next}", service.uuid);
      next = advance(next, 1)?;

      for characteristic in service.characteristics {
        let duplicate = entries.iter().find(|e| e.characteristic.uuid == characteristic.uuid);
        if let Some(existing) = duplicate {
          return Err(RegistryError::DuplicateCharacteristic {
            first_service: existing.service_uuid,
            second_service: service.uuid,
            characteristic: characteristic.uuid,
          });
        }

        let value_handle = AttributeHandle::new(advance(next, 1)?)
          .ok_or(RegistryError::HandleSpaceExhausted)?;
        next = advance(next, 2)?;

        entries
          .push(HandleEntry {
            service_uuid: service.uuid,
            value_handle,
            characteristic,
          })
          .map_err(|_| RegistryError::CapacityExceeded)?;
      }
    }

    Ok(Self { services, entries })
  }

  pub fn services(&self) -> &'a [GattService<'a>] {
    self.services
  }

  pub fn lookup(&self, uuid: UUID) -> Option<&'a GattCharacteristic<'a>> {
    self.entries.iter().find(|e| e.characteristic.uuid == uuid).map(|e| e.characteristic)
  }

  pub fn lookup_handle(&self, handle: AttributeHandle) -> Option<&'a GattCharacteristic<'a>> {
    self.entries.iter().find(|e| e.value_handle == handle).map(|e| e.characteristic)
  }

  pub fn handle_of(&self, uuid: UUID) -> Option<AttributeHandle> {
    self.entries.iter().find(|e| e.characteristic.uuid == uuid).map(|e| e.value_handle)
  }

  /// Value handles in table order, as the host stack is expected to report them.
  pub fn handle_mapping(&self) -> impl Iterator<Item = (UUID, AttributeHandle)> + '_ {
    self.entries.iter().map(|e| (e.characteristic.uuid, e.value_handle))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn advance(handle: u16, by: u16) -> Result<u16, RegistryError> {
  handle.checked_add(by).ok_or(RegistryError::HandleSpaceExhausted)
}

/// Attribute table misconfiguration.  These are build-time mistakes and the peripheral must
/// not come up with a table that produced one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegistryError {
  DuplicateCharacteristic {
    first_service: UUID,
    second_service: UUID,
    characteristic: UUID,
  },
  CapacityExceeded,
  HandleSpaceExhausted,
  InvalidFirstHandle,
}

impl Display for RegistryError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      RegistryError::DuplicateCharacteristic {
        first_service,
        second_service,
        characteristic,
      } => write!(
        f,
        "characteristic {characteristic} registered twice \
         (services {first_service} and {second_service})"
      ),
      RegistryError::CapacityExceeded => {
        write!(f, "more than {MAX_CHARACTERISTICS} characteristics registered")
      }
      RegistryError::HandleSpaceExhausted => write!(f, "attribute handle space exhausted"),
      RegistryError::InvalidFirstHandle => write!(f, "attribute handle 0 is reserved"),
    }
  }
}
