use core::fmt::{Display, Formatter};

use log::{error, trace, warn};

use crate::att_error::AttError;
use crate::descriptors::{AttributeHandle, GattCharacteristic, UUID};
use crate::registry::AttributeRegistry;

/// Destination for an attribute value, normally supplied by the transport.  Appends are
/// all-or-nothing: a value that doesn't fit leaves the buffer exactly as it was.
pub trait ReadBuffer {
  fn append(&mut self, data: &[u8]) -> Result<(), CapacityError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CapacityError;

impl<const N: usize> ReadBuffer for heapless::Vec<u8, N> {
  fn append(&mut self, data: &[u8]) -> Result<(), CapacityError> {
    // heapless checks the capacity before copying anything.
    self.extend_from_slice(data).map_err(|_| CapacityError)
  }
}

/// What to do when the host stack asks for an attribute that isn't in the table.  That can
/// only happen if the stack and the registry disagree, so it is a defect rather than bad input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvariantPolicy {
  /// Panic at the point of detection.
  Abort,

  /// Log the violation and answer the read with an error.
  Report,
}

impl InvariantPolicy {
  #[cfg(debug_assertions)]
  pub const DEFAULT: InvariantPolicy = InvariantPolicy::Abort;

  #[cfg(not(debug_assertions))]
  pub const DEFAULT: InvariantPolicy = InvariantPolicy::Report;
}

impl Default for InvariantPolicy {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Answers read requests by looking characteristics up in the registry.  Dispatch never
/// branches on a particular identifier, so new characteristics only touch the table.
#[derive(Debug, Clone, Copy)]
pub struct AttributeAccessDispatcher<'r> {
  registry: &'r AttributeRegistry<'r>,
  policy: InvariantPolicy,
}

impl<'r> AttributeAccessDispatcher<'r> {
  pub fn new(registry: &'r AttributeRegistry<'r>, policy: InvariantPolicy) -> Self {
    Self { registry, policy }
  }

  pub fn registry(&self) -> &'r AttributeRegistry<'r> {
    self.registry
  }

  pub fn read(&self, uuid: UUID, out: &mut impl ReadBuffer) -> Result<(), ReadError> {
    trace!("read uuid={uuid}");
    match self.registry.lookup(uuid) {
      Some(characteristic) => Self::read_characteristic(characteristic, out),
      None => Err(self.unknown(uuid)),
    }
  }

  /// Same as [Self::read] but addressed by the value handle the host stack assigned.
  pub fn read_handle(
    &self,
    handle: AttributeHandle,
    out: &mut impl ReadBuffer,
  ) -> Result<(), ReadError> {
    trace!("read handle={handle}");
    match self.registry.lookup_handle(handle) {
      Some(characteristic) => Self::read_characteristic(characteristic, out),
      None => Err(self.unknown(handle)),
    }
  }

  fn read_characteristic(
    characteristic: &GattCharacteristic<'_>,
    out: &mut impl ReadBuffer,
  ) -> Result<(), ReadError> {
    if !characteristic.is_readable() {
      warn!("Read of {} is not permitted", characteristic.uuid);
      return Err(ReadError::ReadNotPermitted);
    }

    out.append(characteristic.value.produce()).map_err(|_| {
      warn!("No room for the value of {}", characteristic.uuid);
      ReadError::InsufficientSpace
    })
  }

  fn unknown(&self, what: impl Display) -> ReadError {
    match self.policy {
      InvariantPolicy::Abort => panic!("read request for unregistered attribute {what}"),
      InvariantPolicy::Report => {
        error!("Read request for unregistered attribute {what}");
        ReadError::UnknownIdentifier
      }
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadError {
  /// The output buffer can't hold the value.
  InsufficientSpace,

  /// Nothing in the registry matches the request.
  UnknownIdentifier,

  ReadNotPermitted,
}

impl Display for ReadError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      ReadError::InsufficientSpace => write!(f, "insufficient space for attribute value"),
      ReadError::UnknownIdentifier => write!(f, "unknown attribute"),
      ReadError::ReadNotPermitted => write!(f, "read not permitted"),
    }
  }
}

/// Over the air only the coarse ATT status is visible.
impl From<ReadError> for AttError {
  fn from(value: ReadError) -> Self {
    match value {
      ReadError::InsufficientSpace => AttError::InsufficientResources,
      ReadError::UnknownIdentifier => AttError::Unlikely,
      ReadError::ReadNotPermitted => AttError::ReadNotPermitted,
    }
  }
}
