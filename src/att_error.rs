use core::fmt::{Display, Formatter};

/// Attribute protocol error codes as carried in an ATT Error Response.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum AttError {
  InvalidHandle = 0x01,
  ReadNotPermitted = 0x02,
  WriteNotPermitted = 0x03,
  InvalidPdu = 0x04,
  InsufficientAuthentication = 0x05,
  RequestNotSupported = 0x06,
  InvalidOffset = 0x07,
  InsufficientAuthorization = 0x08,
  PrepareQueueFull = 0x09,
  AttributeNotFound = 0x0A,
  AttributeTooLong = 0x0B,
  InsufficientKeySize = 0x0C,
  InvalidAttributeValueLength = 0x0D,
  Unlikely = 0x0E,
  InsufficientEncryption = 0x0F,
  UnsupportedGroupType = 0x10,
  InsufficientResources = 0x11,
}

impl AttError {
  pub fn code(self) -> u8 {
    self as u8
  }
}

impl From<AttError> for u8 {
  fn from(value: AttError) -> Self {
    value.code()
  }
}

impl Display for AttError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{self:?} (0x{:02x})", self.code())
  }
}
