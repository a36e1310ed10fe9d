use core::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum UUID {
  /// For use only with SIG defined services (i.e. registered and publicly well known services).
  Short(u16),

  /// All other BLE UUIDs must be 128-bit
  Long(u128),
}

impl UUID {
  pub fn as_u128(&self) -> u128 {
    match *self {
      UUID::Short(u) => u.into(),
      UUID::Long(u) => u,
    }
  }

  /// Number of bytes this UUID occupies on the wire.
  pub fn encoded_len(&self) -> usize {
    match self {
      UUID::Short(_) => 2,
      UUID::Long(_) => 16,
    }
  }

  /// Append the little-endian wire encoding.
  pub fn push_into<const N: usize>(&self, raw: &mut heapless::Vec<u8, N>) -> Result<(), ()> {
    match self {
      UUID::Short(u) => raw.extend_from_slice(&u.to_le_bytes()),
      UUID::Long(u) => raw.extend_from_slice(&u.to_le_bytes()),
    }
  }
}

impl Display for UUID {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      UUID::Short(u) => write!(f, "0x{u:04X}"),
      UUID::Long(u) => write!(f, "0x{u:032X}"),
    }
  }
}
