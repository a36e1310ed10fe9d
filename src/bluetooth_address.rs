use core::fmt::{Display, Formatter};

/// Six byte device address, stored little-endian as it appears on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BluetoothAddress(pub [u8; 6]);

impl BluetoothAddress {
  /// Construct from the conventional most-significant-first ordering.
  pub fn from_be_bytes(mut bytes: [u8; 6]) -> Self {
    bytes.reverse();
    Self(bytes)
  }
}

impl Display for BluetoothAddress {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    let b = &self.0;
    write!(
      f,
      "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
      b[5], b[4], b[3], b[2], b[1], b[0]
    )
  }
}
