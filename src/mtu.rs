use core::fmt::{Display, Formatter};

/// ATT header bytes that every PDU spends before the payload.
const ATT_HEADER_LEN: u16 = 3;

/// Holder type to clarify a frequent gotcha with BLE around the true ATT MTU size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mtu {
  negotiated_mtu: u16,
}

impl Mtu {
  /// MTU every connection starts with until the client negotiates a larger one.
  pub const DEFAULT: Mtu = Mtu { negotiated_mtu: 23 };

  pub fn new(negotiated_mtu: u16) -> Self {
    Self { negotiated_mtu }
  }

  /// The negotiated value for the _total_ ATT PDU, header included.
  pub fn negotiated_value(&self) -> u16 {
    self.negotiated_mtu
  }

  /// The largest attribute value that fits in a single PDU.
  pub fn usable_value(&self) -> u16 {
    self.negotiated_mtu.saturating_sub(ATT_HEADER_LEN)
  }
}

impl Default for Mtu {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl Display for Mtu {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}", self.negotiated_mtu)
  }
}
