use core::fmt::{Display, Formatter};

use crate::mtu::Mtu;

/// Identifier the host stack gives a peer session.  Only meaningful while that session is up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionHandle(pub u16);

impl Display for ConnectionHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// The connected peer as seen from the peripheral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
  handle: ConnectionHandle,
  mtu: Mtu,
}

impl Connection {
  pub fn new(handle: ConnectionHandle) -> Self {
    Self {
      handle,
      mtu: Mtu::DEFAULT,
    }
  }

  pub fn handle(&self) -> ConnectionHandle {
    self.handle
  }

  pub fn mtu(&self) -> Mtu {
    self.mtu
  }

  pub(crate) fn set_mtu(&mut self, mtu: Mtu) {
    self.mtu = mtu;
  }
}
