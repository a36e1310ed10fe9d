use core::fmt::Display;
use core::fmt::Formatter;
use core::num::NonZeroU16;

/// Run-time address of an attribute as assigned by the host stack.  Handle `0` is reserved
/// by the protocol which is why this can't be constructed from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttributeHandle(pub NonZeroU16);

impl AttributeHandle {
  pub fn new(raw: u16) -> Option<Self> {
    NonZeroU16::new(raw).map(Self)
  }

  pub fn get(&self) -> u16 {
    self.0.get()
  }
}

impl Display for AttributeHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{:?}", self.0)
  }
}
