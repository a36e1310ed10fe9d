use core::fmt::{Display, Formatter};
use core::ops::Deref;
use core::time::Duration;

/// Legacy advertising PDUs carry at most this many bytes of AD structures.
pub const MAX_ADVERTISEMENT_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementRequest {
  pub params: AdvertisementParams,
  pub payload: AdvertisementPayload,
  pub scan_response_payload: Option<ScanResponsePayload>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[allow(clippy::manual_non_exhaustive)]
pub struct AdvertisementParams {
  /// Can a peer connect to us, and using what mechanism?
  pub connect_mode: ConnectMode,

  pub discover_mode: DiscoverMode,

  /// Minimum advertising interval to be used by the advertising set.  `None` leaves the choice
  /// to the host stack.
  pub interval_min: Option<Duration>,

  /// Maximum advertising interval to be used by the advertising set.
  pub interval_max: Option<Duration>,

  /// How long to advertise before the stack reports completion.  `None` means forever.
  pub duration: Option<Duration>,

  // Not using #[non_exhaustive] because it doesn't support construction using
  // `..Default::default()`.
  #[doc(hidden)]
  _non_exhaustive: (),
}

/// Whether and how this peripheral is connectable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ConnectMode {
  /// Connections from any address are allowed.
  #[default]
  Undirected = 0b0000,

  /// Connections are allowed only from a specific address.
  Directed = 0b0001,

  /// Connections are not allowed.
  None = 0b0010,
}

pub type AdvertisementPayloadBuilder = RawAdvertisementBuilder<MAX_ADVERTISEMENT_LEN>;

/// Helper to facilitate creating correctly structured advertisement PDUs.
#[derive(Debug, Default, Clone)]
pub struct RawAdvertisementBuilder<const N: usize> {
  raw: heapless::Vec<u8, N>,
  flags: Option<u8>,
  has_set_flags: bool,
}

impl<const N: usize> RawAdvertisementBuilder<N> {
  pub fn new() -> Self {
    Default::default()
  }

  /// Set the discover mode.
  pub fn set_discover_mode(mut self, discover_mode: DiscoverMode) -> Self {
    let flags = self.flags.get_or_insert(0);
    *flags = (*flags & !DISCOVER_MODE_MASK) | (discover_mode as u8 & DISCOVER_MODE_MASK);
    self
  }

  /// Indicate that Bluetooth Classic (BR/EDR) is _NOT_ supported.
  pub fn set_classic_not_supported(mut self, classic_not_supported: bool) -> Self {
    let flags = self.flags.get_or_insert(0);
    if classic_not_supported {
      *flags |= CLASSIC_NOT_SUPPORTED_MASK;
    } else {
      *flags &= !CLASSIC_NOT_SUPPORTED_MASK;
    }
    self
  }

  /// Advertised transmit power in dBm, letting centrals estimate path loss.
  pub fn push_tx_power_level(self, dbm: i8) -> Result<Self, PushError> {
    self.push_raw_ad_type(AdType::TxPowerLevel as _, &dbm.to_le_bytes())
  }

  /// Push the local name.  A shortened name tells centrals to read the full one from the GAP
  /// service after connecting; the complete name is final.
  pub fn push_local_name(self, name: &str, complete: bool) -> Result<Self, PushError> {
    let ad_type = if complete {
      AdType::CompleteLocalName
    } else {
      AdType::ShortLocalName
    };
    self.push_raw_ad_type(ad_type as _, name.as_bytes())
  }

  pub fn push_raw_ad_type(mut self, ad_type: u8, data: &[u8]) -> Result<Self, PushError> {
    self = self.push_start_record(ad_type, data.len())?;
    self.raw.extend_from_slice(data).map_err(|_| PushError::CapacityExceeded)?;

    if ad_type == AdType::Flags as _ {
      self.has_set_flags = true;
    }

    Ok(self)
  }

  fn push_start_record(mut self, ad_type: u8, remaining_size: usize) -> Result<Self, PushError> {
    if ad_type != AdType::Flags as _ {
      self = self.flush_pending_record()?;
    }

    if self.raw.len() + 2 + remaining_size > N {
      return Err(PushError::CapacityExceeded);
    }

    let length = u8::try_from(remaining_size + 1).map_err(|_| PushError::CapacityExceeded)?;
    self.raw.push(length).map_err(|_| PushError::CapacityExceeded)?;
    self.raw.push(ad_type).map_err(|_| PushError::CapacityExceeded)?;
    Ok(self)
  }

  pub fn build(mut self) -> Result<RawAdvertisement<N>, PushError> {
    self = self.ensure_defaults_set()?;
    self = self.flush_pending_record()?;
    Ok(RawAdvertisement(self.raw))
  }

  fn flush_pending_record(mut self) -> Result<Self, PushError> {
    if let Some(flags) = self.flags.take() {
      self = self.push_raw_ad_type(AdType::Flags as _, &[flags])?;
    }
    Ok(self)
  }

  fn ensure_defaults_set(mut self) -> Result<Self, PushError> {
    if !self.has_set_flags && self.flags.is_none() {
      self = self.set_discover_mode(DiscoverMode::General);
      self = self.set_classic_not_supported(true);
    }
    Ok(self)
  }
}

/// Advertisements consist of one or more ad type units in a TLV-style format (but actually it's
/// LTV).  Only the types this peripheral advertises are listed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum AdType {
  Flags = 0x01,
  ShortLocalName = 0x08,
  CompleteLocalName = 0x09,
  TxPowerLevel = 0x0a,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PushError {
  CapacityExceeded,
}

impl Display for PushError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      PushError::CapacityExceeded => write!(f, "advertisement capacity exceeded"),
    }
  }
}

const DISCOVER_MODE_MASK: u8 = 0b0000_0011;
const CLASSIC_NOT_SUPPORTED_MASK: u8 = 0b0000_0100;

/// Whether and how this peripheral is discovered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DiscoverMode {
  /// This device can only be discovered when a central device is following the limited
  /// discovery procedure.
  Limited = 0b0000_0001,

  /// General discovery.  This is the normal discovery mode that most customers would use.
  #[default]
  General = 0b0000_0010,

  /// Device is not discoverable (whether the device is connectable is determined independently).
  None = 0b0000_0000,
}

/// Represents the raw payload for an advertisement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAdvertisement<const N: usize>(pub heapless::Vec<u8, N>);

impl<const N: usize> Deref for RawAdvertisement<N> {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

pub type AdvertisementPayload = RawAdvertisement<MAX_ADVERTISEMENT_LEN>;
pub type ScanResponsePayload = RawAdvertisement<MAX_ADVERTISEMENT_LEN>;
