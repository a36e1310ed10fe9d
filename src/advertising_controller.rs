use core::fmt::{Debug, Display, Formatter};

use log::{debug, info};

use crate::advertisement::{
  AdvertisementParams, AdvertisementPayload, AdvertisementPayloadBuilder, AdvertisementRequest,
  PushError, MAX_ADVERTISEMENT_LEN,
};
use crate::gap_advertiser::GapAdvertiser;

/// Flags record (3 bytes), tx power record (3 bytes) and the name record header (2 bytes)
/// leave this much room for the name.
pub const MAX_DEVICE_NAME_LEN: usize = MAX_ADVERTISEMENT_LEN - 3 - 3 - 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TxPowerLevel {
  /// Ask the controller at advertising time.
  #[default]
  Auto,
  Fixed(i8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisingConfig {
  pub device_name: &'static str,
  pub tx_power: TxPowerLevel,
  pub params: AdvertisementParams,
}

impl Default for AdvertisingConfig {
  fn default() -> Self {
    Self {
      device_name: crate::config::DeviceConfig::DEFAULT.device_name,
      tx_power: TxPowerLevel::Auto,
      params: Default::default(),
    }
  }
}

/// Owns the one advertisement this peripheral may have running.  The payload is fixed at
/// construction; only the tx power level is resolved per start.
#[derive(Debug)]
pub struct AdvertisingController<A> {
  advertiser: A,
  config: AdvertisingConfig,
  active: bool,
}

impl<A: GapAdvertiser> AdvertisingController<A> {
  /// Validates the configuration up front so a name that can't be advertised is rejected
  /// before anything reaches the radio.
  pub fn new(
    advertiser: A,
    config: AdvertisingConfig,
  ) -> Result<Self, AdvertisingError<A::SystemError>> {
    if config.device_name.is_empty() {
      return Err(AdvertisingError::EmptyName);
    }
    build_payload::<A::SystemError>(&config, 0)?;

    Ok(Self {
      advertiser,
      config,
      active: false,
    })
  }

  /// Begin connectable, general discoverable advertising.  Any advertisement already running
  /// is stopped first.  Failures are returned as-is; retrying is up to the caller.
  pub fn start(&mut self) -> Result<(), AdvertisingError<A::SystemError>> {
    if self.active {
      debug!("Stopping active advertisement before restart");
      self.advertiser.stop_advertising().map_err(AdvertisingError::System)?;
      self.active = false;
    }

    let dbm = match self.config.tx_power {
      TxPowerLevel::Auto => self.advertiser.tx_power_level().map_err(AdvertisingError::System)?,
      TxPowerLevel::Fixed(dbm) => dbm,
    };

    let request = AdvertisementRequest {
      params: self.config.params.clone(),
      payload: build_payload::<A::SystemError>(&self.config, dbm)?,
      scan_response_payload: None,
    };
    self.advertiser.start_advertising(&request).map_err(AdvertisingError::System)?;
    self.active = true;

    info!("Advertising as {:?} (tx_power={dbm}dBm)", self.config.device_name);
    Ok(())
  }

  /// Record that the stack ended the advertisement on its own (a connection was accepted or
  /// the advertising duration elapsed).
  pub fn mark_stopped(&mut self) {
    self.active = false;
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn config(&self) -> &AdvertisingConfig {
    &self.config
  }

  pub fn advertiser(&self) -> &A {
    &self.advertiser
  }
}

fn build_payload<E>(
  config: &AdvertisingConfig,
  dbm: i8,
) -> Result<AdvertisementPayload, AdvertisingError<E>> {
  let name_too_long = |_: PushError| AdvertisingError::NameTooLong {
    len: config.device_name.len(),
    max: MAX_DEVICE_NAME_LEN,
  };

  AdvertisementPayloadBuilder::new()
    .set_discover_mode(config.params.discover_mode)
    .set_classic_not_supported(true)
    .push_tx_power_level(dbm)
    .and_then(|b| b.push_local_name(config.device_name, true))
    .and_then(|b| b.build())
    .map_err(name_too_long)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvertisingError<E> {
  EmptyName,

  /// The complete name doesn't fit in the advertisement.  It is never truncated.
  NameTooLong { len: usize, max: usize },

  /// The host stack refused the request.
  System(E),
}

impl<E: Debug> Display for AdvertisingError<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      AdvertisingError::EmptyName => write!(f, "device name is empty"),
      AdvertisingError::NameTooLong { len, max } => {
        write!(f, "device name is {len} bytes, at most {max} fit in the advertisement")
      }
      AdvertisingError::System(e) => write!(f, "host stack error: {e:?}"),
    }
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec;
  use alloc::vec::Vec;

  use super::*;
  use crate::advertisement::tests::{AdRecord, AdRecordIter};
  use crate::advertisement::{AdType, ConnectMode, DiscoverMode};
  use crate::testing::{AdvertiserCall, MockAdvertiser, MockError};

  fn config(name: &'static str) -> AdvertisingConfig {
    AdvertisingConfig {
      device_name: name,
      ..Default::default()
    }
  }

  #[test]
  pub fn test_payload_contents() {
    let advertiser = MockAdvertiser::new();
    let mut controller =
      AdvertisingController::new(advertiser.clone(), config("blehr_sensor_1.0")).unwrap();
    controller.start().unwrap();

    let request = advertiser.last_request().unwrap();
    assert_eq!(request.params.connect_mode, ConnectMode::Undirected);
    assert_eq!(request.params.discover_mode, DiscoverMode::General);
    assert_eq!(request.params.duration, None);

    let records: Vec<_> = AdRecordIter::new(&request.payload).collect();
    assert_eq!(
      records,
      vec![
        AdRecord::new(AdType::Flags, &[0x06]),
        AdRecord::new(AdType::TxPowerLevel, &[MockAdvertiser::TX_POWER as u8]),
        AdRecord::new(AdType::CompleteLocalName, b"blehr_sensor_1.0"),
      ]
    );
  }

  #[test]
  pub fn test_fixed_tx_power_skips_controller_query() {
    let advertiser = MockAdvertiser::new();
    let config = AdvertisingConfig {
      tx_power: TxPowerLevel::Fixed(4),
      ..config("fixed")
    };
    let mut controller = AdvertisingController::new(advertiser.clone(), config).unwrap();
    controller.start().unwrap();

    assert_eq!(advertiser.calls(), vec![AdvertiserCall::Start]);
    let records: Vec<_> = AdRecordIter::new(&advertiser.last_request().unwrap().payload).collect();
    assert_eq!(records[1], AdRecord::new(AdType::TxPowerLevel, &[4]));
  }

  #[test]
  pub fn test_name_length_limits() {
    let longest = "abcdefghijklmnopqrstuvw";
    assert_eq!(longest.len(), MAX_DEVICE_NAME_LEN);
    assert!(AdvertisingController::new(MockAdvertiser::new(), config(longest)).is_ok());

    let too_long = config("abcdefghijklmnopqrstuvwx");
    let err = AdvertisingController::new(MockAdvertiser::new(), too_long).unwrap_err();
    assert_eq!(err, AdvertisingError::NameTooLong { len: 24, max: MAX_DEVICE_NAME_LEN });

    let err = AdvertisingController::new(MockAdvertiser::new(), config("")).unwrap_err();
    assert_eq!(err, AdvertisingError::EmptyName);
  }

  #[test]
  pub fn test_restart_supersedes_active_advertisement() {
    let advertiser = MockAdvertiser::new();
    let mut controller = AdvertisingController::new(advertiser.clone(), config("dup")).unwrap();

    controller.start().unwrap();
    controller.start().unwrap();

    assert!(controller.is_active());
    assert_eq!(advertiser.active_count(), 1);
    assert_eq!(
      advertiser.calls(),
      vec![
        AdvertiserCall::TxPowerLevel,
        AdvertiserCall::Start,
        AdvertiserCall::Stop,
        AdvertiserCall::TxPowerLevel,
        AdvertiserCall::Start,
      ]
    );
  }

  #[test]
  pub fn test_start_after_mark_stopped_does_not_stop() {
    let advertiser = MockAdvertiser::new();
    let mut controller = AdvertisingController::new(advertiser.clone(), config("x")).unwrap();

    controller.start().unwrap();
    advertiser.stack_stopped();
    controller.mark_stopped();
    controller.start().unwrap();

    assert!(!advertiser.calls().contains(&AdvertiserCall::Stop));
    assert_eq!(advertiser.active_count(), 1);
  }

  #[test]
  pub fn test_start_failure_is_surfaced() {
    let advertiser = MockAdvertiser::new();
    let mut controller = AdvertisingController::new(advertiser.clone(), config("x")).unwrap();

    advertiser.fail_next_start();
    assert_eq!(controller.start(), Err(AdvertisingError::System(MockError::StartRefused)));
    assert!(!controller.is_active());
    assert_eq!(advertiser.active_count(), 0);

    controller.start().unwrap();
    assert!(controller.is_active());
  }
}
