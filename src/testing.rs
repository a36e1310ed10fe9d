//! Recording stand-ins for the host stack.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::advertisement::AdvertisementRequest;
use crate::bluetooth_address::BluetoothAddress;
use crate::descriptors::UUID;
use crate::gap_advertiser::GapAdvertiser;
use crate::peripheral::Peripheral;
use crate::registry::AttributeRegistry;

pub fn init_logging() {
  let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockError {
  StartRefused,
  RegistrationRefused,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdvertiserCall {
  TxPowerLevel,
  Start,
  Stop,
}

#[derive(Debug, Default)]
struct AdvertiserState {
  calls: Vec<AdvertiserCall>,
  last_request: Option<AdvertisementRequest>,
  active: usize,
  starts: usize,
  fail_next_start: bool,
}

/// Clones share state so tests can keep a handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MockAdvertiser {
  state: Rc<RefCell<AdvertiserState>>,
}

impl MockAdvertiser {
  pub const TX_POWER: i8 = -4;

  pub fn new() -> Self {
    Default::default()
  }

  pub fn calls(&self) -> Vec<AdvertiserCall> {
    self.state.borrow().calls.clone()
  }

  pub fn last_request(&self) -> Option<AdvertisementRequest> {
    self.state.borrow().last_request.clone()
  }

  /// Advertisements the radio is currently running.  A stack that let a second start through
  /// without a stop would push this above one.
  pub fn active_count(&self) -> usize {
    self.state.borrow().active
  }

  /// Successful starts so far.
  pub fn start_count(&self) -> usize {
    self.state.borrow().starts
  }

  pub fn fail_next_start(&self) {
    self.state.borrow_mut().fail_next_start = true;
  }

  /// The stack ended advertising by itself (connection, timeout).
  pub fn stack_stopped(&self) {
    self.state.borrow_mut().active = 0;
  }
}

impl GapAdvertiser for MockAdvertiser {
  type SystemError = MockError;

  fn start_advertising(&mut self, request: &AdvertisementRequest) -> Result<(), MockError> {
    let mut state = self.state.borrow_mut();
    state.calls.push(AdvertiserCall::Start);
    if state.fail_next_start {
      state.fail_next_start = false;
      return Err(MockError::StartRefused);
    }
    state.active += 1;
    state.starts += 1;
    state.last_request = Some(request.clone());
    Ok(())
  }

  fn stop_advertising(&mut self) -> Result<(), MockError> {
    let mut state = self.state.borrow_mut();
    state.calls.push(AdvertiserCall::Stop);
    state.active = state.active.saturating_sub(1);
    Ok(())
  }

  fn tx_power_level(&mut self) -> Result<i8, MockError> {
    self.state.borrow_mut().calls.push(AdvertiserCall::TxPowerLevel);
    Ok(Self::TX_POWER)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeripheralCall {
  RegisterServices(Vec<(UUID, u16)>),
  SetName(String),
  LocalAddress,
}

#[derive(Debug, Default)]
pub struct MockPeripheral {
  calls: RefCell<Vec<PeripheralCall>>,
  advertiser: MockAdvertiser,
  fail_registration: bool,
}

impl MockPeripheral {
  pub const ADDRESS: BluetoothAddress = BluetoothAddress([0x01, 0x02, 0x03, 0x04, 0x05, 0xc6]);

  pub fn new() -> Self {
    Default::default()
  }

  pub fn calls(&self) -> Vec<PeripheralCall> {
    self.calls.borrow().clone()
  }

  pub fn advertiser_handle(&self) -> MockAdvertiser {
    self.advertiser.clone()
  }

  pub fn fail_registration(&mut self) {
    self.fail_registration = true;
  }
}

impl Peripheral for MockPeripheral {
  type SystemError = MockError;
  type Advertiser = MockAdvertiser;

  fn set_name(&mut self, name: &str) -> Result<(), MockError> {
    self.calls.borrow_mut().push(PeripheralCall::SetName(name.to_string()));
    Ok(())
  }

  fn register_services(&mut self, registry: &AttributeRegistry<'_>) -> Result<(), MockError> {
    if self.fail_registration {
      return Err(MockError::RegistrationRefused);
    }
    let mapping = registry.handle_mapping().map(|(uuid, handle)| (uuid, handle.get())).collect();
    self.calls.borrow_mut().push(PeripheralCall::RegisterServices(mapping));
    Ok(())
  }

  fn local_address(&self) -> Result<BluetoothAddress, MockError> {
    self.calls.borrow_mut().push(PeripheralCall::LocalAddress);
    Ok(Self::ADDRESS)
  }

  fn advertiser(&mut self) -> MockAdvertiser {
    self.advertiser.clone()
  }
}
