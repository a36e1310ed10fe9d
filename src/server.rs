use core::fmt::{Debug, Display, Formatter};

use log::{error, info, warn};

use crate::advertising_controller::{AdvertisingController, AdvertisingError};
use crate::att_error::AttError;
use crate::config::DeviceConfig;
use crate::connection_lifecycle::ConnectionLifecycle;
use crate::descriptors::{AttributeHandle, UUID};
use crate::dispatcher::{AttributeAccessDispatcher, ReadBuffer, ReadError};
use crate::gap_advertiser::GapAdvertiser;
use crate::gap_event::{GapEvent, GapEventHandler};
use crate::peripheral::Peripheral;
use crate::registry::AttributeRegistry;

/// Everything the host stack talks to once the peripheral is up: GAP events go to the
/// lifecycle, attribute reads go to the dispatcher.
#[derive(Debug)]
pub struct DeviceInfoServer<'r, A> {
  dispatcher: AttributeAccessDispatcher<'r>,
  lifecycle: ConnectionLifecycle<A>,
}

impl<'r, A: GapAdvertiser + Debug> DeviceInfoServer<'r, A> {
  /// Bring the peripheral up: validate the advertisement, hand the attribute table and the
  /// device name to the stack, then start advertising.
  ///
  /// Configuration and registration errors are returned and must be treated as fatal.  A
  /// failure to start advertising is not: it is logged and the next GAP event retries.
  pub fn start<P>(
    peripheral: &mut P,
    registry: &'r AttributeRegistry<'r>,
    config: &DeviceConfig,
  ) -> Result<Self, StartupError<P::SystemError>>
  where
    P: Peripheral<Advertiser = A>,
    A: GapAdvertiser<SystemError = P::SystemError>,
  {
    let advertising = AdvertisingController::new(peripheral.advertiser(), config.advertising())
      .map_err(StartupError::Advertising)?;

    peripheral.register_services(registry).map_err(StartupError::Registration)?;
    for (uuid, handle) in registry.handle_mapping() {
      info!("Registered {uuid} at handle {handle}");
    }

    peripheral.set_name(config.device_name).map_err(StartupError::Registration)?;

    match peripheral.local_address() {
      Ok(address) => info!("Device address: {address}"),
      Err(e) => warn!("Unable to read device address: {e:?}"),
    }

    let mut lifecycle = ConnectionLifecycle::new(advertising);
    if let Err(e) = lifecycle.start() {
      warn!("Started without advertising, waiting for the next GAP event: {e}");
    }

    Ok(Self {
      dispatcher: AttributeAccessDispatcher::new(registry, config.invariant_policy),
      lifecycle,
    })
  }

  pub fn lifecycle(&self) -> &ConnectionLifecycle<A> {
    &self.lifecycle
  }

  pub fn dispatcher(&self) -> &AttributeAccessDispatcher<'r> {
    &self.dispatcher
  }

  /// Answer a read the stack routed to one of our value handles.
  pub fn on_attribute_read(
    &self,
    handle: AttributeHandle,
    out: &mut impl ReadBuffer,
  ) -> Result<(), AttError> {
    self.dispatcher.read_handle(handle, out).map_err(AttError::from)
  }

  pub fn read(&self, uuid: UUID, out: &mut impl ReadBuffer) -> Result<(), ReadError> {
    self.dispatcher.read(uuid, out)
  }
}

impl<'r, A: GapAdvertiser + Debug> GapEventHandler for DeviceInfoServer<'r, A> {
  fn on_event(&mut self, event: GapEvent) {
    if let Err(e) = self.lifecycle.on_event(event) {
      error!("Still not advertising, waiting for the next event: {e}");
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError<E> {
  /// The advertisement can't be built from the configuration.
  Advertising(AdvertisingError<E>),

  /// The host stack rejected the attribute table or the device name.
  Registration(E),
}

impl<E: Debug> Display for StartupError<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      StartupError::Advertising(e) => write!(f, "invalid advertising configuration: {e}"),
      StartupError::Registration(e) => write!(f, "host stack registration failed: {e:?}"),
    }
  }
}
