#![no_std]

pub mod advertisement;
pub mod advertising_controller;
pub mod att_error;
pub mod bluetooth_address;
pub mod bluetooth_error;
pub mod config;
pub mod connection_lifecycle;
pub mod descriptors;
pub mod device_information;
pub mod dispatcher;
pub mod gap_advertiser;
pub mod gap_event;
pub mod gatt_connection;
pub mod mtu;
pub mod peripheral;
pub mod registry;
pub mod server;

#[cfg(test)]
mod testing;

pub mod prelude {
  pub use crate::advertisement::*;
  pub use crate::advertising_controller::*;
  pub use crate::att_error::*;
  pub use crate::bluetooth_address::*;
  pub use crate::bluetooth_error::*;
  pub use crate::config::*;
  pub use crate::connection_lifecycle::*;
  pub use crate::descriptors::*;
  pub use crate::device_information::*;
  pub use crate::dispatcher::*;
  pub use crate::gap_advertiser::*;
  pub use crate::gap_event::*;
  pub use crate::gatt_connection::*;
  pub use crate::mtu::*;
  pub use crate::peripheral::*;
  pub use crate::registry::*;
  pub use crate::server::*;
}
