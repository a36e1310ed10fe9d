pub mod attribute_handle;
pub mod gatt_characteristic;
/// Descriptors just define the structure and data types of services/characteristics.  Apart
/// from the value producers attached to characteristics these are pure data types.
pub mod gatt_service;
pub mod uuid;

pub use attribute_handle::*;
pub use gatt_characteristic::*;
pub use gatt_service::*;
pub use uuid::*;
