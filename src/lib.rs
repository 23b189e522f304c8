pub mod builder;
pub mod consts;
pub mod device;
pub mod error;
pub mod port;

pub use builder::DummyPortBuilder;
pub use device::SerialDevice;
pub use error::{Error, Result};
pub use port::{DummyPort, ResponseTable};
