//! Backend-agnostic serial device trait.
//!
//! Driver code programs against `dyn SerialDevice` so the same logic can
//! run over real hardware in production and a [`DummyPort`] in tests.
//!
//! [`DummyPort`]: crate::DummyPort

use async_trait::async_trait;

use crate::error::Result;

/// The open/close/write/read contract of a serial port.
#[async_trait]
pub trait SerialDevice: Send {
    /// Current port name. `None` while the port is closed.
    fn name(&self) -> Option<String>;

    /// Configured baud rate.
    fn baud_rate(&self) -> u32;

    /// Whether the port is open.
    fn is_open(&self) -> bool;

    /// Open a previously closed port.
    fn open(&mut self) -> Result<()>;

    /// Close an open port.
    fn close(&mut self) -> Result<()>;

    /// Send a request to the device.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `size` bytes of the device's pending output.
    async fn read(&mut self, size: usize) -> Result<Vec<u8>>;

    /// Number of output bytes not yet delivered to a reader.
    fn out_waiting(&self) -> usize;
}
