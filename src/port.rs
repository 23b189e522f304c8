//! DummyPort: the mock serial port.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::consts;
use crate::device::SerialDevice;
use crate::error::{Error, Result};

/// Exact request bytes mapped to the exact response bytes they elicit.
pub type ResponseTable = HashMap<Vec<u8>, Vec<u8>>;

/// Immutable per-instance configuration.
pub(crate) struct PortConfig {
    /// Name given to the port at construction; `open()` restores it.
    pub(crate) initial_name: String,
    pub(crate) responses: ResponseTable,
    /// How long an under-filled read waits before returning.
    pub(crate) timeout: Duration,
    /// Stored for compatibility; never used in timing math.
    pub(crate) baud_rate: u32,
    /// Waiting data equal to this value is returned whole on every read.
    pub(crate) default_response: Vec<u8>,
}

/// Mutable port state, shared between cloned handles.
pub(crate) struct PortState {
    /// Whether the port is open.
    pub(crate) is_open: bool,
    /// Current port name; cleared while closed.
    pub(crate) name: Option<String>,
    /// Bytes produced by the last write lookup, awaiting delivery.
    /// `None` means no response was configured for the last request,
    /// which is distinct from "no data present" (`Some` and empty).
    pub(crate) waiting: Option<Vec<u8>>,
}

/// A mock serial port with pre-programmed request/response pairs.
///
/// Writes look the request up in the response table and park the matching
/// response as waiting data; reads drain the waiting data according to the
/// requested size, waiting out the configured timeout when more bytes are
/// requested than are available. The port starts pre-opened.
///
/// Clones share state, so a driver under test can own one handle while the
/// test inspects `out_waiting()` on another.
#[derive(Clone)]
pub struct DummyPort {
    pub(crate) config: Arc<PortConfig>,
    pub(crate) state: Arc<Mutex<PortState>>,
}

impl DummyPort {
    /// Create a port with the given name and all-default configuration.
    ///
    /// Use [`DummyPortBuilder`](crate::DummyPortBuilder) to configure
    /// responses, timeout, baud rate, or the default response.
    pub fn new(name: &str) -> Self {
        crate::DummyPortBuilder::new(name).build()
    }

    /// Open a previously closed port, restoring its original name.
    pub fn open(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.is_open {
            return Err(Error::AlreadyOpen);
        }

        debug!("opening port {}", self.config.initial_name);
        state.is_open = true;
        state.name = Some(self.config.initial_name.clone());
        Ok(())
    }

    /// Close an open port, clearing its name.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.is_open {
            return Err(Error::AlreadyClosed);
        }

        debug!("closing port {}", self.config.initial_name);
        state.is_open = false;
        state.name = None;
        Ok(())
    }

    /// Send a request to the port.
    ///
    /// The request is looked up in the response table and the matching
    /// response becomes the waiting data for subsequent reads. A request
    /// with no table entry leaves no response configured: the next
    /// over-sized read waits out the timeout and returns empty.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.is_open {
            return Err(Error::NotOpen);
        }

        debug!("writing {} bytes: {:02X?}", data.len(), data);
        state.waiting = self.config.responses.get(data).cloned();
        if state.waiting.is_none() {
            debug!("no response configured for request");
        }
        Ok(())
    }

    /// Read `size` bytes of the waiting data.
    ///
    /// - Waiting data equal to the configured default response is returned
    ///   whole regardless of `size`, and stays in place until the next
    ///   write replaces it.
    /// - `size` equal to the available length drains the buffer in one
    ///   call; a smaller `size` returns exactly `size` bytes and keeps the
    ///   remainder for a later read.
    /// - A `size` larger than the available length waits out the full
    ///   configured timeout, then returns whatever is waiting (possibly
    ///   nothing) and resets the buffer. The wait is not skipped even when
    ///   the response is already fully known.
    pub async fn read(&self, size: usize) -> Result<Vec<u8>> {
        {
            let mut state = self.state.lock().unwrap();
            if !state.is_open {
                return Err(Error::NotOpen);
            }

            trace!("reading {size} bytes");
            let available = state.waiting.as_ref().map_or(0, Vec::len);

            if state.waiting.as_deref() == Some(self.config.default_response.as_slice()) {
                // Never chunked, never consumed.
                debug!("returning default response whole");
                return Ok(self.config.default_response.clone());
            }

            if size == available {
                let out = state
                    .waiting
                    .replace(consts::NO_DATA_PRESENT.to_vec())
                    .unwrap_or_default();
                return Ok(out);
            }

            if let Some(data) = state.waiting.as_mut() {
                if size < data.len() {
                    debug!(
                        "read smaller than available data ({size} < {}); keeping the rest",
                        data.len()
                    );
                    let rest = data.split_off(size);
                    return Ok(std::mem::replace(data, rest));
                }
            }

            debug!(
                "read larger than available data ({size} > {available}); sleeping until timeout"
            );
        }

        tokio::time::sleep(self.config.timeout).await;

        let mut state = self.state.lock().unwrap();
        let out = state
            .waiting
            .replace(consts::NO_DATA_PRESENT.to_vec())
            .unwrap_or_default();
        Ok(out)
    }

    /// Length of the waiting output data.
    ///
    /// Lets callers poll "is there more to read" without blocking.
    pub fn out_waiting(&self) -> usize {
        self.state.lock().unwrap().waiting.as_ref().map_or(0, Vec::len)
    }

    /// Whether the port is open.
    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().is_open
    }

    /// Current port name. `None` while the port is closed.
    pub fn name(&self) -> Option<String> {
        self.state.lock().unwrap().name.clone()
    }

    /// Configured baud rate.
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }

    /// Configured read timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }
}

impl fmt::Debug for DummyPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("DummyPort")
            .field("name", &state.name)
            .field("open", &state.is_open)
            .field("timeout", &self.config.timeout)
            .field("out_waiting", &state.waiting.as_ref().map_or(0, Vec::len))
            .finish()
    }
}

#[async_trait]
impl SerialDevice for DummyPort {
    fn name(&self) -> Option<String> {
        DummyPort::name(self)
    }

    fn baud_rate(&self) -> u32 {
        DummyPort::baud_rate(self)
    }

    fn is_open(&self) -> bool {
        DummyPort::is_open(self)
    }

    fn open(&mut self) -> Result<()> {
        DummyPort::open(self)
    }

    fn close(&mut self) -> Result<()> {
        DummyPort::close(self)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        DummyPort::write(self, data)
    }

    async fn read(&mut self, size: usize) -> Result<Vec<u8>> {
        DummyPort::read(self, size).await
    }

    fn out_waiting(&self) -> usize {
        DummyPort::out_waiting(self)
    }
}
