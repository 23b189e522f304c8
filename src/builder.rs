//! DummyPortBuilder: fluent configuration for a mock port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::consts;
use crate::port::{DummyPort, PortConfig, PortState, ResponseTable};

/// Builder for configuring a [`DummyPort`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dummyserial::DummyPortBuilder;
///
/// let port = DummyPortBuilder::new("/dev/ttyUSB0")
///     .response("PING", "PONGPONG")
///     .response(&[0x01, 0x02][..], &[0xA0][..])
///     .timeout(Duration::from_millis(100))
///     .build();
/// assert!(port.is_open());
/// ```
pub struct DummyPortBuilder {
    name: String,
    responses: ResponseTable,
    timeout: Duration,
    baud_rate: u32,
    default_response: Vec<u8>,
}

impl DummyPortBuilder {
    /// Create a new builder for the given port name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: ResponseTable::new(),
            timeout: consts::DEFAULT_TIMEOUT,
            baud_rate: consts::DEFAULT_BAUD_RATE,
            default_response: consts::DEFAULT_RESPONSE.to_vec(),
        }
    }

    /// Add a request/response pair. Both sides accept `&str` or byte
    /// slices; matching is on exact bytes.
    pub fn response(mut self, request: impl Into<Vec<u8>>, response: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(request.into(), response.into());
        self
    }

    /// Add every pair from an iterator of request/response pairs.
    pub fn responses<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        for (request, response) in pairs {
            self.responses.insert(request.into(), response.into());
        }
        self
    }

    /// Set how long an under-filled read waits before returning
    /// (default 2 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the baud rate (default 9600). Stored only; the mock does no
    /// baud-accurate timing.
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Override the default response (default `b"NONE"`): waiting data
    /// equal to this value is returned whole on every read, regardless of
    /// the requested size. Should not be empty; empty waiting data is read
    /// as "no data present".
    pub fn default_response(mut self, response: impl Into<Vec<u8>>) -> Self {
        self.default_response = response.into();
        self
    }

    /// Build the port. It starts pre-opened, with no data waiting.
    pub fn build(self) -> DummyPort {
        DummyPort {
            config: Arc::new(PortConfig {
                initial_name: self.name.clone(),
                responses: self.responses,
                timeout: self.timeout,
                baud_rate: self.baud_rate,
                default_response: self.default_response,
            }),
            state: Arc::new(Mutex::new(PortState {
                is_open: true,
                name: Some(self.name),
                waiting: Some(consts::NO_DATA_PRESENT.to_vec()),
            })),
        }
    }
}
