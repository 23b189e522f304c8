//! Process-wide defaults for the mock port.
//!
//! These are plain immutable defaults; per-instance overrides go through
//! [`DummyPortBuilder`](crate::DummyPortBuilder).

use std::time::Duration;

/// Default read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default baud rate. Stored for compatibility with real-port APIs; the
/// mock never uses it in timing math.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Response handed back when the waiting data matches it: returned whole
/// on every read, regardless of the requested size, until the next write.
///
/// Should not be empty; empty waiting data is read as "no data present".
pub const DEFAULT_RESPONSE: &[u8] = b"NONE";

/// The "no data present" value the waiting buffer is reset to after a
/// full drain or a timed-out read.
pub const NO_DATA_PRESENT: &[u8] = b"";
