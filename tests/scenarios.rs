//! Scenario tests driving the public API the way a serial-driver test would.

use std::time::Duration;

use dummyserial::{DummyPort, DummyPortBuilder, Error, SerialDevice};

const TIMEOUT: Duration = Duration::from_secs(2);

fn ping_port() -> DummyPort {
    DummyPortBuilder::new("/dev/ttyUSB0")
        .response("PING", "PONGPONG")
        .response("ID?", "dummy v1")
        .timeout(TIMEOUT)
        .build()
}

#[tokio::test]
async fn ping_pong_in_two_halves() {
    let port = ping_port();
    port.write(b"PING").unwrap();

    assert_eq!(port.read(4).await.unwrap(), b"PONG");
    assert_eq!(port.out_waiting(), 4);
    assert_eq!(port.read(4).await.unwrap(), b"PONG");
    assert_eq!(port.out_waiting(), 0);
}

#[tokio::test]
async fn chunked_drain_reconstructs_the_response() {
    let port = ping_port();
    port.write(b"PING").unwrap();

    // Odd chunk size, so the last read is shorter than the chunk.
    let mut collected = Vec::new();
    loop {
        let chunk_size = port.out_waiting().min(3);
        collected.extend(port.read(chunk_size).await.unwrap());
        if port.out_waiting() == 0 {
            break;
        }
    }

    assert_eq!(collected, b"PONGPONG");
}

#[tokio::test]
async fn second_write_replaces_unread_data() {
    let port = ping_port();
    port.write(b"PING").unwrap();
    port.write(b"ID?").unwrap();

    assert_eq!(port.read(8).await.unwrap(), b"dummy v1");
}

#[tokio::test(start_paused = true)]
async fn oversized_read_waits_out_the_timeout_once() {
    let port = ping_port();
    port.write(b"PING").unwrap();

    let start = tokio::time::Instant::now();
    let data = port.read(64).await.unwrap();
    assert_eq!(data, b"PONGPONG");
    assert_eq!(start.elapsed(), TIMEOUT);

    // The data was already handed back; asking again returns immediately.
    let start = tokio::time::Instant::now();
    assert_eq!(port.read(0).await.unwrap(), b"");
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn oversized_read_waits_even_when_the_answer_is_known() {
    let port = ping_port();
    port.write(b"PING").unwrap();
    assert_eq!(port.read(4).await.unwrap(), b"PONG");

    // Only 4 bytes remain and the table says no more are coming, but the
    // port still waits the full timeout before returning them.
    let start = tokio::time::Instant::now();
    assert_eq!(port.read(10).await.unwrap(), b"PONG");
    assert_eq!(start.elapsed(), TIMEOUT);
    assert_eq!(port.out_waiting(), 0);
}

#[tokio::test(start_paused = true)]
async fn unmatched_request_reads_back_empty_not_error() {
    let port = ping_port();
    port.write(b"WHOAMI").unwrap();

    let start = tokio::time::Instant::now();
    let data = port.read(10).await.unwrap();
    assert!(data.is_empty());
    assert_eq!(start.elapsed(), TIMEOUT);
}

#[tokio::test(start_paused = true)]
async fn read_zero_returns_immediately() {
    let port = ping_port();

    let start = tokio::time::Instant::now();
    assert_eq!(port.read(0).await.unwrap(), b"");
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn default_response_is_returned_whole_until_overwritten() {
    let port = DummyPortBuilder::new("COM4")
        .response("BAD", "NONE")
        .response("PING", "PONG")
        .build();

    port.write(b"BAD").unwrap();
    assert_eq!(port.read(1).await.unwrap(), b"NONE");
    assert_eq!(port.read(2).await.unwrap(), b"NONE");
    assert_eq!(port.out_waiting(), 4);

    port.write(b"PING").unwrap();
    assert_eq!(port.read(4).await.unwrap(), b"PONG");
}

#[tokio::test]
async fn custom_default_response() {
    let port = DummyPortBuilder::new("COM4")
        .default_response("<nil>")
        .response("BAD", "<nil>")
        .build();

    port.write(b"BAD").unwrap();
    assert_eq!(port.read(1).await.unwrap(), b"<nil>");
    assert_eq!(port.out_waiting(), 5);
}

#[tokio::test(start_paused = true)]
async fn closed_port_errors_before_any_wait() {
    let port = ping_port();
    port.close().unwrap();

    let start = tokio::time::Instant::now();
    assert!(matches!(port.read(100).await, Err(Error::NotOpen)));
    assert!(matches!(port.write(b"PING"), Err(Error::NotOpen)));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn reopen_restores_the_original_name() {
    let port = ping_port();
    assert!(matches!(port.open(), Err(Error::AlreadyOpen)));

    port.close().unwrap();
    assert!(matches!(port.close(), Err(Error::AlreadyClosed)));
    assert_eq!(port.name(), None);

    port.open().unwrap();
    assert_eq!(port.name().as_deref(), Some("/dev/ttyUSB0"));
}

/// A driver written against the trait, never the concrete port.
async fn query(dev: &mut dyn SerialDevice, request: &[u8]) -> anyhow::Result<Vec<u8>> {
    dev.write(request)?;
    let mut out = Vec::new();
    loop {
        let pending = dev.out_waiting();
        if pending == 0 {
            break;
        }
        out.extend(dev.read(pending).await?);
    }
    Ok(out)
}

#[tokio::test]
async fn driver_code_runs_against_the_trait() {
    let mut port = ping_port();
    let reply = query(&mut port, b"ID?").await.unwrap();
    assert_eq!(reply, b"dummy v1");
}
