//! Simple example: pre-program a response and read it back in halves.
//!
//! Usage: cargo run --example ping_pong

use std::time::Duration;

use dummyserial::DummyPortBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let port = DummyPortBuilder::new("/dev/ttyUSB0")
        .response("PING", "PONGPONG")
        .timeout(Duration::from_millis(250))
        .build();

    port.write(b"PING")?;

    let first = port.read(4).await?;
    println!(
        "read {:?}, {} bytes still waiting",
        String::from_utf8_lossy(&first),
        port.out_waiting()
    );

    let second = port.read(4).await?;
    println!(
        "read {:?}, {} bytes still waiting",
        String::from_utf8_lossy(&second),
        port.out_waiting()
    );

    // A request with no table entry waits out the timeout, then comes
    // back empty.
    port.write(b"STATUS?")?;
    let reply = port.read(16).await?;
    println!("unmatched request returned {} bytes", reply.len());

    Ok(())
}
