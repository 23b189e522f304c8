//! Drain a long response in fixed-size chunks, polling out_waiting().
//!
//! Usage: cargo run --example drain_loop

use dummyserial::DummyPortBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let port = DummyPortBuilder::new("COM3")
        .response("DUMP", "0123456789ABCDEF")
        .build();

    port.write(b"DUMP")?;

    let mut collected = Vec::new();
    while port.out_waiting() > 0 {
        let chunk = port.read(port.out_waiting().min(5)).await?;
        println!(
            "chunk {:?}, {} bytes still waiting",
            String::from_utf8_lossy(&chunk),
            port.out_waiting()
        );
        collected.extend(chunk);
    }

    println!("reassembled: {:?}", String::from_utf8_lossy(&collected));
    Ok(())
}
