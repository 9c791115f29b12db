//! # Example: basic
//!
//! Walks through the emitter surface:
//! - persistent and one-shot listeners;
//! - the reserved `newListener` event;
//! - the leak warning and how `set_max_listeners` silences it.
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use eventvisor::{args, Emitter, Listener, NEW_LISTENER};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = Emitter::new();

    bus.subscribe_fn(NEW_LISTENER, |args| {
        if let Some(name) = args.get::<String>(0) {
            println!("[new-listener] event={name}");
        }
    });

    bus.subscribe(
        "something awesome",
        Listener::from_fn(|args| {
            let parts: Vec<&str> = (0..args.len())
                .filter_map(|i| args.get::<&str>(i).copied())
                .collect();
            println!("[awesome] {}", parts.join(" | "));
        }),
    );
    bus.publish(
        "something awesome",
        args!["AWESOME STUFF", "ANOTHER AWESOME", "... BORING"],
    )?
    .wait()
    .await;

    bus.subscribe_once_fn("only one time", |args| {
        println!("[once] {:?}", args.get::<&str>(0));
    });
    bus.publish("only one time", args!["first time"])?.wait().await;
    // Nothing left to deliver: the once listener was consumed above.
    assert!(bus.publish("only one time", args!["second time"])?.is_empty());

    // More than 10 listeners on one name: one warning through `tracing`.
    for _ in 0..20 {
        bus.subscribe_fn("too many", |_| {});
    }
    println!("[leak] warned={}", bus.is_warned("too many"));

    bus.set_max_listeners(0)?;
    for _ in 0..20 {
        bus.subscribe_fn("not this time", |_| {});
    }
    println!("[leak] warned={}", bus.is_warned("not this time"));

    // Let pending newListener notifications drain.
    tokio::task::yield_now().await;
    Ok(())
}
