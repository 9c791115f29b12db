//! # Example: host_object
//!
//! Shows how a type embeds an [`Emitter`] and exposes the full surface through
//! [`EventHost`] instead of re-implementing it.
//!
//! ## Run
//! ```bash
//! cargo run --example host_object
//! ```

use std::time::Duration;

use eventvisor::{args, Emitter, EventHost};

/// A ticker that publishes `"tick"` with a counter.
struct Ticker {
    events: Emitter,
}

impl EventHost for Ticker {
    fn emitter(&self) -> &Emitter {
        &self.events
    }
}

impl Ticker {
    async fn run(&self, ticks: u32, every: Duration) -> Result<(), eventvisor::EmitterError> {
        for n in 1..=ticks {
            tokio::time::sleep(every).await;
            self.publish("tick", args![n])?;
        }
        self.publish("done", args![])?.wait().await;
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ticker = Ticker {
        events: Emitter::new(),
    };

    let printer = ticker.subscribe_fn("tick", |args| {
        println!("[tick] n={:?}", args.get::<u32>(0));
    });
    ticker.subscribe_fn("done", |_| println!("[done]"));

    ticker.run(3, Duration::from_millis(50)).await?;
    ticker.unsubscribe("tick", &printer);
    println!("[listeners] tick={}", ticker.listener_count("tick"));
    Ok(())
}
