//! Traffic Light
//!
//! This example cycles an enum-typed light through its phases and shares
//! one machine between threads.
//!
//! Key concepts:
//! - `state_enum!` for typed states
//! - Typed hook keys and guards
//! - Concurrent `fire` calls are serialized per machine
//!
//! Run with: cargo run --example traffic_light

use std::sync::Arc;
use std::thread;
use waypoint::{state_enum, FsmBuilder, Guard, HookKey, HookOutcome, TransitionContext};

state_enum! {
    enum Light {
        Red,
        Green,
        Yellow,
        Off,
    }
    final: [Off]
}

fn main() {
    println!("=== Traffic Light Example ===\n");

    let fsm = FsmBuilder::<Light>::new()
        .event("next", [Light::Red], Light::Green)
        .event("next", [Light::Green], Light::Yellow)
        .event("next", [Light::Yellow], Light::Red)
        .event("shutdown", [Light::Red, Light::Green, Light::Yellow], Light::Off)
        .guard(
            "shutdown",
            Guard::new(|ctx: &TransitionContext<'_, Light>| ctx.from == &Light::Red),
            "only shut down on red",
        )
        .on(HookKey::enter_any(), |ctx: &TransitionContext<'_, Light>| {
            println!("  {:?} -> {:?}", ctx.from, ctx.to);
            HookOutcome::Continue
        })
        .max_history(16)
        .build()
        .expect("light table is valid");

    let light = Arc::new(fsm.machine(Light::Red));

    let workers: Vec<_> = (0..3)
        .map(|_| {
            let light = Arc::clone(&light);
            thread::spawn(move || {
                for _ in 0..2 {
                    let _ = light.fire("next", &[]);
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    println!("\nAfter six cycles: {:?}", light.current_state());
    println!("Recorded transitions: {}", light.history().len());

    while !light.is(&Light::Red) {
        let _ = light.fire("next", &[]);
    }
    match light.fire("shutdown", &[]) {
        Ok(state) => println!("Shut down: {state:?} (final: {})", light.is_final()),
        Err(e) => println!("Rejected: {e}"),
    }
}
