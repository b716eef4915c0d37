//! Order Processing
//!
//! This example drives an order through pay, ship and complete, with a
//! `before_pay` hook that vetoes payments missing their details.
//!
//! Key concepts:
//! - String states and key-string hooks
//! - Vetoing a transition from a `before` hook
//! - Rejected events leave the state untouched
//!
//! Run with: cargo run --example order_processing

use serde_json::json;
use waypoint::{FsmBuilder, HookOutcome, TransitionContext};

fn main() {
    println!("=== Order Processing Example ===\n");

    let fsm = FsmBuilder::<String>::new()
        .event("pay", ["created"], "paid")
        .event("ship", ["paid"], "shipped")
        .event("complete", ["shipped"], "completed")
        .event("cancel", ["created", "paid"], "canceled")
        .hook("before_pay", |ctx: &TransitionContext<'_, String>| {
            if ctx.args.len() < 2 {
                HookOutcome::cancel("invalid payment details")
            } else {
                HookOutcome::Continue
            }
        })
        .observe("enter_state", |ctx: &TransitionContext<'_, String>| {
            println!("  {} -> {} via '{}'", ctx.from, ctx.to, ctx.event);
        })
        .build()
        .expect("order table is valid");

    let order = fsm.machine("created".to_string());
    println!("Initial state: {}", order.current_state());
    println!("Available: {:?}\n", order.available_events());

    match order.fire("pay", &[json!("order-42")]) {
        Ok(state) => println!("Paid: {state}"),
        Err(e) => println!("Rejected: {e}"),
    }

    if let Err(e) = order.fire("ship", &[]) {
        println!("Rejected: {e}");
    }

    order
        .fire("pay", &[json!("order-42"), json!({"card": "visa"})])
        .expect("payment accepted");
    order.fire("ship", &[]).expect("order ships");
    order.fire("complete", &[]).expect("order completes");

    println!("\nFinal state: {}", order.current_state());
    println!("Terminal: {}", order.is_terminal());
    println!("Path: {:?}", order.history().get_path());
}
