//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notegraph_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("notegraph_core ping={}", notegraph_core::ping());
    println!("notegraph_core version={}", notegraph_core::core_version());
}
