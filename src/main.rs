// This binary crate is intentionally minimal.
// All network logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
fn main() {
    println!("laminar-nn: a from-scratch feed-forward network engine in Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
