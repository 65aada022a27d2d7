#![forbid(unsafe_code)]
//! Category Runner
//!
//! Finds .NET test projects beneath a folder and runs `dotnet test` on each of them, one after
//! the other, with a filter expression built from included and excluded test categories.
//!
//! ## Layout
//!
//! - [`filter`]: builds the `--filter` expression from category lists (pure).
//! - [`cli`]: argument parsing, project discovery, and the sequential runner loop.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod filter;
pub mod version;

pub use filter::build_filter;
