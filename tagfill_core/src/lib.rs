//! `tagfill_core` is the core library for [tagfill](https://github.com/ifiokjr/tagfill), checked string templating. It finds `{name}` placeholders in a text, derives the contract of names a caller has to supply, substitutes values, and reports any placeholder left unresolved.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template text
//!   → Scanner (finds `{name}` spans left to right, rejecting doubled markers)
//!   → Contract (collapses spans into distinct names and a span → name table)
//!   → Template (fills spans from overrides and defaults, validates, forks)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `tagfill.toml`, including the delimiter pair, default values, and validation mode.
//! - [`scanner`] — The placeholder scanner.
//!
//! ## Key Types
//!
//! - [`Template`] — A text plus its tags, placeholders, contract, and default values.
//! - [`Contract`] — The distinct names a template needs and what they accept.
//! - [`Replacements`] — A partial set of name → value assignments.
//! - [`Value`] — A string, number, or boolean replacement.
//! - [`Tags`] — The start and end markers, `{` and `}` by default.
//! - [`ValidationError`] — The failure reported when placeholders remain.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagfill_core::Template;
//! use tagfill_core::replacements;
//!
//! let greeting = Template::new("{greeting}, {name}!");
//! let hello = greeting.fork(&replacements! { "greeting" => "Hello" });
//!
//! assert_eq!(hello.text(), "Hello, {name}!");
//! assert_eq!(hello.render(&replacements! { "name" => "Ada" }), "Hello, Ada!");
//!
//! let error = hello.render_validated(&replacements! {}).unwrap_err();
//! assert_eq!(error.missing_replacements, vec!["{name}".to_string()]);
//! ```

pub use contract::*;
pub use error::*;
pub use scanner::Placeholder;
pub use tags::*;
pub use template::*;
pub use value::*;

pub mod config;
mod contract;
#[allow(unused_assignments)]
mod error;
pub mod scanner;
mod tags;
mod template;
mod value;
