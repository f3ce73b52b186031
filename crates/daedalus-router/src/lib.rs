//! Path pattern compilation and matching for Daedalus.
//!
//! This crate provides the lowest layer of the Daedalus routing stack: it
//! compiles route patterns into segment sequences and matches request paths
//! against them, extracting named parameters. It knows nothing about HTTP
//! methods, handlers, or middleware; those concerns live in the crates
//! layered above.
//!
//! # Pattern Syntax
//!
//! Patterns are `/`-separated segments. A segment is one of:
//!
//! - a **static** segment, matched verbatim and case-sensitively
//!   (`users`, `admin`);
//! - a **required parameter**, written `{name}`, which consumes exactly one
//!   path segment and binds it;
//! - an **optional parameter**, written `{name?}`, which consumes one path
//!   segment if present and binds no value otherwise.
//!
//! Optional parameters must form a contiguous trailing run; an optional
//! segment followed by a non-optional one is rejected at compile time.
//!
//! # Example
//!
//! ```rust
//! use daedalus_router::PathPattern;
//!
//! let pattern = PathPattern::parse("profile/{name?}/{age?}").unwrap();
//!
//! let params = pattern.match_path("/profile/John").unwrap();
//! assert_eq!(params.get("name"), Some("John"));
//! assert_eq!(params.get("age"), None);
//! assert!(params.contains("age"));
//!
//! assert!(pattern.match_path("/profile/John/30/extra").is_none());
//! ```

mod params;
mod pattern;

pub use params::Params;
pub use pattern::{PathPattern, PathSegment, PatternError};
