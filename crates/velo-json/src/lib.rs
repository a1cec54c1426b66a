//! # velo-json
//!
//! A small JSON parser for the documents an external updater process prints:
//! update manifests and newline-delimited progress events.
//!
//! The accepted grammar is JSON plus `//` and `/* */` comments, with a couple
//! of deliberate leniencies described in [`parser`]. Parsing produces a
//! [`Node`] tree whose typed accessors fail fast with a
//! [`TypeMismatchError`] instead of returning defaults.
//!
//! ## Quick start
//!
//! ```rust
//! use velo_json::{parse, UpdateInfo};
//!
//! let node = parse("[1, 2, /* three */ 3]").unwrap();
//! assert_eq!(node.as_array().unwrap().len(), 3);
//!
//! let info = UpdateInfo::from_json(
//!     r#"{"TargetFullRelease": {"Version": "1.2.0", "Type": "Full"}, "IsDowngrade": false}"#,
//! )
//! .unwrap();
//! assert_eq!(info.target_full_release.unwrap().version, "1.2.0");
//! ```
//!
//! ## Modules
//!
//! - [`scanner`] — character cursor over the input
//! - [`appender`] — scratch buffer for string/word literals
//! - [`tokenizer`] — lookahead token classification, comment skipping
//! - [`parser`] — recursive-descent parser and [`ParseOptions`]
//! - [`node`] — the [`Node`] value tree
//! - [`manifest`] — `UpdateInfo`, `VelopackAsset`, `ProgressEvent` decoding
//! - [`error`] — error types

pub mod appender;
pub mod error;
pub mod manifest;
pub mod node;
pub mod parser;
pub mod scanner;
pub mod tokenizer;

pub use error::{Error, ParseError, ParseErrorKind, TypeMismatchError};
pub use manifest::{ProgressEvent, UpdateInfo, VelopackAsset, VelopackAssetType};
pub use node::{Node, NodeKind, Object};
pub use parser::{parse, parse_with, ParseOptions, DEFAULT_MAX_DEPTH};
