//! Extraction frontend for modelmeta: lexer and parser for Java-style model
//! source files.
//!
//! This crate reduces a source file to the raw triple the semantic core
//! consumes: the class's simple name, its imports, and its field list with
//! type names exactly as written. It is deliberately *not* a Java parser —
//! method bodies, initializers, annotations, and nested types are skipped by
//! token matching, because only field declarations matter downstream.
//!
//! ## Notes
//! - This crate is "syntax-only": no name resolution and no registry access.
//! - Parse failures carry a span and can be rendered as rich diagnostics via
//!   [`error::ParseError::into_diagnostic`].
//!
//! ## Examples
//! ```rust
//! let unit = modelmeta_syntax::parse_unit(
//!     "package com.example; class User { String name; }",
//! ).unwrap();
//! assert_eq!(unit.package.as_deref(), Some("com.example"));
//! assert_eq!(unit.class.fields.len(), 1);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ParseError;
pub use parser::{SourceUnit, parse_unit};
