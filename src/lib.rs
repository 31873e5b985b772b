//! Front end and code emitter for the Argon language.
//!
//! This crate reads Argon source text and lowers it to an equivalent
//! translation-target program (a C++-like text with concepts, `subrange`s
//! and a small runtime support library) that a native toolchain can then
//! build. It does not link, execute, or fully type-check the program: the
//! pipeline is lex -> parse -> emit, with a shared `Result`/trace error
//! model threaded through every stage.
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod dot;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;

pub use error::{ArgonError, ArgonResult};
pub use source::SourceManager;
