//! Main module for shorthand library functionality

pub mod ast;
pub mod compiling;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluation;
pub mod lexing;
pub mod parsing;
pub mod rendering;
pub mod testing;
