//! Source parsers. Python is the only language scripts are written in.

mod python;

pub use python::PythonParser;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("could not load the Python grammar: {0}")]
    InitError(String),
    #[error("{0}")]
    ParseError(String),
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}
