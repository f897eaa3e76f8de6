//! Build tools for the STM8 microcontroller family.
//!
//! This crate implements a two-pass assembler, the `.l0` relocatable object
//! format that couples the tools together, and a linker that merges objects,
//! applies a placement script and emits a Motorola S-record image.
//!
//! The pipeline is strictly batch oriented: source text is tokenised by
//! [`token::Lexer`], translated by [`asm::Assembler`] into sections, symbols
//! and relocations, serialised by [`l0`], and finally combined by
//! [`link::Linker`] which resolves symbols, patches relocations and hands the
//! packed address map to [`srec`].
//!
//! All errors are fatal and eager: the first failure propagates out as an
//! [`Error`] carrying the rendered diagnostic, including the source location
//! and a replay of the offending input where one is available.

use core::fmt;
use std::io;

pub mod asm;
pub mod common;
pub mod expr;
pub mod l0;
pub mod link;
pub mod relocation;
pub mod section;
pub mod srec;
pub mod symbol;
pub mod token;
pub mod util;

/// The error type used throughout the crate.
///
/// Holds the fully rendered diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(String);

impl Error {
    /// An error from a rendered message.
    pub fn new(msg: impl Into<String>) -> Self {
        Error(msg.into())
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error(err.to_string())
    }
}

/// The result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Print a non-fatal diagnostic. Warnings never abort a run.
pub(crate) fn warn(msg: impl fmt::Display) {
    eprintln!("warning: {}", msg);
}
