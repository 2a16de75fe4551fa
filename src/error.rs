// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for xo8

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for xo8.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetched a word that decodes to no known instruction
    #[error("invalid opcode {word:04x} [pc={addr:04x}]")]
    InvalidOpcode {
        /// The offending word
        word: u16,
        /// The address it was fetched from
        addr: u16,
    },
    /// Called into a subroutine with all 16 stack slots in use
    #[error("call at {addr:04x} would exceed 16 nested subroutines")]
    StackOverflow {
        /// The address of the `call` instruction
        addr: u16,
    },
    /// Returned from a subroutine with no return address on the stack
    #[error("return at {addr:04x} with empty call stack")]
    StackUnderflow {
        /// The address of the `ret` instruction
        addr: u16,
    },
    /// Tried to load a program that does not fit in memory
    #[error("program of {len} bytes exceeds memory capacity ({cap} bytes)")]
    RomTooLarge {
        /// Size of the rejected program
        len: usize,
        /// Bytes available above the load offset
        cap: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
