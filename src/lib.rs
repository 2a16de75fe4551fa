// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements the machine core of an XO-Chip capable Chip-8
//! interpreter: a 64KiB memory, sixteen v-registers, a four-plane 128x64
//! framebuffer, two countdown timers, and a decode/execute loop covering the
//! base instruction set plus the Super-Chip and XO-Chip extensions.
//!
//! Everything visual, audible, and interactive lives outside this crate: a
//! host drives [Machine::step] and [Machine::tick_timers] at its own rates,
//! polls the framebuffer through [Machine::pixel], and feeds key events in
//! through [Machine::set_key].

pub mod cpu;
pub mod error;
pub mod machine;
pub mod screen;

pub use cpu::Step;
pub use machine::Machine;

/// Common imports for xo8
pub mod prelude {
    pub use crate::cpu::{instruction::Insn, Step};
    pub use crate::error::{Error, Result};
    pub use crate::machine::Machine;
    pub use crate::screen::{FrameBuffer, Scroll};
}
