// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions

#[cfg(test)]
mod tests;

pub mod behavior;
pub mod instruction;

use self::instruction::Insn;
use crate::{
    error::{Error, Result},
    machine::Machine,
};
use imperative_rs::InstructionSet;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Outcome of one successfully executed instruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// The machine is ready for the next fetch
    #[default]
    Continue,
    /// The program signalled a clean exit (opcode `00fd`)
    Halt,
}

impl Machine {
    /// Fetches, decodes, and executes exactly one instruction.
    ///
    /// Unless the instruction itself assigns the program counter, it is left
    /// pointing at the following instruction. Returns [Step::Halt] when the
    /// program asks to exit; an undecodable word is reported as
    /// [Error::InvalidOpcode] with the machine left untouched, and the
    /// caller decides whether that is fatal.
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::{Machine, Step};
    /// let mut machine = Machine::new();
    /// machine.load(&[0x60, 0x40]).unwrap(); // mov #40, v0
    /// assert_eq!(Step::Continue, machine.step().unwrap());
    /// assert_eq!(0x40, machine.v()[0]);
    /// assert_eq!(0x202, machine.pc());
    /// ```
    pub fn step(&mut self) -> Result<Step> {
        let addr = self.pc;
        // The decoder gets the rest of memory; everything but the f000 long
        // form consumes two bytes of it.
        match Insn::decode(&self.mem[addr as usize..]) {
            Ok((len, insn)) => {
                log::debug!(
                    "PC={addr:04x} {:<16} ; {}",
                    insn.to_string(),
                    insn.description()
                );
                self.pc = self.pc.wrapping_add(len as Adr);
                self.execute(insn)
            }
            Err(_) => {
                let word = self.word(addr);
                log::error!("invalid opcode {word:04x} [pc={addr:04x}]");
                Err(Error::InvalidOpcode { word, addr })
            }
        }
    }
}
