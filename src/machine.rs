// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Owns the state of one machine: memory, registers, stack, keys, timers,
//! and the framebuffer. Everything here is plain data and accessors; the
//! interpreter in [crate::cpu] is what makes it move.

pub mod font;

use crate::{
    error::{Error, Result},
    screen::FrameBuffer,
};
use std::fmt::Debug;

/// The state of one interpreter instance.
///
/// A fresh machine comes up with both font tables installed, the program
/// counter at [Machine::LOAD_OFFSET], plane 1 selected, and the low 64x32
/// resolution active. Hosts own it outright; nothing in this crate keeps
/// global state, so several machines can run side by side.
///
/// # Examples
/// ```rust
/// # use xo8::Machine;
/// let mut machine = Machine::new();
/// machine.load(&[0x60, 0x05]).unwrap();
/// assert_eq!(0x200, machine.pc());
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Machine {
    // registers
    pub(crate) v: [u8; 16],
    pub(crate) flags: [u8; 8],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    // memory
    pub(crate) mem: Vec<u8>,
    pub(crate) stack: Vec<u16>,
    // timers
    pub(crate) delay: u8,
    pub(crate) sound: u8,
    // I/O
    pub(crate) keys: [bool; 16],
    pub(crate) screen: FrameBuffer,
}

impl Machine {
    /// Size of the address space, in bytes
    pub const MEM_SIZE: usize = 0x10000;
    /// Address programs are loaded at, and where execution starts
    pub const LOAD_OFFSET: usize = 0x200;
    /// Number of nested subroutine calls the stack holds
    pub const STACK_DEPTH: usize = 16;
    /// Bytes available to a loaded program
    pub const LOAD_CAP: usize = Self::MEM_SIZE - Self::LOAD_OFFSET - 1;

    /// Constructs a new machine in its reset state
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the machine: zeroes every register, timer, key, and byte of
    /// memory, reinstalls both font tables, and restores the boot defaults
    /// (pc at [Machine::LOAD_OFFSET], plane 1, low resolution).
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// let mut machine = Machine::new();
    /// machine.load(&[0x12, 0x00]).unwrap();
    /// machine.step().unwrap();
    /// machine.reset();
    /// assert_eq!(0x200, machine.pc());
    /// ```
    pub fn reset(&mut self) {
        self.v = [0; 16];
        self.flags = [0; 8];
        self.i = 0;
        self.pc = Self::LOAD_OFFSET as u16;
        self.mem.fill(0);
        self.stack.clear();
        self.delay = 0;
        self.sound = 0;
        self.keys = [false; 16];
        self.screen = FrameBuffer::default();
        self.mem[font::SMALL_OFFSET as usize..][..font::SMALL.len()].copy_from_slice(&font::SMALL);
        self.mem[font::BIG_OFFSET as usize..][..font::BIG.len()].copy_from_slice(&font::BIG);
    }

    /// Copies a program into memory at [Machine::LOAD_OFFSET].
    ///
    /// No other state is touched, so a program can be swapped in over a
    /// running machine without losing the font tables. Returns
    /// [Error::RomTooLarge] if the program exceeds [Machine::LOAD_CAP].
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// let mut machine = Machine::new();
    /// machine.load(&[0x60, 0xff]).unwrap();
    /// machine.load(&vec![0; 0x10000]).unwrap_err();
    /// ```
    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > Self::LOAD_CAP {
            return Err(Error::RomTooLarge {
                len: rom.len(),
                cap: Self::LOAD_CAP,
            });
        }
        self.mem[Self::LOAD_OFFSET..][..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Reads a program from a file and [Machine::load]s it
    pub fn load_from_path(&mut self, rom: impl AsRef<std::path::Path>) -> Result<()> {
        self.load(&std::fs::read(rom)?)
    }

    /// Sets the state of one of the 16 keys.
    /// If the key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// let mut machine = Machine::new();
    /// machine.set_key(0x7, true).unwrap();
    /// assert_eq!(true, machine.key(0x7).unwrap());
    /// ```
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<()> {
        match self.keys.get_mut(key) {
            Some(state) => {
                *state = pressed;
                Ok(())
            }
            None => Err(Error::InvalidKey { key }),
        }
    }

    /// Gets the state of one of the 16 keys.
    /// If the key does not exist, returns [Error::InvalidKey].
    pub fn key(&self, key: usize) -> Result<bool> {
        self.keys.get(key).copied().ok_or(Error::InvalidKey { key })
    }

    /// Decrements the delay and sound timers, stopping at 0.
    ///
    /// The host calls this at its timer rate (classically 60Hz), decoupled
    /// from the instruction rate.
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// let mut machine = Machine::new();
    /// machine.tick_timers();
    /// assert_eq!(0, machine.delay());
    /// ```
    pub fn tick_timers(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
            log::trace!("TIMER  delay = {}", self.delay);
        }
        if self.sound > 0 {
            self.sound -= 1;
            log::trace!("STIMER sound = {}", self.sound);
        }
    }

    /// Reads one framebuffer cell at full-grid coordinates.
    ///
    /// The value packs one bit per plane, low bit = plane 1. Callers are
    /// expected to stay inside the active [Machine::resolution].
    ///
    /// # Panics
    /// Panics if (x, y) lies outside the 128x64 backing grid.
    pub fn pixel(&self, x: u16, y: u16) -> u8 {
        self.screen.pixel(x, y)
    }

    /// Gets the active resolution as `(width, height, is_hires)`
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// assert_eq!((64, 32, false), Machine::new().resolution());
    /// ```
    pub fn resolution(&self) -> (u16, u16, bool) {
        self.screen.resolution()
    }

    /// True whenever an instruction has changed the framebuffer or the
    /// resolution since the flag was last cleared. The core only ever sets
    /// this; clearing it is the presenter's bookkeeping.
    pub fn redraw_pending(&self) -> bool {
        self.screen.dirty
    }

    /// Clears the redraw flag
    pub fn clear_redraw(&mut self) {
        self.screen.dirty = false;
    }

    /// Gets a reference to the framebuffer
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.screen
    }
}

// Read accessors for hosts and tests
impl Machine {
    /// Gets a slice of the general purpose registers
    ///
    /// # Examples
    /// ```rust
    /// # use xo8::Machine;
    /// assert_eq!(&[0; 16], Machine::new().v());
    /// ```
    pub fn v(&self) -> &[u8; 16] {
        &self.v
    }

    /// Gets the program counter
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Gets the index register
    pub fn i(&self) -> u16 {
        self.i
    }

    /// Gets the value of the delay timer
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value of the sound timer
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the return addresses currently on the call stack
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    /// Gets the flag-register bank reserved for `Fx75`/`Fx85`
    pub fn flag_registers(&self) -> &[u8; 8] {
        &self.flags
    }

    /// Gets the entire address space
    pub fn memory(&self) -> &[u8] {
        &self.mem
    }
}

// Memory primitives shared with the interpreter
impl Machine {
    /// Reads the byte at `addr`
    pub(crate) fn read(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    /// Writes a byte to `addr`
    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    /// Reads the big-endian word at `addr`, wrapping at the end of memory
    pub(crate) fn word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }
}

impl Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("v", &self.v)
            .field("flags", &self.flags)
            .field("i", &self.i)
            .field("pc", &self.pc)
            .field("stack", &self.stack)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("keys", &self.keys)
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

impl Default for Machine {
    fn default() -> Self {
        let mut machine = Machine {
            v: [0; 16],
            flags: [0; 8],
            i: 0,
            pc: 0,
            mem: vec![0; Self::MEM_SIZE],
            stack: Vec::with_capacity(Self::STACK_DEPTH),
            delay: 0,
            sound: 0,
            keys: [false; 16],
            screen: FrameBuffer::default(),
        };
        machine.reset();
        machine
    }
}
