//! Testing xo8's public API, the way an embedding host would drive it
use xo8::prelude::*;

#[test]
fn machine() {
    let machine = Machine::new(); // Default
    let machine2 = machine.clone(); // Clone
    assert_eq!(machine, machine2); // PartialEq
    println!("{machine:?}"); // Debug
}

#[test]
fn error_display() {
    let error = Error::InvalidOpcode {
        word: 0xffff,
        addr: 0x0200,
    };
    println!("{error} {error:?}");
}

mod load {
    use super::*;

    /// A program of exactly the advertised capacity fits
    #[test]
    fn at_capacity() {
        let mut machine = Machine::new();
        machine.load(&vec![0; Machine::LOAD_CAP]).unwrap();
    }

    /// One byte more does not
    #[test]
    fn over_capacity() {
        let mut machine = Machine::new();
        let err = machine.load(&vec![0; Machine::LOAD_CAP + 1]).unwrap_err();
        assert!(matches!(err, Error::RomTooLarge { .. }));
    }

    /// Loading never disturbs the font tables or the rest of the state
    #[test]
    fn keeps_fonts() {
        let mut machine = Machine::new();
        machine.load(&[0x00, 0xe0]).unwrap();
        assert_eq!(0xf0, machine.memory()[0]);
        assert_eq!(0x7c, machine.memory()[80]);
        assert_eq!(0x200, machine.pc());
    }

    #[test]
    fn missing_file() {
        let mut machine = Machine::new();
        machine
            .load_from_path("this/path/does/not.exist")
            .unwrap_err();
    }
}

mod scenarios {
    use super::*;

    /// LD V0, 5 then ADD V0, 3
    #[test]
    fn load_and_add() {
        let mut machine = Machine::new();
        machine.load(&[0x60, 0x05, 0x70, 0x03]).unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(8, machine.v()[0]);
        assert_eq!(516, machine.pc());
    }

    /// CALL 0x300 from 0x200, then RET
    #[test]
    fn call_and_ret() {
        let mut machine = Machine::new();
        let mut rom = vec![0; 0x102];
        rom[0..2].copy_from_slice(&[0x23, 0x00]); // call 0x300
        rom[0x100..0x102].copy_from_slice(&[0x00, 0xee]); // ret
        machine.load(&rom).unwrap();

        machine.step().unwrap();
        assert_eq!(0x300, machine.pc());
        assert_eq!(1, machine.stack().len());

        machine.step().unwrap();
        assert_eq!(0x202, machine.pc());
        assert_eq!(0, machine.stack().len());
    }

    /// 00fd asks the host to stop
    #[test]
    fn halt() {
        let mut machine = Machine::new();
        machine.load(&[0x00, 0xfd]).unwrap();
        assert_eq!(Step::Halt, machine.step().unwrap());
    }

    /// An undecodable word is an error, and the machine is left alone
    #[test]
    fn invalid_opcode() {
        let mut machine = Machine::new();
        machine.load(&[0xff, 0xff]).unwrap();
        let before = machine.clone();
        let err = machine.step().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOpcode {
                word: 0xffff,
                addr: 0x200
            }
        ));
        assert_eq!(before, machine);
    }

    /// 17 nested calls overflow the return stack
    #[test]
    fn call_overflow() {
        let mut machine = Machine::new();
        machine.load(&[0x22, 0x00]).unwrap(); // call 0x200, forever
        for _ in 0..16 {
            machine.step().unwrap();
        }
        let err = machine.step().unwrap_err();
        assert!(matches!(err, Error::StackOverflow { addr: 0x200 }));
    }

    /// Drawing a font glyph through the public surface
    #[test]
    fn draw_glyph_row() {
        let mut machine = Machine::new();
        // mov #0, v0; font v0, I; draw #5, v0, v0
        machine.load(&[0x60, 0x00, 0xf0, 0x29, 0xd0, 0x05]).unwrap();
        for _ in 0..3 {
            machine.step().unwrap();
        }
        // glyph '0' starts with 0xf0: four cells on, four off
        assert!(machine.redraw_pending());
        for x in 0..4 {
            assert_eq!(1, machine.pixel(x, 0));
            assert_eq!(0, machine.pixel(x + 4, 0));
        }
        assert_eq!(0, machine.v()[0xf]);
        machine.clear_redraw();
        assert!(!machine.redraw_pending());
    }
}

mod keys {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut machine = Machine::new();
        machine.set_key(0xf, true).unwrap();
        assert!(machine.key(0xf).unwrap());
        machine.set_key(0xf, false).unwrap();
        assert!(!machine.key(0xf).unwrap());
    }

    #[test]
    fn invalid_key() {
        let mut machine = Machine::new();
        let before = machine.clone();
        machine
            .set_key(0x21345134, true)
            .expect_err("This should produce an Error::InvalidKey");
        machine
            .key(0x21345134)
            .expect_err("This should produce an Error::InvalidKey");
        // no change has been made, everything is safe.
        assert_eq!(before, machine);
    }
}

mod timers {
    use super::*;

    /// Timers stop at zero instead of wrapping
    #[test]
    fn floor_at_zero() {
        let mut machine = Machine::new();
        machine.load(&[0x60, 0x02, 0xf0, 0x15, 0xf0, 0x18]).unwrap();
        for _ in 0..3 {
            machine.step().unwrap();
        }
        assert_eq!((2, 2), (machine.delay(), machine.sound()));
        for _ in 0..5 {
            machine.tick_timers();
        }
        assert_eq!((0, 0), (machine.delay(), machine.sound()));
    }
}

mod reset {
    use super::*;

    /// Reset restores the boot state, fonts included
    #[test]
    fn restores_boot_state() {
        let mut machine = Machine::new();
        machine
            .load(&[0x00, 0xff, 0xf2, 0x01, 0x60, 0x07, 0xf0, 0x15])
            .unwrap();
        for _ in 0..4 {
            machine.step().unwrap();
        }
        machine.reset();
        assert_eq!(machine, Machine::new());
        assert_eq!(0x200, machine.pc());
        assert_eq!((64, 32, false), machine.resolution());
        assert_eq!(0xf0, machine.memory()[0]);
    }
}
