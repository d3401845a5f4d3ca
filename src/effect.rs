// effect.rs - The stack-effect algebra

use std::fmt;

use crate::errors::ForthError;

/// The effect of a word on the operand stack: `input` is the minimum depth
/// it needs on entry, `net` the change in depth on exit, `max` the peak
/// depth while it runs (counted from the bottom of the `input` items).
/// `output` is `input + net`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackEffect {
    input: u8,
    net: i8,
    max: u16,
}

impl StackEffect {
    pub const fn new(input: u8, output: u8) -> StackEffect {
        StackEffect {
            input,
            net: (output as i16 - input as i16) as i8,
            max: if input > output {
                input as u16
            } else {
                output as u16
            },
        }
    }

    pub const fn with_max(input: u8, output: u8, max: u16) -> StackEffect {
        StackEffect {
            input,
            net: (output as i16 - input as i16) as i8,
            max,
        }
    }

    pub fn input(self) -> u8 {
        self.input
    }

    pub fn output(self) -> u8 {
        (self.input as i16 + self.net as i16) as u8
    }

    pub fn net(self) -> i8 {
        self.net
    }

    pub fn max(self) -> u16 {
        self.max
    }

    /// The cumulative effect of `self` followed by `other`. `other`'s needs
    /// are served first from whatever `self` leaves behind, so its `input`
    /// is offset by `self`'s net before it can demand anything deeper.
    pub fn then(self, other: StackEffect) -> Result<StackEffect, ForthError> {
        let input = i32::max(
            self.input as i32,
            other.input as i32 - self.net as i32,
        );
        let net = self.net as i32 + other.net as i32;
        let max = input
            + i32::max(
                self.max as i32 - self.input as i32,
                self.net as i32 + other.max as i32 - other.input as i32,
            );
        if input > u8::MAX as i32 || net < i8::MIN as i32 || net > i8::MAX as i32 || max > u16::MAX as i32
        {
            return Err(ForthError::StackEffectOverflow);
        }
        Ok(StackEffect {
            input: input as u8,
            net: net as i8,
            max: max as u16,
        })
    }

    /// Two alternative paths may join only when they agree on the net change.
    pub fn can_merge(self, other: StackEffect) -> bool {
        self.net == other.net
    }

    /// The effect of doing either `self` or `other` (which must have the
    /// same net): whichever needs the deeper entry stack covers both.
    pub fn merge(self, other: StackEffect) -> StackEffect {
        debug_assert!(self.can_merge(other));
        if self.input >= other.input {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for StackEffect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}->{}, max {})", self.input(), self.output(), self.max())
    }
}
