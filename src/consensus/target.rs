//! 256-bit difficulty targets and their compact ("nBits") encoding.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Shr;

/// Unsigned 256-bit target, big-endian bytes.
///
/// Larger values are easier targets; the derived ordering is numeric.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(pub [u8; 32]);

impl Target {
    pub const ZERO: Target = Target([0u8; 32]);
    pub const MAX: Target = Target([0xff; 32]);

    /// Decode a compact difficulty value
    ///
    /// The low 23 bits are the mantissa, the top byte is the length in bytes.
    /// Negative encodings decode to zero; bytes beyond 256 bits are dropped.
    pub fn from_compact(compact: u32) -> Self {
        let size = (compact >> 24) as usize;
        let mantissa = compact & 0x007f_ffff;
        let negative = compact & 0x0080_0000 != 0;

        let mut target = [0u8; 32];
        if negative || mantissa == 0 {
            return Target(target);
        }

        let mantissa_bytes = [(mantissa >> 16) as u8, (mantissa >> 8) as u8, mantissa as u8];
        for (k, byte) in mantissa_bytes.iter().enumerate() {
            // Byte k carries weight 256^(size - 1 - k).
            let Some(position) = size.checked_sub(1 + k) else {
                continue;
            };
            if position < 32 {
                target[31 - position] = *byte;
            }
        }

        Target(target)
    }

    /// Encode as compact difficulty (lossy: only the top 3 bytes survive)
    pub fn to_compact(&self) -> u32 {
        let Some(first_nonzero) = self.0.iter().position(|&b| b != 0) else {
            return 0;
        };

        let mut size = (32 - first_nonzero) as u32;
        let byte_at = |i: usize| self.0.get(i).copied().unwrap_or(0) as u32;
        let mut mantissa = (byte_at(first_nonzero) << 16)
            | (byte_at(first_nonzero + 1) << 8)
            | byte_at(first_nonzero + 2);

        // The 0x00800000 bit is a sign bit; shift it out of the mantissa.
        if mantissa & 0x0080_0000 != 0 {
            mantissa >>= 8;
            size += 1;
        }

        (size << 24) | mantissa
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Shr<u32> for Target {
    type Output = Target;

    fn shr(self, bits: u32) -> Target {
        if bits >= 256 {
            return Target::ZERO;
        }

        let byte_shift = (bits / 8) as usize;
        let bit_shift = bits % 8;
        let mut out = [0u8; 32];

        for i in byte_shift..32 {
            let src = i - byte_shift;
            let mut value = self.0[src] >> bit_shift;
            if bit_shift > 0 && src > 0 {
                value |= self.0[src - 1] << (8 - bit_shift);
            }
            out[i] = value;
        }

        Target(out)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
