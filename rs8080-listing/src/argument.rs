use crate::Word;
use std::fmt::{self, Display, Formatter};

/// Operand spelled out by the opcode itself.
#[allow(clippy::upper_case_acronyms)]
#[derive(IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    // Registers
    B,
    C,
    D,
    E,
    H,
    L,
    /// memory at (HL)
    M,
    A,

    SP,
    PSW,
    /// RST vector, 0..=7
    Rst(u8),
}

impl Operand {
    /// Register selected by a 3-bit field of the opcode.
    pub(crate) const REGISTERS: [Operand; 8] = [
        Operand::B,
        Operand::C,
        Operand::D,
        Operand::E,
        Operand::H,
        Operand::L,
        Operand::M,
        Operand::A,
    ];
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Operand::Rst(n) => write!(f, "{}", n),
            _ => {
                let s: &'static str = self.into();
                f.write_str(s)
            }
        }
    }
}

/// Kind of the bytes trailing an opcode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Data {
    D8,
    D16,
    /// 16-bit address, rendered with the `$` marker
    Addr,
}

impl Data {
    pub fn arity(self) -> usize {
        match self {
            Data::D8 => 1,
            Data::D16 | Data::Addr => 2,
        }
    }

    /// Marker text used in template notation, e.g. `LDA $%%`.
    pub fn placeholder(self) -> &'static str {
        match self {
            Data::D8 => "%",
            Data::D16 => "%%",
            Data::Addr => "$%%",
        }
    }

    /// Reads this kind from the bytes following an opcode.
    /// Returns `None` when `bytes` is too short.
    pub fn extract(self, bytes: &[u8]) -> Option<Value> {
        match (self, bytes) {
            (Data::D8, [d8, ..]) => Some(Value::D8(*d8)),
            (Data::D16, [lo, hi, ..]) => Some(Value::D16(Word::new(*lo, *hi))),
            (Data::Addr, [lo, hi, ..]) => Some(Value::Addr(Word::new(*lo, *hi))),
            _ => None,
        }
    }
}

/// Extracted trailing operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Value {
    D8(u8),
    D16(Word),
    Addr(Word),
}

impl Value {
    /// Operand bytes in stream order.
    pub fn bytes(&self) -> ([u8; 2], usize) {
        match *self {
            Value::D8(d8) => ([d8, 0], 1),
            Value::D16(w) | Value::Addr(w) => ([w.lo, w.hi], 2),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Value::D8(d8) => write!(f, "{:02X}", d8),
            Value::D16(w) => write!(f, "{:02X}{:02X}", w.hi, w.lo),
            Value::Addr(w) => write!(f, "${:02X}{:02X}", w.hi, w.lo),
        }
    }
}
