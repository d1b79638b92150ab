/// Two operand bytes in memory order; `lo` comes first in the stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Word {
    pub lo: u8,
    pub hi: u8,
}

impl Word {
    pub fn new(lo: u8, hi: u8) -> Word {
        Word { lo, hi }
    }
}

impl From<Word> for u16 {
    fn from(x: Word) -> Self {
        ((x.hi as u16) << 8) | x.lo as u16
    }
}

#[cfg(test)]
mod tests {
    use super::Word;

    #[test]
    fn little_endian_combination() {
        assert_eq!(0x1234u16, Word::new(0x34, 0x12).into());
        assert_eq!(0x2000u16, Word::new(0x00, 0x20).into());
        assert_eq!(0xABCDu16, Word::new(0xCD, 0xAB).into());
    }
}
