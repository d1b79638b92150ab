use crate::{Template, Value};
use std::fmt::{self, Formatter};

/// One decoded instruction, borrowed from the table that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Instruction<'t> {
    /// Position of the opcode in the input
    pub offset: usize,
    pub opcode: u8,
    pub template: &'t Template,
    pub value: Option<Value>,
}

impl<'t> Instruction<'t> {
    pub fn new(offset: usize, opcode: u8, template: &'t Template, value: Option<Value>) -> Self {
        Instruction {
            offset,
            opcode,
            template,
            value,
        }
    }

    /// Bytes consumed: opcode plus operands.
    pub fn size(&self) -> usize {
        self.template.size()
    }

    /// Opcode followed by its operand bytes, in stream order.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        bytes.push(self.opcode);
        if let Some(value) = self.value {
            let (data, n) = value.bytes();
            bytes.extend_from_slice(&data[..n]);
        }
        bytes
    }

    /// Input range `[offset, offset + len)` covered by this instruction.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size()
    }
}

impl fmt::Display for Instruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.template.write_line(f, self.value.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cmd, Data, Operand, Word};

    #[test]
    fn line_and_bytes() {
        let lxi = Template::new(Cmd::LXI)
            .with(Operand::B)
            .with_data(Data::D16);
        let ins = Instruction::new(4, 0x01, &lxi, Some(Value::D16(Word::new(0x34, 0x12))));
        assert_eq!("LXI B, 1234", ins.to_string());
        assert_eq!(vec![0x01, 0x34, 0x12], ins.bytes());
        assert_eq!(4..7, ins.span());

        let nop = Template::new(Cmd::NOP);
        let ins = Instruction::new(0, 0x00, &nop, None);
        assert_eq!("NOP", ins.to_string());
        assert_eq!(1, ins.size());
    }
}
