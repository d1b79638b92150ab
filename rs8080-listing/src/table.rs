use crate::{Cmd, Data, Operand, Value};
use std::fmt::{self, Display, Formatter};

/// Decode recipe for one opcode byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Template {
    pub cmd: Cmd,
    pub dst: Option<Operand>,
    pub src: Option<Operand>,
    /// Bytes following the opcode, if any.
    pub data: Option<Data>,
}

impl Template {
    pub const fn new(cmd: Cmd) -> Template {
        Template {
            cmd,
            dst: None,
            src: None,
            data: None,
        }
    }

    pub const fn with(mut self, operand: Operand) -> Template {
        if self.dst.is_none() {
            self.dst = Some(operand);
        } else {
            self.src = Some(operand);
        }
        self
    }

    pub const fn with_data(mut self, data: Data) -> Template {
        self.data = Some(data);
        self
    }

    /// Number of operand bytes after the opcode: 0, 1 or 2.
    pub fn arity(&self) -> usize {
        self.data.map_or(0, Data::arity)
    }

    /// Instruction length including the opcode.
    pub fn size(&self) -> usize {
        1 + self.arity()
    }

    /// Text without the trailing operand, e.g. `LXI D`.
    pub fn mnemonic(&self) -> String {
        Template {
            data: None,
            ..*self
        }
        .to_string()
    }

    /// Writes `cmd` followed by the fixed operands and `tail`, comma separated.
    pub(crate) fn write_line(&self, f: &mut Formatter<'_>, value: Option<&Value>) -> fmt::Result {
        self.write_parts(f, value.map(|v| v as &dyn Display))
    }

    fn write_parts(&self, f: &mut Formatter<'_>, tail: Option<&dyn Display>) -> fmt::Result {
        f.write_str(self.cmd.as_ref())?;
        let parts = [
            self.dst.as_ref().map(|o| o as &dyn Display),
            self.src.as_ref().map(|o| o as &dyn Display),
            tail,
        ];
        let mut sep = " ";
        for part in parts.iter().flatten() {
            write!(f, "{}{}", sep, part)?;
            sep = ", ";
        }
        Ok(())
    }
}

/// Template notation: `MOV B, C`, `MVI A, %`, `LDA $%%`.
impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let placeholder = self.data.map(Data::placeholder);
        self.write_parts(f, placeholder.as_ref().map(|p| p as &dyn Display))
    }
}

/// Opcodes the 8080 executes but the datasheet leaves undefined.
pub const UNDOCUMENTED: [u8; 12] = [
    0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38, 0xCB, 0xD9, 0xDD, 0xED, 0xFD,
];

/// Immutable opcode -> template mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
    entries: [Option<Template>; 256],
}

impl OpcodeTable {
    /// Complete table, undocumented opcodes decoded as the silicon runs them.
    pub fn intel_8080() -> OpcodeTable {
        OpcodeTable::from_fn(|opcode| Some(template_8080(opcode)))
    }

    /// Datasheet opcodes only; undocumented bytes stay unmapped.
    pub fn documented() -> OpcodeTable {
        OpcodeTable::from_fn(|opcode| {
            if UNDOCUMENTED.contains(&opcode) {
                None
            } else {
                Some(template_8080(opcode))
            }
        })
    }

    /// Builds a possibly partial table. A repeated opcode keeps the last template.
    pub fn from_entries<I>(entries: I) -> OpcodeTable
    where
        I: IntoIterator<Item = (u8, Template)>,
    {
        let mut table = OpcodeTable {
            entries: [None; 256],
        };
        for (opcode, template) in entries {
            table.entries[opcode as usize] = Some(template);
        }
        table
    }

    fn from_fn(f: impl Fn(u8) -> Option<Template>) -> OpcodeTable {
        let mut entries = [None; 256];
        for opcode in 0..=u8::MAX {
            entries[opcode as usize] = f(opcode);
        }
        OpcodeTable { entries }
    }

    #[inline]
    pub fn lookup(&self, opcode: u8) -> Option<&Template> {
        self.entries[opcode as usize].as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Mapped `(opcode, template)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Template)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(opcode, t)| t.as_ref().map(|t| (opcode as u8, t)))
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        OpcodeTable::intel_8080()
    }
}

const ALU: [Cmd; 8] = [
    Cmd::ADD,
    Cmd::ADC,
    Cmd::SUB,
    Cmd::SBB,
    Cmd::ANA,
    Cmd::XRA,
    Cmd::ORA,
    Cmd::CMP,
];

fn template_8080(opcode: u8) -> Template {
    use Cmd::*;
    use Operand::{A, B, C, D, E, H, L, M, PSW, SP};

    let t = Template::new;
    let d8 = |cmd| t(cmd).with_data(Data::D8);
    let adr = |cmd| t(cmd).with_data(Data::Addr);
    let reg = |bits: u8| Operand::REGISTERS[(bits & 0b111) as usize];

    match opcode {
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => t(NOP),

        0x01 => t(LXI).with(B).with_data(Data::D16),
        0x02 => t(STAX).with(B),
        0x03 => t(INX).with(B),
        0x04 => t(INR).with(B),
        0x05 => t(DCR).with(B),
        0x06 => t(MVI).with(B).with_data(Data::D8),
        0x07 => t(RLC),
        0x09 => t(DAD).with(B),
        0x0A => t(LDAX).with(B),
        0x0B => t(DCX).with(B),
        0x0C => t(INR).with(C),
        0x0D => t(DCR).with(C),
        0x0E => t(MVI).with(C).with_data(Data::D8),
        0x0F => t(RRC),

        0x11 => t(LXI).with(D).with_data(Data::D16),
        0x12 => t(STAX).with(D),
        0x13 => t(INX).with(D),
        0x14 => t(INR).with(D),
        0x15 => t(DCR).with(D),
        0x16 => t(MVI).with(D).with_data(Data::D8),
        0x17 => t(RAL),
        0x19 => t(DAD).with(D),
        0x1A => t(LDAX).with(D),
        0x1B => t(DCX).with(D),
        0x1C => t(INR).with(E),
        0x1D => t(DCR).with(E),
        0x1E => t(MVI).with(E).with_data(Data::D8),
        0x1F => t(RAR),

        0x21 => t(LXI).with(H).with_data(Data::D16),
        0x22 => adr(SHLD),
        0x23 => t(INX).with(H),
        0x24 => t(INR).with(H),
        0x25 => t(DCR).with(H),
        0x26 => t(MVI).with(H).with_data(Data::D8),
        0x27 => t(DAA),
        0x29 => t(DAD).with(H),
        0x2A => adr(LHLD),
        0x2B => t(DCX).with(H),
        0x2C => t(INR).with(L),
        0x2D => t(DCR).with(L),
        0x2E => t(MVI).with(L).with_data(Data::D8),
        0x2F => t(CMA),

        0x31 => t(LXI).with(SP).with_data(Data::D16),
        0x32 => adr(STA),
        0x33 => t(INX).with(SP),
        0x34 => t(INR).with(M),
        0x35 => t(DCR).with(M),
        0x36 => t(MVI).with(M).with_data(Data::D8),
        0x37 => t(STC),
        0x39 => t(DAD).with(SP),
        0x3A => adr(LDA),
        0x3B => t(DCX).with(SP),
        0x3C => t(INR).with(A),
        0x3D => t(DCR).with(A),
        0x3E => t(MVI).with(A).with_data(Data::D8),
        0x3F => t(CMC),

        // MOV M, M slot
        0x76 => t(HLT),
        0x40..=0x7F => t(MOV).with(reg(opcode >> 3)).with(reg(opcode)),
        0x80..=0xBF => t(ALU[((opcode >> 3) & 0b111) as usize]).with(reg(opcode)),

        0xC0 => t(RNZ),
        0xC1 => t(POP).with(B),
        0xC2 => adr(JNZ),
        0xC3 | 0xCB => adr(JMP),
        0xC4 => adr(CNZ),
        0xC5 => t(PUSH).with(B),
        0xC6 => d8(ADI),
        0xC8 => t(RZ),
        0xC9 | 0xD9 => t(RET),
        0xCA => adr(JZ),
        0xCC => adr(CZ),
        0xCD | 0xDD | 0xED | 0xFD => adr(CALL),
        0xCE => d8(ACI),

        0xD0 => t(RNC),
        0xD1 => t(POP).with(D),
        0xD2 => adr(JNC),
        0xD3 => d8(OUT),
        0xD4 => adr(CNC),
        0xD5 => t(PUSH).with(D),
        0xD6 => d8(SUI),
        0xD8 => t(RC),
        0xDA => adr(JC),
        0xDB => d8(IN),
        0xDC => adr(CC),
        0xDE => d8(SBI),

        0xE0 => t(RPO),
        0xE1 => t(POP).with(H),
        0xE2 => adr(JPO),
        0xE3 => t(XTHL),
        0xE4 => adr(CPO),
        0xE5 => t(PUSH).with(H),
        0xE6 => d8(ANI),
        0xE8 => t(RPE),
        0xE9 => t(PCHL),
        0xEA => adr(JPE),
        0xEB => t(XCHG),
        0xEC => adr(CPE),
        0xEE => d8(XRI),

        0xF0 => t(RP),
        0xF1 => t(POP).with(PSW),
        0xF2 => adr(JP),
        0xF3 => t(DI),
        0xF4 => adr(CP),
        0xF5 => t(PUSH).with(PSW),
        0xF6 => d8(ORI),
        0xF8 => t(RM),
        0xF9 => t(SPHL),
        0xFA => adr(JM),
        0xFB => t(EI),
        0xFC => adr(CM),
        0xFE => d8(CPI),

        // RST n lives at 0b11nnn111
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            t(RST).with(Operand::Rst((opcode >> 3) & 0b111))
        }
    }
}
