//! Linear 8080 disassembler: opcode table plus a forward-only decode loop
//! turning a byte buffer into one assembly line per instruction.

#[macro_use]
extern crate strum_macros;

mod argument;
mod cmd;
mod decoder;
mod error;
mod input;
mod instruction;
mod table;
mod word;

pub use argument::{Data, Operand, Value};
pub use cmd::Cmd;
pub use decoder::{disassemble, Decoder, Instructions, Listing};
pub use error::{DecodeError, Error};
pub use input::read_input;
pub use instruction::Instruction;
pub use table::{OpcodeTable, Template, UNDOCUMENTED};
pub use word::Word;
