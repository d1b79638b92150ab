use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("opcode {opcode:#04X} at offset {offset:#06X} has no template")]
    UnmappedOpcode { offset: usize, opcode: u8 },

    #[error("opcode {opcode:#04X} at offset {offset:#06X} is missing {missing} operand byte(s)")]
    TruncatedOperand {
        offset: usize,
        opcode: u8,
        missing: usize,
    },
}

impl DecodeError {
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::UnmappedOpcode { offset, .. }
            | DecodeError::TruncatedOperand { offset, .. } => offset,
        }
    }

    pub fn opcode(&self) -> u8 {
        match *self {
            DecodeError::UnmappedOpcode { opcode, .. }
            | DecodeError::TruncatedOperand { opcode, .. } => opcode,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("input unavailable{}", display_path(.path))]
    InputUnavailable {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to write listing")]
    Output(#[source] io::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(": {}", p.display()),
        None => String::new(),
    }
}
