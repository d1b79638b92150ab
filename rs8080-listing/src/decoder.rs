use crate::{DecodeError, Error, Instruction, OpcodeTable};
use derive_more::{Deref, From};
use once_cell::sync::Lazy;
use std::fmt::{self, Formatter};
use std::io::{Read, Write};
use tracing::{debug, trace, warn};

static INTEL_8080: Lazy<OpcodeTable> = Lazy::new(OpcodeTable::intel_8080);

/// Linear decoder over a borrowed opcode table.
#[derive(Debug, Copy, Clone)]
pub struct Decoder<'t> {
    table: &'t OpcodeTable,
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Decoder { table: &INTEL_8080 }
    }
}

impl<'t> Decoder<'t> {
    pub fn new(table: &'t OpcodeTable) -> Self {
        Decoder { table }
    }

    pub fn table(&self) -> &'t OpcodeTable {
        self.table
    }

    /// Lazily decodes `bytes` from offset 0.
    pub fn decode<'b>(&self, bytes: &'b [u8]) -> Instructions<'t, 'b> {
        debug!(len = bytes.len(), "decoding");
        Instructions {
            table: self.table,
            bytes,
            offset: 0,
            done: false,
        }
    }

    /// Decodes the whole buffer or nothing.
    pub fn listing(&self, bytes: &[u8]) -> Result<Listing, DecodeError> {
        let lines = self
            .decode(bytes)
            .map(|ins| ins.map(|ins| ins.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(lines = lines.len(), "decoded");
        Ok(Listing(lines))
    }

    /// Decodes `bytes` and writes one line per instruction to `out`.
    /// Nothing is written if decoding fails.
    pub fn write_listing<W: Write>(&self, bytes: &[u8], mut out: W) -> Result<usize, Error> {
        let listing = self.listing(bytes)?;
        for line in listing.iter() {
            writeln!(out, "{}", line).map_err(Error::Output)?;
        }
        out.flush().map_err(Error::Output)?;
        Ok(listing.len())
    }

    /// Drains `reader` and decodes everything it produced.
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Listing, Error> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| Error::InputUnavailable { path: None, source })?;
        Ok(self.listing(&bytes)?)
    }
}

/// Iterator returned by [`Decoder::decode`]. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Instructions<'t, 'b> {
    table: &'t OpcodeTable,
    bytes: &'b [u8],
    offset: usize,
    done: bool,
}

impl<'t, 'b> Instructions<'t, 'b> {
    /// Next unconsumed byte index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn step(&self, opcode: u8, rest: &[u8]) -> Result<Instruction<'t>, DecodeError> {
        let offset = self.offset;
        let template = self
            .table
            .lookup(opcode)
            .ok_or(DecodeError::UnmappedOpcode { offset, opcode })?;
        let value = match template.data {
            None => None,
            Some(data) => Some(data.extract(rest).ok_or_else(|| {
                DecodeError::TruncatedOperand {
                    offset,
                    opcode,
                    missing: data.arity() - rest.len(),
                }
            })?),
        };
        Ok(Instruction::new(offset, opcode, template, value))
    }
}

impl<'t, 'b> Iterator for Instructions<'t, 'b> {
    type Item = Result<Instruction<'t>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (&opcode, rest) = self.bytes.split_first()?;
        match self.step(opcode, rest) {
            Ok(ins) => {
                trace!(offset = ins.offset, opcode, "{}", ins);
                self.bytes = self.bytes.split_at(ins.size()).1;
                self.offset += ins.size();
                Some(Ok(ins))
            }
            Err(e) => {
                warn!("decoding stopped: {}", e);
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (usize::from(!self.bytes.is_empty()), Some(self.bytes.len()))
        }
    }
}

impl std::iter::FusedIterator for Instructions<'_, '_> {}

/// Decoded lines in program order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From)]
pub struct Listing(Vec<String>);

impl Listing {
    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Decodes `bytes` with the full 8080 table.
pub fn disassemble(bytes: &[u8]) -> Result<Listing, DecodeError> {
    Decoder::default().listing(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let mut it = Decoder::default().decode(&[]);
        assert!(it.next().is_none());
        assert_eq!(0, it.offset());
    }

    #[test]
    fn stops_after_error() {
        let bytes = [0x00, 0x06];
        let mut it = Decoder::default().decode(&bytes);
        assert!(matches!(it.next(), Some(Ok(_))));
        assert_eq!(
            Some(Err(DecodeError::TruncatedOperand {
                offset: 1,
                opcode: 0x06,
                missing: 1,
            })),
            it.next()
        );
        assert_eq!(None, it.next());
        assert_eq!(1, it.offset());
    }

    #[test]
    fn missing_count() {
        let e = disassemble(&[0x00, 0xC3, 0x00]).unwrap_err();
        assert_eq!(
            DecodeError::TruncatedOperand {
                offset: 1,
                opcode: 0xC3,
                missing: 1,
            },
            e
        );
        let e = disassemble(&[0xCD]).unwrap_err();
        assert_eq!(
            DecodeError::TruncatedOperand {
                offset: 0,
                opcode: 0xCD,
                missing: 2,
            },
            e
        );
    }

    #[test]
    fn unmapped_with_documented_table() {
        let table = OpcodeTable::documented();
        let decoder = Decoder::new(&table);
        assert_eq!(
            Err(DecodeError::UnmappedOpcode {
                offset: 2,
                opcode: 0xCB,
            }),
            decoder.listing(&[0x3E, 0x01, 0xCB, 0x00, 0x00])
        );
    }

    #[test]
    fn write_listing_is_all_or_nothing() {
        let mut out = Vec::new();
        let r = Decoder::default().write_listing(&[0x00, 0x3E], &mut out);
        assert!(matches!(r, Err(Error::Decode(_))));
        assert!(out.is_empty());

        let n = Decoder::default()
            .write_listing(&[0x00, 0x3E, 0x10], &mut out)
            .unwrap();
        assert_eq!(2, n);
        assert_eq!(b"NOP\nMVI A, 10\n".to_vec(), out);
    }

    struct Unplugged;

    impl Write for Unplugged {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_listing_reports_sink_failure() {
        match Decoder::default().write_listing(&[0x00], Unplugged) {
            Err(Error::Output(e)) => assert_eq!(std::io::ErrorKind::BrokenPipe, e.kind()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn listing_display() {
        let listing = disassemble(&[0x00, 0x76]).unwrap();
        assert_eq!("NOP\nHLT\n", listing.to_string());
        assert_eq!(vec!["NOP", "HLT"], listing.into_lines());
    }
}
