use crate::config::ListingOptions;
use rs8080_listing::{DecodeError, Decoder, Error, Instruction, OpcodeTable};
use std::io::Write;
use strum::IntoEnumIterator;

/// Decodes all of `bytes` into listing lines, decorated per `options`.
/// Nothing is produced unless the whole buffer decodes.
pub(crate) fn render(
    decoder: &Decoder<'_>,
    bytes: &[u8],
    options: ListingOptions,
) -> Result<Vec<String>, DecodeError> {
    if !options.decorated() {
        return Ok(decoder.listing(bytes)?.into_lines());
    }
    let instructions = decoder.decode(bytes).collect::<Result<Vec<_>, _>>()?;
    Ok(instructions
        .iter()
        .map(|ins| decorate(ins, options))
        .collect())
}

/// Writes one line each, returns the count.
pub(crate) fn write_lines<W: Write>(lines: &[String], mut out: W) -> Result<usize, Error> {
    for line in lines {
        writeln!(out, "{}", line).map_err(Error::Output)?;
    }
    out.flush().map_err(Error::Output)?;
    Ok(lines.len())
}

fn decorate(ins: &Instruction<'_>, options: ListingOptions) -> String {
    let mut line = String::new();
    if options.addresses {
        line.push_str(&format!("{:04X}  ", ins.offset));
    }
    if options.bytes {
        let hex: Vec<String> = ins.bytes().iter().map(|b| format!("{:02X}", b)).collect();
        line.push_str(&format!("{:<10}", hex.join(" ")));
    }
    line.push_str(&ins.to_string());
    line
}

/// Dumps the table grouped by mnemonic, `opcode template` per line.
pub(crate) fn write_table<W: Write>(table: &OpcodeTable, mut out: W) -> std::io::Result<()> {
    for cmd in rs8080_listing::Cmd::iter() {
        for (opcode, template) in table.iter().filter(|(_, t)| t.cmd == cmd) {
            writeln!(out, "{:02X}  {}", opcode, template)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(bytes: &[u8], options: ListingOptions) -> String {
        let lines = render(&Decoder::default(), bytes, options).unwrap();
        let mut out = Vec::new();
        assert_eq!(lines.len(), write_lines(&lines, &mut out).unwrap());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain() {
        assert_eq!(
            "LXI B, 1234\nHLT\n",
            listing(&[0x01, 0x34, 0x12, 0x76], ListingOptions::default())
        );
    }

    #[test]
    fn addresses_and_bytes() {
        let options = ListingOptions {
            addresses: true,
            bytes: true,
            documented_only: false,
        };
        assert_eq!(
            "0000  01 34 12  LXI B, 1234\n0003  76        HLT\n",
            listing(&[0x01, 0x34, 0x12, 0x76], options)
        );
    }

    #[test]
    fn decorated_failure_renders_nothing() {
        let options = ListingOptions {
            addresses: true,
            ..ListingOptions::default()
        };
        assert_eq!(
            Err(DecodeError::TruncatedOperand {
                offset: 1,
                opcode: 0x3A,
                missing: 1,
            }),
            render(&Decoder::default(), &[0x00, 0x3A, 0x00], options)
        );
    }

    #[test]
    fn table_dump() {
        let mut out = Vec::new();
        write_table(&OpcodeTable::intel_8080(), &mut out).unwrap();
        let dump = String::from_utf8(out).unwrap();
        assert_eq!(256, dump.lines().count());
        assert_eq!(Some("00  NOP"), dump.lines().next());
        assert!(dump.contains("3A  LDA $%%\n"));
        assert!(dump.ends_with("FF  RST 7\n"));
    }
}
