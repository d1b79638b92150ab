mod config;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use config::{load_config, Config, ListingOptions, DEFAULT_CONFIG};
use rs8080_listing::{read_input, Decoder, OpcodeTable};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rs8080-lister")]
#[command(about = "Linear Intel 8080 disassembler", long_about = None)]
struct Args {
    /// ROM image to disassemble
    input: Option<PathBuf>,

    /// Write the listing here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix lines with the opcode offset
    #[arg(long, action = ArgAction::SetTrue)]
    addresses: bool,

    /// Prefix lines with the raw instruction bytes
    #[arg(long, action = ArgAction::SetTrue)]
    bytes: bool,

    /// Treat undocumented opcodes as errors
    #[arg(long, action = ArgAction::SetTrue)]
    documented_only: bool,

    /// Print the opcode table and exit
    #[arg(long, action = ArgAction::SetTrue)]
    table: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Flags only switch options on; config supplies the rest.
    fn merge(&self, config: &Config) -> ListingOptions {
        ListingOptions {
            addresses: self.addresses || config.listing.addresses,
            bytes: self.bytes || config.listing.bytes,
            documented_only: self.documented_only || config.listing.documented_only,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn config_for(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = config_for(&args)?;
    let options = args.merge(&config);
    debug!(?options, "listing options");

    let table = if options.documented_only {
        OpcodeTable::documented()
    } else {
        OpcodeTable::intel_8080()
    };
    let output_path = args.output.as_deref().or(config.output.as_deref());

    if args.table {
        let out = open_output(output_path)?;
        return output::write_table(&table, out).context("failed to write table");
    }

    let input = args
        .input
        .as_deref()
        .or(config.input.as_deref())
        .context("No input file given.")?;
    let bytes = read_input(input)?;
    info!(path = %input.display(), len = bytes.len(), "loaded");

    let lines = list_to(&Decoder::new(&table), &bytes, options, output_path)?;
    info!(lines, "done");
    Ok(())
}

/// Decodes first; the sink is opened (and a file truncated) only on success.
fn list_to(
    decoder: &Decoder<'_>,
    bytes: &[u8],
    options: ListingOptions,
    output_path: Option<&Path>,
) -> Result<usize> {
    let lines = output::render(decoder, bytes, options)?;
    let out = open_output(output_path)?;
    Ok(output::write_lines(&lines, out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from(["rs8080-lister", "rom.bin", "--bytes", "-vv"]).unwrap();
        assert_eq!(Some(PathBuf::from("rom.bin")), args.input);
        assert_eq!(2, args.verbose);

        let config = config::parse_config("[listing]\naddresses = true\n").unwrap();
        assert_eq!(
            ListingOptions {
                addresses: true,
                bytes: true,
                documented_only: false,
            },
            args.merge(&config)
        );
    }

    #[test]
    fn input_is_optional_on_the_command_line() {
        let args = Args::try_parse_from(["rs8080-lister", "--table", "-o", "table.txt"]).unwrap();
        assert_eq!(None, args.input);
        assert!(args.table);
        assert_eq!(Some(PathBuf::from("table.txt")), args.output);
    }

    #[test]
    fn failed_decode_keeps_existing_output() {
        let path = std::env::temp_dir().join(format!("rs8080-lister-{}.asm", std::process::id()));
        std::fs::write(&path, "NOP\n").unwrap();

        let decoder = Decoder::default();
        let options = ListingOptions::default();
        let r = list_to(&decoder, &[0x00, 0x06], options, Some(path.as_path()));
        assert!(r.is_err());
        assert_eq!("NOP\n", std::fs::read_to_string(&path).unwrap());

        let written = list_to(&decoder, &[0x76, 0x07], options, Some(path.as_path())).unwrap();
        assert_eq!(2, written);
        assert_eq!("HLT\nRLC\n", std::fs::read_to_string(&path).unwrap());
        std::fs::remove_file(&path).unwrap();
    }
}
