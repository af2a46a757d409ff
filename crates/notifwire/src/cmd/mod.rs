use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON channel document into the binary wire format.
    Encode(EncodeArgs),
    /// Decode a binary channel and print it.
    Decode(DecodeArgs),
    /// Check a JSON channel document against its schema and model rules.
    Validate(ValidateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Validate(args) => validate::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// JSON document source shared by `encode` and `validate`. Reads stdin when
/// neither option is given.
#[derive(Args, Debug)]
pub struct JsonInput {
    /// Inline JSON document.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON document from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
}

impl JsonInput {
    pub fn read(&self) -> CliResult<String> {
        if let Some(json) = &self.json {
            return Ok(json.clone());
        }
        if let Some(path) = &self.file {
            return fs::read_to_string(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| io_error("failed reading stdin", err))?;
        Ok(text)
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: JsonInput,
    /// Write the encoded bytes to a file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Write lowercase hex instead of raw bytes.
    #[arg(long)]
    pub hex: bool,
    /// Skip the type/destination agreement check.
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Read the binary channel from a file. Reads stdin when omitted.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Hex-encoded binary channel.
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Also check type/destination agreement.
    #[arg(long)]
    pub validate: bool,
}

impl DecodeArgs {
    pub fn read(&self) -> CliResult<Vec<u8>> {
        if let Some(text) = &self.hex {
            return hex::decode(text.trim())
                .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")));
        }
        if let Some(path) = &self.file {
            return fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|err| io_error("failed reading stdin", err))?;
        Ok(bytes)
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: JsonInput,
    /// Reject properties the schema does not declare.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
