use notifwire_model::decode_binary;
use tracing::debug;

use crate::cmd::DecodeArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_channel, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = args.read()?;
    debug!(bytes = bytes.len(), "decoding channel");

    let channel = decode_binary(&bytes).map_err(|err| channel_error("decode failed", err))?;
    if args.validate {
        channel
            .validate()
            .map_err(|err| channel_error("validation failed", err))?;
    }

    print_channel(&channel, format);
    Ok(SUCCESS)
}
