use notifwire_model::{decode_json_str, encode_binary};
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{channel_error, io_error, CliResult, SUCCESS};
use crate::output::print_raw;

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let text = args.input.read()?;
    let channel = decode_json_str(&text).map_err(|err| channel_error("decode failed", err))?;
    if !args.no_validate {
        channel
            .validate()
            .map_err(|err| channel_error("validation failed", err))?;
    }

    let bytes = encode_binary(&channel);
    let payload = if args.hex {
        let mut text = hex::encode(&bytes);
        text.push('\n');
        text.into_bytes()
    } else {
        bytes.to_vec()
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &payload)
                .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
            info!(
                channel = %channel.name,
                bytes = bytes.len(),
                path = %path.display(),
                "encoded channel"
            );
        }
        None => print_raw(&payload),
    }

    Ok(SUCCESS)
}
