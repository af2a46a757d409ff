use notifwire_model::decode_json;
use notifwire_schema::{DocumentKind, RegistryConfig, SchemaError, SchemaRegistry};
use serde_json::Value;

use crate::cmd::ValidateArgs;
use crate::exit::{schema_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat, ValidationReport};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = load_registry(&args)?;
    let text = args.input.read()?;
    let document: Value = serde_json::from_str(&text)
        .map_err(|err| schema_error("invalid document", SchemaError::InvalidJson(err)))?;

    let report = check(&registry, &document);
    print_report(&report, format);

    if report.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn load_registry(args: &ValidateArgs) -> CliResult<SchemaRegistry> {
    let config = RegistryConfig {
        strict_mode: args.strict,
        ..RegistryConfig::default()
    };
    SchemaRegistry::builtin_with_config(config)
        .map_err(|err| schema_error("failed loading schemas", err))
}

/// Run schema validation, then decoding and type/destination agreement.
/// Stops at the first stage that fails.
fn check(registry: &SchemaRegistry, document: &Value) -> ValidationReport {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let channel_type = document
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);
    let mut report = ValidationReport {
        valid: false,
        name,
        channel_type,
        errors: Vec::new(),
    };

    if let Err(err) = registry.validate_value(DocumentKind::Channel, document) {
        report.errors.push(err.to_string());
        return report;
    }

    match decode_json(document).and_then(|channel| channel.validate()) {
        Ok(()) => report.valid = true,
        Err(err) => report.errors.push(err.to_string()),
    }
    report
}
