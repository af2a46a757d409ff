use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use notifwire_model::{encode_json, Channel, Destination};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Outcome of a `validate` run.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub channel_type: Option<String>,
    pub errors: Vec<String>,
}

pub fn print_channel(channel: &Channel, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", encode_json(channel)),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in channel_rows(channel) {
                table.add_row(vec![field, &value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (field, value) in channel_rows(channel) {
                println!("{field}={value}");
            }
        }
    }
}

pub fn print_report(report: &ValidationReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["VALID", "NAME", "TYPE", "ERRORS"])
                .add_row(vec![
                    report.valid.to_string(),
                    report.name.clone().unwrap_or_default(),
                    report.channel_type.clone().unwrap_or_default(),
                    report.errors.join("\n"),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "valid={} name={} type={}",
                report.valid,
                report.name.as_deref().unwrap_or("-"),
                report.channel_type.as_deref().unwrap_or("-")
            );
            for error in &report.errors {
                println!("error: {error}");
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn channel_rows(channel: &Channel) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("name", channel.name.clone()),
        ("type", channel.channel_type.to_string()),
        ("header", optional(channel.header.as_deref())),
        ("footer", optional(channel.footer.as_deref())),
        ("features", channel.features.join(",")),
    ];

    match &channel.destination {
        Destination::Slack(slack) => rows.push(("slack.url", slack.url.clone())),
        Destination::Chime(chime) => rows.push(("chime.url", chime.url.clone())),
        Destination::Webhook(webhook) => {
            rows.push(("webhook.url", webhook.url.clone()));
            rows.push(("webhook.schema", webhook.schema.clone()));
            rows.push(("webhook.host", webhook.host.clone()));
            rows.push(("webhook.port", webhook.port.to_string()));
            rows.push(("webhook.path", webhook.path.clone()));
            rows.push(("webhook.queryParams", pairs(&webhook.query_params)));
            rows.push(("webhook.headerParams", pairs(&webhook.header_params)));
            rows.push(("webhook.username", optional(webhook.username.as_deref())));
            let password = webhook.password.as_ref().map(|_| "<redacted>");
            rows.push(("webhook.password", optional(password)));
        }
    }
    rows
}

fn optional(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), str::to_string)
}

fn pairs(map: &notifwire_model::StringMap) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
