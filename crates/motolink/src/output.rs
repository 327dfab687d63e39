use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use motolink_frame::{CommandFrame, Response};
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

#[derive(Serialize)]
struct ResponseOutput<'a> {
    port: &'a str,
    opcode: u8,
    axis: u8,
    status: u16,
    status_text: String,
    error_only: bool,
    words: &'a [u16],
}

pub fn print_response(port: &str, command: &CommandFrame, response: &Response, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ResponseOutput {
                port,
                opcode: command.opcode(),
                axis: command.axis(),
                status: response.status.code(),
                status_text: response.status.to_string(),
                error_only: response.error_only,
                words: &response.words,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OPCODE", "AXIS", "STATUS", "WORDS"])
                .add_row(vec![
                    format!("{:#04x}", command.opcode()),
                    command.axis().to_string(),
                    response.status.to_string(),
                    words_hex(&response.words),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "opcode={:#04x} axis={} status={} words=[{}]",
                command.opcode(),
                command.axis(),
                response.status,
                words_hex(&response.words)
            );
        }
    }
}

pub fn print_lines(title: &str, rows: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![title.to_uppercase()]);
            for row in rows {
                table.add_row(vec![row.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!("{row}");
            }
        }
    }
}

pub fn words_hex(words: &[u16]) -> String {
    words
        .iter()
        .map(|word| format!("{word:#06x}"))
        .collect::<Vec<_>>()
        .join(", ")
}
