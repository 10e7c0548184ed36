pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "pgarray")]
#[command(about = "pgarray - inspect and produce array-literal column values")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Encode values as array-literal text")]
    Encode {
        #[arg(help = "Values to encode, in order")]
        values: Vec<String>,
        #[arg(long, help = "Read a JSON array of strings from stdin instead")]
        stdin: bool,
    },

    #[command(about = "Decode array-literal text (reads stdin when TEXT is omitted)")]
    Decode {
        #[arg(help = "Array-literal text, e.g. {a,\"b c\"}")]
        text: Option<String>,
    },

    #[command(about = "Check that array-literal text is in canonical form")]
    Check {
        #[arg(help = "Array-literal text (reads stdin when omitted)")]
        text: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json { pretty: bool },
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli, config: &AppConfig) -> Self {
        let json = if cli.json {
            true
        } else if cli.text {
            false
        } else {
            config.output.default_json
        };

        if json {
            OutputFormat::Json { pretty: config.output.pretty_json }
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli, config);

    match cli.command {
        Commands::Encode { values, stdin } => commands::array::encode(values, stdin, output_format),
        Commands::Decode { text } => commands::array::decode(text, output_format),
        Commands::Check { text } => commands::array::check(text, output_format),
    }
}
