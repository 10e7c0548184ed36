use anyhow::Context;
use serde_json::Value;
use std::io::Read;

use crate::cli::OutputFormat;

/// Read all of stdin, dropping one trailing newline so piped text decodes as typed.
pub fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(trim_line_ending(buf))
}

pub fn trim_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Take the positional argument, or stdin when it was omitted
pub fn arg_or_stdin(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => read_stdin(),
    }
}

/// Render a JSON value honouring the pretty-print setting
pub fn render_json(value: &Value, output_format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match output_format {
        OutputFormat::Json { pretty: true } => serde_json::to_string_pretty(value)?,
        _ => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_one_line_ending() {
        assert_eq!(trim_line_ending("{a}\n".to_string()), "{a}");
        assert_eq!(trim_line_ending("{a}\r\n".to_string()), "{a}");
        assert_eq!(trim_line_ending("{a}\n\n".to_string()), "{a}\n");
        assert_eq!(trim_line_ending("{a} ".to_string()), "{a} ");
    }

    #[test]
    fn renders_compact_json() {
        let out = render_json(&json!(["a"]), OutputFormat::Json { pretty: false }).unwrap();
        assert_eq!(out, r#"["a"]"#);
    }
}
