use anyhow::Context;
use serde_json::json;

use crate::cli::utils::{arg_or_stdin, read_stdin, render_json};
use crate::cli::OutputFormat;
use crate::codec::{self, StringArray};

pub fn encode(values: Vec<String>, stdin: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let values = if stdin { parse_values(&read_stdin()?)? } else { values };
    println!("{}", render_encode(&values, output_format)?);
    Ok(())
}

pub fn decode(text: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let text = arg_or_stdin(text)?;
    println!("{}", render_decode(&text, output_format)?);
    Ok(())
}

pub fn check(text: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let text = arg_or_stdin(text)?;
    let (canonical, rendered) = render_check(&text, output_format)?;
    println!("{}", rendered);
    if !canonical {
        anyhow::bail!("array literal is not in canonical form");
    }
    Ok(())
}

fn parse_values(input: &str) -> anyhow::Result<Vec<String>> {
    let array: StringArray =
        serde_json::from_str(input).context("stdin must be a JSON array of strings")?;
    Ok(array.into_inner())
}

pub fn render_encode(values: &[String], output_format: OutputFormat) -> anyhow::Result<String> {
    let encoded = codec::encode(values);
    match output_format {
        OutputFormat::Text => Ok(encoded),
        OutputFormat::Json { .. } => render_json(
            &json!({
                "success": true,
                "count": values.len(),
                "encoded": encoded,
            }),
            output_format,
        ),
    }
}

pub fn render_decode(text: &str, output_format: OutputFormat) -> anyhow::Result<String> {
    let values = codec::decode(text);
    match output_format {
        OutputFormat::Text => Ok(render_decode_text(&values)),
        OutputFormat::Json { .. } => render_json(
            &json!({
                "success": true,
                "count": values.len(),
                "values": values,
            }),
            output_format,
        ),
    }
}

// Count line, then one debug-quoted element per line.
fn render_decode_text(values: &[String]) -> String {
    let mut out = format!("{} value(s)", values.len());
    for value in values {
        out.push('\n');
        out.push_str(&format!("{:?}", value));
    }
    out
}

/// Returns whether `text` is canonical along with the rendered report.
pub fn render_check(text: &str, output_format: OutputFormat) -> anyhow::Result<(bool, String)> {
    let canonical = codec::encode(codec::decode(text));
    let is_canonical = canonical == text;

    let rendered = match output_format {
        OutputFormat::Text if is_canonical => "✓ canonical".to_string(),
        OutputFormat::Text => format!("✗ not canonical, expected: {}", canonical),
        OutputFormat::Json { .. } => render_json(
            &json!({
                "success": is_canonical,
                "input": text,
                "canonical": canonical,
            }),
            output_format,
        )?,
    };

    Ok((is_canonical, rendered))
}
