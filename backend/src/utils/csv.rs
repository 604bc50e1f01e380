use csv::{QuoteStyle, WriterBuilder};

fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Prefixes cells that a spreadsheet would evaluate as a formula.
fn guard_cell(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Renders a header row plus data rows as a fully quoted CSV document.
pub fn render_csv(header: &[&str], rows: &[Vec<String>]) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.iter().map(|field| guard_cell(field)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to flush CSV writer: {}", err))?;
    Ok(String::from_utf8(bytes)?)
}
