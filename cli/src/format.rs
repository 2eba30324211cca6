use anyhow::{Context, Result};
use clap::ValueEnum;
use hdcp_core::{DeviceKey, DeviceKeySet, MasterMatrix};
use serde::Serialize;

/**
    Output format and content selection.

    The `*Full` variants additionally emit the full Master Key Matrix,
    which is rarely what an operator wants on a terminal.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// KSV, source key and sink key as a readable table.
    Text,
    /// Source key table only.
    TextSource,
    /// Sink key table only.
    TextSink,
    /// KSV and source key table.
    TextSourceKsv,
    /// KSV and sink key table.
    TextSinkKsv,
    /// Source key as one line of space-separated hex values.
    LineSource,
    /// Sink key as one line of space-separated hex values.
    LineSink,
    /// KSV, both keys and the full matrix as readable tables.
    TextFull,
    Json,
    JsonFull,
    Yaml,
    YamlFull,
    Xml,
    XmlFull,
    Toml,
    TomlFull,
}

/**
    Render a derived key set in the requested format.

    Every value is emitted as fixed-width lowercase hex: 10 digits for the
    KSV, 14 digits for the 56-bit key and matrix entries.
*/
pub fn render(set: &DeviceKeySet<'_>, format: Format) -> Result<String> {
    let out = match format {
        Format::Text => format!(
            "ksv: {}\n\nSource:\n{}\nSink:\n{}",
            set.ksv(),
            key_grid(set.source()),
            key_grid(set.sink()),
        ),
        Format::TextSource => format!("Source:\n{}", key_grid(set.source())),
        Format::TextSink => format!("Sink:\n{}", key_grid(set.sink())),
        Format::TextSourceKsv => format!(
            "ksv: {}\n\nSource:\n{}",
            set.ksv(),
            key_grid(set.source())
        ),
        Format::TextSinkKsv => {
            format!("ksv: {}\n\nSink:\n{}", set.ksv(), key_grid(set.sink()))
        }
        Format::LineSource => key_line(set.source()),
        Format::LineSink => key_line(set.sink()),
        Format::TextFull => format!(
            "ksv: {}\n\nSource:\n{}\nSink:\n{}\nMaster key matrix:\n{}",
            set.ksv(),
            key_grid(set.source()),
            key_grid(set.sink()),
            matrix_grid(set.matrix()),
        ),
        Format::Json | Format::JsonFull => {
            let mut json =
                serde_json::to_string_pretty(&KeySetReport::new(set, format == Format::JsonFull))
                    .context("JSON serialization failed")?;
            json.push('\n');
            json
        }
        Format::Yaml | Format::YamlFull => {
            serde_yaml::to_string(&KeySetReport::new(set, format == Format::YamlFull))
                .context("YAML serialization failed")?
        }
        Format::Toml | Format::TomlFull => {
            toml::to_string(&KeySetReport::new(set, format == Format::TomlFull))
                .context("TOML serialization failed")?
        }
        Format::Xml | Format::XmlFull => {
            let body = quick_xml::se::to_string(&XmlReport::new(set, format == Format::XmlFull))
                .context("XML serialization failed")?;
            format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n")
        }
    };
    Ok(out)
}

/**
    Report shape for the serde-backed formats (JSON, YAML, TOML).
*/
#[derive(Serialize)]
struct KeySetReport {
    ksv: String,
    source: Vec<String>,
    sink: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    master_key: Option<Vec<String>>,
}

impl KeySetReport {
    fn new(set: &DeviceKeySet<'_>, full: bool) -> Self {
        Self {
            ksv: set.ksv().to_hex(),
            source: hex_entries(set.source()),
            sink: hex_entries(set.sink()),
            master_key: full.then(|| matrix_entries(set.matrix())),
        }
    }
}

/**
    XML wants repeated `<item>` children under each array element, so the
    report gets its own shape for quick-xml.
*/
#[derive(Serialize)]
#[serde(rename = "hdcp")]
struct XmlReport {
    ksv: String,
    source: XmlItems,
    sink: XmlItems,
    #[serde(skip_serializing_if = "Option::is_none")]
    master_key: Option<XmlItems>,
}

#[derive(Serialize)]
struct XmlItems {
    item: Vec<String>,
}

impl XmlReport {
    fn new(set: &DeviceKeySet<'_>, full: bool) -> Self {
        Self {
            ksv: set.ksv().to_hex(),
            source: XmlItems {
                item: hex_entries(set.source()),
            },
            sink: XmlItems {
                item: hex_entries(set.sink()),
            },
            master_key: full.then(|| XmlItems {
                item: matrix_entries(set.matrix()),
            }),
        }
    }
}

fn hex_entries(key: &DeviceKey) -> Vec<String> {
    key.iter().map(|e| e.to_hex()).collect()
}

fn matrix_entries(matrix: &MasterMatrix) -> Vec<String> {
    matrix.entries().iter().map(|e| e.to_hex()).collect()
}

fn key_grid(key: &DeviceKey) -> String {
    hex_grid(key.iter().map(|e| e.to_hex()))
}

fn matrix_grid(matrix: &MasterMatrix) -> String {
    hex_grid(matrix.entries().iter().map(|e| e.to_hex()))
}

/**
    Table of hex values, 5 per line. Entry counts here are always a
    multiple of 5, so the output ends with a newline.
*/
fn hex_grid(values: impl IntoIterator<Item = String>) -> String {
    let mut out = String::new();
    for (i, value) in values.into_iter().enumerate() {
        out.push_str(&value);
        out.push(if (i + 1) % 5 == 0 { '\n' } else { ' ' });
    }
    out
}

/**
    All 40 values on a single space-separated line.
*/
fn key_line(key: &DeviceKey) -> String {
    let mut line = key
        .iter()
        .map(|e| e.to_hex())
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}
