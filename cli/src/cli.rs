use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hdcp_core::{DeviceKeySet, Ksv, MasterMatrix};

use crate::format::Format;

/**
    HDCP 1.x device key generator.
*/
#[derive(Parser)]
#[command(name = "hdcp-gen-key", version)]
pub struct Cli {
    /// Master Key Matrix file: 1600 whitespace-separated hex values,
    /// 56 bits (up to 14 digits) each, row-major 40x40.
    #[arg(short, long)]
    matrix: PathBuf,

    /// Key Selection Vector: up to 10 hex digits, `0x` prefix accepted.
    /// A valid KSV has exactly 20 of its 40 bits set.
    /// [default: randomly generated valid KSV]
    #[arg(short, long)]
    ksv: Option<String>,

    /// Output format and content.
    #[arg(short, long, value_enum, default_value = "text")]
    out: Format,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let text = std::fs::read_to_string(&self.matrix)
            .with_context(|| format!("failed to read matrix file {}", self.matrix.display()))?;
        let matrix = MasterMatrix::from_hex_text(&text)
            .with_context(|| format!("failed to parse matrix file {}", self.matrix.display()))?;

        let ksv = match &self.ksv {
            Some(s) => s.parse::<Ksv>().context("failed to parse KSV")?,
            None => Ksv::random(),
        };
        if !ksv.is_valid() {
            eprintln!(
                "warning: KSV {ksv} has Hamming weight {}, a valid KSV has exactly 20 set bits",
                ksv.count_ones()
            );
        }

        let set = DeviceKeySet::new(&matrix, ksv);
        print!("{}", crate::format::render(&set, self.out)?);
        Ok(())
    }
}
