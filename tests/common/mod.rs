#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

pub const HILLSTROM_HEADER: &str =
    "recency,history_segment,history,mens,womens,zip_code,newbie,channel,segment,visit,conversion,spend";

const HISTORY_SEGMENTS: [&str; 7] = [
    "1) $0 - $100",
    "2) $100 - $200",
    "3) $200 - $350",
    "4) $350 - $500",
    "5) $500 - $750",
    "6) $750 - $1,000",
    "7) $1,000 +",
];
const ZIP_CODES: [&str; 3] = ["Surburban", "Rural", "Urban"];
const CHANNELS: [&str; 3] = ["Phone", "Web", "Multichannel"];
const SEGMENTS: [&str; 3] = ["Womens E-Mail", "No E-Mail", "Mens E-Mail"];

/// Hillstrom-shaped CSV with `rows` rows; `recency` is the row number so rows
/// can be traced through filters and splits.
pub fn hillstrom_csv(rows: usize) -> String {
    let mut csv = String::from(HILLSTROM_HEADER);
    csv.push('\n');
    for i in 0..rows {
        let history = 29.99 + (i * 37 % 900) as f64;
        csv.push_str(&format!(
            "{},\"{}\",{:.2},{},{},{},{},{},{},{},{},{:.2}\n",
            i,
            HISTORY_SEGMENTS[i % HISTORY_SEGMENTS.len()],
            history,
            i % 2,
            (i / 2) % 2,
            ZIP_CODES[i % ZIP_CODES.len()],
            (i / 3) % 2,
            CHANNELS[(i / 2) % CHANNELS.len()],
            SEGMENTS[(i / 5) % SEGMENTS.len()],
            (i % 4 == 0) as u8,
            (i % 20 == 0) as u8,
            if i % 20 == 0 { 49.5 } else { 0.0 },
        ));
    }
    csv
}

/// Segment code of fixture row `i`
pub fn hillstrom_segment_code(i: usize) -> f64 {
    match SEGMENTS[(i / 5) % SEGMENTS.len()] {
        "No E-Mail" => 0.0,
        "Mens E-Mail" => 1.0,
        _ => 2.0,
    }
}

pub const CRITEO_HEADER: &str = "f0,f1,f2,f3,treatment,conversion,visit,exposure";

/// Criteo-shaped CSV with `rows` rows; `f0` is the row number
pub fn criteo_csv(rows: usize) -> String {
    let mut csv = String::from(CRITEO_HEADER);
    csv.push('\n');
    for i in 0..rows {
        csv.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{},{},{},{}\n",
            i,
            10.0 + (i % 7) as f64 * 0.25,
            8.2 + (i % 3) as f64,
            4.5,
            (i % 6 != 0) as u8,
            (i % 25 == 0) as u8,
            (i % 5 == 0) as u8,
            (i % 10 == 0) as u8,
        ));
    }
    csv
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn write_gzip(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}
