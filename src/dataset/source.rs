//! Fetching and parsing of delimited dataset files.
//!
//! A source location is either a local path or an HTTP(S) URL. Gzip payloads
//! are detected by their magic bytes and decompressed before parsing, so a
//! `.csv.gz` download works whatever its name.

use std::fmt;
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;

use flate2::read::MultiGzDecoder;
use polars::prelude::*;
use url::Url;

use crate::error::{Result, UpliftError};
use crate::setting::SETTINGS;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Rows scanned to infer column types
const INFER_SCHEMA_LENGTH: usize = 10_000;

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(Url),
}

impl SourceLocation {
    /// Classify a location string.
    ///
    /// `http`/`https` URLs are remote, `file://` URLs and everything else are
    /// treated as local paths.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceLocation::Remote(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SourceLocation::Local)
                .unwrap_or_else(|_| SourceLocation::Local(PathBuf::from(location))),
            _ => SourceLocation::Local(PathBuf::from(location)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, SourceLocation::Remote(_))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
            SourceLocation::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Read the raw bytes behind a location
pub fn fetch_bytes(location: &SourceLocation, timeout: Duration) -> Result<Vec<u8>> {
    match location {
        SourceLocation::Local(path) => {
            fs::read(path).map_err(|e| UpliftError::source_unavailable(location.to_string(), e))
        }
        SourceLocation::Remote(url) => {
            let client = reqwest::blocking::Client::builder()
                .user_agent(concat!("uplift-datasets/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .map_err(|e| UpliftError::source_unavailable(url.as_str(), e))?;

            let response = client
                .get(url.clone())
                .send()
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| UpliftError::source_unavailable(url.as_str(), e))?;

            let body = response
                .bytes()
                .map_err(|e| UpliftError::source_unavailable(url.as_str(), e))?;
            Ok(body.to_vec())
        }
    }
}

/// Gunzip `bytes` if they carry the gzip magic, otherwise return them unchanged
pub fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut decoder = MultiGzDecoder::new(bytes.as_slice());
    let mut out = Vec::with_capacity(bytes.len() * 4);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| UpliftError::Parse(format!("invalid gzip stream: {}", e)))?;
    Ok(out)
}

/// Parse comma-delimited text with a header row into a raw table
pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(UpliftError::Parse("empty input".to_string()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    if df.width() == 0 {
        return Err(UpliftError::Parse("no columns found".to_string()));
    }
    Ok(df)
}

/// Fetch, decompress and parse a location with an explicit HTTP timeout
pub fn read_table_with_timeout(location: &str, timeout: Duration) -> Result<DataFrame> {
    let location = SourceLocation::parse(location);
    tracing::info!(source = %location, remote = location.is_remote(), "fetching dataset");

    let bytes = fetch_bytes(&location, timeout)?;
    let fetched = bytes.len();
    let bytes = decompress(bytes)?;
    tracing::debug!(source = %location, fetched, decompressed = bytes.len(), "dataset fetched");

    let df = parse_csv(bytes)?;
    tracing::info!(source = %location, rows = df.height(), columns = df.width(), "dataset parsed");
    Ok(df)
}

/// Fetch, decompress and parse a location using the configured HTTP timeout
pub fn read_table(location: &str) -> Result<DataFrame> {
    read_table_with_timeout(location, Duration::from_secs(SETTINGS.http_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    const SAMPLE: &str = "a,b,label\n1,2.5,x\n3,4.5,y\n";

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    /// Answer a single HTTP request on a local port and return its URL
    fn serve_once(status: &'static str, body: Vec<u8>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/hillstrom.csv", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
            stream.flush().unwrap();
        });
        (url, handle)
    }

    #[test]
    fn test_parse_location() {
        assert!(SourceLocation::parse("https://example.com/data.csv").is_remote());
        assert!(SourceLocation::parse("http://example.com/data.csv").is_remote());
        assert_eq!(
            SourceLocation::parse("data/hillstrom.csv"),
            SourceLocation::Local(PathBuf::from("data/hillstrom.csv"))
        );
        assert_eq!(
            SourceLocation::parse("file:///tmp/hillstrom.csv"),
            SourceLocation::Local(PathBuf::from("/tmp/hillstrom.csv"))
        );
    }

    #[test]
    fn test_parse_csv() {
        let df = parse_csv(SAMPLE.as_bytes().to_vec()).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("b").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("label").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_parse_csv_rejects_empty_input() {
        assert!(matches!(parse_csv(Vec::new()), Err(UpliftError::Parse(_))));
        assert!(matches!(parse_csv(b"  \n".to_vec()), Err(UpliftError::Parse(_))));
    }

    #[test]
    fn test_decompress_passthrough_and_gzip() {
        let plain = SAMPLE.as_bytes().to_vec();
        assert_eq!(decompress(plain.clone()).unwrap(), plain);

        assert_eq!(decompress(gzip(SAMPLE)).unwrap(), plain);
    }

    #[test]
    fn test_decompress_truncated_gzip() {
        let bytes = vec![0x1f, 0x8b, 0x08, 0x00];
        assert!(matches!(decompress(bytes), Err(UpliftError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let err = read_table(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, UpliftError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_unreachable_url_is_unavailable() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/hillstrom.csv", port);

        let err = read_table_with_timeout(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, UpliftError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_http_error_status_is_unavailable() {
        let (url, handle) = serve_once("404 Not Found", b"not found".to_vec());
        let err = read_table_with_timeout(&url, Duration::from_secs(5)).unwrap_err();
        handle.join().unwrap();

        match err {
            UpliftError::SourceUnavailable { location, .. } => assert_eq!(location, url),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_remote_gzip_is_parsed() {
        let (url, handle) = serve_once("200 OK", gzip(SAMPLE));
        let df = read_table_with_timeout(&url, Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("label").unwrap().dtype(), &DataType::String);
    }
}
