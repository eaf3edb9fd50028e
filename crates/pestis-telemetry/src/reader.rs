//! Reading a CSV telemetry log back into records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pestis_core::{TelemetryRecord, TickId, Totals};

use crate::csv_sink::HEADER;
use crate::error::TelemetryError;

/// Parse a log written by [`CsvSink`](crate::CsvSink).
///
/// The header must match [`HEADER`] exactly. Values are read back as
/// written, so totals are whole numbers.
pub fn read_log<R: Read>(reader: R) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(TelemetryError::HeaderMismatch {
            found: headers.iter().map(str::to_owned).collect(),
        });
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let malformed = |detail: String| TelemetryError::MalformedRow { line, detail };

        let tick_field = row.get(0).unwrap_or_default();
        let tick: u64 = tick_field
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad tick '{tick_field}'")))?;

        let mut values = [0.0f64; 5];
        for (i, slot) in values.iter_mut().enumerate() {
            let field = row.get(i + 1).unwrap_or_default();
            *slot = field
                .trim()
                .parse()
                .map_err(|_| malformed(format!("bad {} value '{field}'", HEADER[i + 1])))?;
        }
        let [healthy, exposed, infected, recovered, dead] = values;
        records.push(TelemetryRecord::new(
            TickId(tick),
            Totals {
                healthy,
                exposed,
                infected,
                recovered,
                dead,
            },
        ));
    }
    Ok(records)
}

/// [`read_log()`] on a file.
pub fn read_log_file(path: impl AsRef<Path>) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let file = File::open(path)?;
    read_log(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows() {
        let text = "Second,Healthy,Exposed,Infected,Recovered,Dead\n\
                    1,900,100,0,0,0\n\
                    2,899,100,1,0,0\n";
        let records = read_log(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].tick, TickId(2));
        assert_eq!(records[1].healthy, 899.0);
        assert_eq!(records[1].infected, 1.0);
    }

    #[test]
    fn header_only_is_empty() {
        let text = "Second,Healthy,Exposed,Infected,Recovered,Dead\n";
        assert!(read_log(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn wrong_header_rejected() {
        let text = "tick,S,E,I,R,D\n1,1,1,1,1,1\n";
        match read_log(text.as_bytes()) {
            Err(TelemetryError::HeaderMismatch { found }) => assert_eq!(found[0], "tick"),
            other => panic!("expected header mismatch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_value_reports_line() {
        let text = "Second,Healthy,Exposed,Infected,Recovered,Dead\n\
                    1,900,100,0,0,0\n\
                    2,lots,100,1,0,0\n";
        match read_log(text.as_bytes()) {
            Err(TelemetryError::MalformedRow { line, detail }) => {
                assert_eq!(line, 3);
                assert!(detail.contains("Healthy"), "{detail}");
            }
            other => panic!("expected malformed row, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_a_csv_error() {
        let text = "Second,Healthy,Exposed,Infected,Recovered,Dead\n1,900\n";
        assert!(matches!(
            read_log(text.as_bytes()),
            Err(TelemetryError::Csv(_))
        ));
    }

    #[test]
    fn missing_file_is_io() {
        let err = read_log_file("/nonexistent/pestis/telemetry.csv").unwrap_err();
        assert!(matches!(err, TelemetryError::Io(_)));
    }
}
