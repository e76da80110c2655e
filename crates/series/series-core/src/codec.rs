//! `date,count` table codec for daily series

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use series_spi::{DailyCount, DailySeries, Result, SeriesError};

/// Write a series as CSV to any writer
pub fn write_series_to<W: Write>(writer: W, series: &DailySeries) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["date", "count"]).map_err(io_error)?;
    for point in series.points() {
        csv.write_record([point.date.format("%Y-%m-%d").to_string(), point.count.to_string()])
            .map_err(io_error)?;
    }
    csv.flush().map_err(|e| SeriesError::Io(e.to_string()))
}

/// Read a series for `skill` from any CSV reader
pub fn read_series_from<R: Read>(reader: R, skill: &str) -> Result<DailySeries> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for (idx, row) in csv.deserialize::<DailyCount>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let point = row.map_err(|e| SeriesError::Parse {
            line,
            reason: e.to_string(),
        })?;
        points.push(point);
    }
    DailySeries::from_points(skill, points)
}

/// Write a series to `path`, replacing any existing file
pub fn write_series(path: impl AsRef<Path>, series: &DailySeries) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| SeriesError::Io(e.to_string()))?;
    write_series_to(BufWriter::new(file), series)
}

/// Read the series for `skill` stored at `path`
pub fn read_series(path: impl AsRef<Path>, skill: &str) -> Result<DailySeries> {
    let file = File::open(path.as_ref()).map_err(|e| SeriesError::Io(e.to_string()))?;
    read_series_from(BufReader::new(file), skill)
}

fn io_error(e: csv::Error) -> SeriesError {
    SeriesError::Io(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_write_format() {
        let series = DailySeries::from_counts("python", day(1), &[1, 0, 3]);
        let mut buf = Vec::new();
        write_series_to(&mut buf, &series).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,count\n2024-01-01,1\n2024-01-02,0\n2024-01-03,3\n"
        );
    }

    #[test]
    fn test_read_restores_series() {
        let raw = "date,count\n2024-01-01,4\n2024-01-02,5\n";
        let series = read_series_from(raw.as_bytes(), "sql").unwrap();
        assert_eq!(series.skill(), "sql");
        assert_eq!(series.counts().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn test_read_header_only_is_empty_series() {
        let series = read_series_from("date,count\n".as_bytes(), "sql").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_read_reports_bad_line() {
        let raw = "date,count\n2024-01-01,4\n2024-01-02,many\n";
        let err = read_series_from(raw.as_bytes(), "sql").unwrap_err();
        assert!(matches!(err, SeriesError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_read_rejects_negative_count() {
        let raw = "date,count\n2024-01-01,-1\n";
        assert!(read_series_from(raw.as_bytes(), "sql").is_err());
    }

    #[test]
    fn test_read_rejects_gapped_file() {
        let raw = "date,count\n2024-01-01,4\n2024-01-03,5\n";
        let err = read_series_from(raw.as_bytes(), "sql").unwrap_err();
        assert!(matches!(err, SeriesError::Gap { .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("python_timeseries.csv");
        let series = DailySeries::from_counts("python", day(1), &[2, 0, 1]);

        write_series(&path, &series).unwrap();
        let back = read_series(&path, "python").unwrap();
        assert_eq!(back, series);
    }
}
