use crate::error::ExportError;
use crate::record::ProcessedRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// True if `records` is non-empty and every record has the field set of the
/// first one.
pub fn validate_data(records: &[ProcessedRecord]) -> bool {
    !records.is_empty() && first_schema_mismatch(records).is_none()
}

/// Export `records` to CSV at `destination`.
///
/// The header is the first record's field names in insertion order; each row
/// lists its values in header order. An existing file is replaced. Rows are
/// staged in a temporary file next to the destination and moved into place
/// only once fully written, so a failed export leaves nothing behind. A new
/// file gets the usual permissions for the process; a replaced file keeps its
/// own.
pub fn export_to_csv(
    records: &[ProcessedRecord],
    destination: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let destination = destination.as_ref();
    let Some(first) = records.first() else {
        return Err(ExportError::Empty);
    };
    if let Some(index) = first_schema_mismatch(records) {
        return Err(ExportError::InconsistentSchema { index });
    }

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = staging_file(dir, destination).map_err(|source| ExportError::Destination {
        path: destination.to_path_buf(),
        source,
    })?;

    let header: Vec<&str> = first.field_names().collect();
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(staging);
    wtr.write_record(&header)?;
    for record in records {
        wtr.write_record(header.iter().map(|name| {
            record
                .get(name)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }

    let staging = wtr.into_inner().map_err(|e| ExportError::Destination {
        path: destination.to_path_buf(),
        source: e.into_error(),
    })?;
    staging.persist(destination).map_err(|e| ExportError::Destination {
        path: destination.to_path_buf(),
        source: e.error,
    })?;

    tracing::info!(
        "exported {} record(s) to {}",
        records.len(),
        destination.display()
    );
    Ok(())
}

/// Appends `.csv` when the chosen path has no extension.
pub fn with_csv_extension(path: impl Into<PathBuf>) -> PathBuf {
    let mut path = path.into();
    if path.extension().is_none() {
        path.set_extension("csv");
    }
    path
}

/// Temporary file in `dir` carrying the permissions the destination should
/// end up with. `tempfile` defaults to owner-only.
fn staging_file(dir: &Path, destination: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".export-").suffix(".csv.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Subject to the umask, like a plain `File::create`.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let staging = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(destination) {
        staging.as_file().set_permissions(existing.permissions())?;
    }
    Ok(staging)
}

fn first_schema_mismatch(records: &[ProcessedRecord]) -> Option<usize> {
    let first = records.first()?;
    records
        .iter()
        .position(|record| !record.has_same_fields(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn row(name: &str, objects: &str, score: f64) -> ProcessedRecord {
        let mut rec = ProcessedRecord::with_filename(name);
        rec.insert("objects", objects);
        rec.insert("score", score);
        rec
    }

    #[test]
    fn validate_data_rejects_empty_and_mixed_schemas() {
        assert!(!validate_data(&[]));
        assert!(validate_data(&[row("a.png", "x", 0.1)]));

        let mut odd = ProcessedRecord::with_filename("b.png");
        odd.insert("objects", "y");
        assert!(!validate_data(&[row("a.png", "x", 0.1), odd]));
    }

    #[test]
    fn validate_data_accepts_reordered_fields() {
        let mut reordered = ProcessedRecord::new();
        reordered.insert("score", 0.5);
        reordered.insert("filename", "b.png");
        reordered.insert("objects", "tree");
        assert!(validate_data(&[row("a.png", "x", 0.1), reordered]));
    }

    #[test]
    fn export_writes_header_and_rows_in_header_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let mut reordered = ProcessedRecord::new();
        reordered.insert("score", 0.5);
        reordered.insert("objects", "tree");
        reordered.insert("filename", "b.png");

        export_to_csv(&[row("a.png", "person, car", 0.95), reordered], &path)?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(
            content,
            "filename,objects,score\na.png,\"person, car\",0.95\nb.png,tree,0.5\n"
        );
        Ok(())
    }

    #[test]
    fn export_round_trips_through_a_csv_reader() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let rows = vec![
            row("a.png", "say \"hi\"", 0.25),
            row("b.jpg", "line, with, commas", 1.0),
            row("c.jpeg", "", 0.0),
        ];
        export_to_csv(&rows, &path)?;

        assert_eq!(fs::read_to_string(&path)?.lines().count(), rows.len() + 1);

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["filename", "objects", "score"]
        );
        for (parsed, source) in rdr.records().zip(&rows) {
            let parsed = parsed?;
            let expected: Vec<String> = source.iter().map(|(_, v)| v.to_string()).collect();
            assert_eq!(parsed.iter().collect::<Vec<_>>(), expected);
        }
        Ok(())
    }

    #[test]
    fn export_overwrites_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n5,6\n")?;

        export_to_csv(&[row("a.png", "x", 0.1)], &path)?;
        assert_eq!(fs::read_to_string(&path)?.lines().count(), 2);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn export_does_not_tighten_file_permissions() -> Result<()> {
        use std::fs::File;
        use std::os::unix::fs::PermissionsExt;

        fn mode(path: &Path) -> Result<u32> {
            Ok(fs::metadata(path)?.permissions().mode() & 0o777)
        }

        let dir = tempdir()?;
        let reference = dir.path().join("reference.csv");
        File::create(&reference)?;

        let fresh = dir.path().join("fresh.csv");
        export_to_csv(&[row("a.png", "x", 0.1)], &fresh)?;
        assert_eq!(mode(&fresh)?, mode(&reference)?);

        let existing = dir.path().join("existing.csv");
        fs::write(&existing, "old\n")?;
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o640))?;
        export_to_csv(&[row("a.png", "x", 0.1)], &existing)?;
        assert_eq!(mode(&existing)?, 0o640);
        assert_eq!(fs::read_to_string(&existing)?.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn empty_export_fails_without_creating_a_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let err = export_to_csv(&[], &path).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn inconsistent_schema_reports_index_and_keeps_old_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "previous\n")?;

        let odd = ProcessedRecord::with_filename("z.png");
        let err = export_to_csv(&[row("a.png", "x", 0.1), row("b.png", "y", 0.2), odd], &path)
            .unwrap_err();
        assert!(matches!(err, ExportError::InconsistentSchema { index: 2 }));
        assert_eq!(fs::read_to_string(&path)?, "previous\n");
        Ok(())
    }

    #[test]
    fn unwritable_destination_is_an_export_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("out.csv");
        let err = export_to_csv(&[row("a.png", "x", 0.1)], &path).unwrap_err();
        assert!(matches!(err, ExportError::Destination { .. }));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn csv_extension_is_added_only_when_missing() {
        assert_eq!(with_csv_extension("out"), PathBuf::from("out.csv"));
        assert_eq!(with_csv_extension("out.csv"), PathBuf::from("out.csv"));
        assert_eq!(with_csv_extension("out.txt"), PathBuf::from("out.txt"));
    }
}
