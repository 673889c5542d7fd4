//! Zip packaging of a generated project directory

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::Result;

/// Compress every file under `dir` into `writer`
///
/// Entry names are relative to `dir` and use `/`. Entries are sorted and
/// carry a fixed timestamp (1980-01-01), so the same directory contents
/// always produce the same archive bytes.
pub fn zip_directory<W: Write + Seek>(dir: &Path, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    add_entries(&mut zip, dir, "")?;
    Ok(zip.finish()?)
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

fn dir_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .last_modified_time(DateTime::default())
        .unix_permissions(0o755)
}

fn add_entries<W: Write + Seek>(zip: &mut ZipWriter<W>, base: &Path, prefix: &str) -> Result<()> {
    let mut entries = fs::read_dir(base.join(prefix))?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        if entry.file_type()?.is_dir() {
            zip.add_directory(relative.as_str(), dir_options())?;
            add_entries(zip, base, &relative)?;
        } else {
            zip.start_file(relative.as_str(), file_options())?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, zip)?;
        }
    }
    Ok(())
}
