// src/sheet/package.rs
// Whole-archive helpers. Workbooks here are small, so parts are read fully
// into memory and rewritten as a new archive.

use std::{
    fs::{self, File},
    io::{Cursor, Read, Write},
    path::Path,
};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ReportError;

pub type Archive = ZipArchive<Cursor<Vec<u8>>>;

pub fn open(path: &Path) -> Result<Archive, ReportError> {
    let bytes = fs::read(path)?;
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read one part by name (case-insensitive, `\` tolerated). `Ok(None)` if absent.
pub fn read_part(archive: &mut Archive, name: &str) -> Result<Option<Vec<u8>>, ReportError> {
    let wanted = name.replace('\\', "/");
    let found = archive
        .file_names()
        .find(|n| n.eq_ignore_ascii_case(&wanted))
        .map(str::to_owned);
    let Some(found) = found else { return Ok(None) };

    let mut file = archive.by_name(&found)?;
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

pub fn require_part(archive: &mut Archive, name: &str) -> Result<Vec<u8>, ReportError> {
    read_part(archive, name)?.ok_or_else(|| ReportError::MissingPart(s!(name)))
}

/// All parts in archive order.
pub fn read_all(archive: &mut Archive) -> Result<Vec<(String, Vec<u8>)>, ReportError> {
    let mut parts = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() { continue; }
        let name = file.name().to_owned();
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        parts.push((name, buf));
    }
    Ok(parts)
}

/// Create/overwrite `path` with the given parts, deflated.
pub fn write_all<S: AsRef<str>>(path: &Path, parts: &[(S, Vec<u8>)]) -> Result<(), ReportError> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in parts {
        zip.start_file(name.as_ref(), options)?;
        zip.write_all(bytes)?;
    }
    zip.finish()?;
    Ok(())
}
