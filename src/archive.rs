use crate::{
    error::{Error, Result},
    model::TestCase,
};
use std::{
    collections::BTreeSet,
    io::{Cursor, Read, Seek},
};
use zip::ZipArchive;

/// Reads the `<name>.in` / `<name>.out` pairs of a test data archive.
///
/// Cases come back ordered by base name as strings, so `10` sorts before `2`.
pub fn read_test_cases(bytes: &[u8]) -> Result<Vec<TestCase>> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;

    let names = zip
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .filter_map(|name| name.split('.').next())
        .map(str::to_string)
        .collect::<BTreeSet<_>>();

    names
        .iter()
        .map(|name| -> Result<TestCase> {
            Ok(TestCase {
                input: read_entry(&mut zip, &format!("{name}.in"))?,
                expected_output: read_entry(&mut zip, &format!("{name}.out"))?,
            })
        })
        .collect()
}

fn read_entry<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = zip.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => Error::MissingTestFile {
            name: name.to_string(),
        },
        e => Error::Archive(e),
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| Error::ArchiveEntry {
            name: name.to_string(),
            source,
        })?;
    Ok(content)
}
