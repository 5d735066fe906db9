//! Reading course archives

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate};
use zip::ZipArchive;

use crate::{Error, Result};

pub(crate) fn open(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| Error::archive(path, e))?;
    ZipArchive::new(file).map_err(|e| Error::archive(path, e))
}

/// Embedded modification time of an archive entry.
///
/// Zip timestamps carry no zone and are read as local time. Entries
/// without a usable timestamp count as infinitely old.
pub(crate) fn entry_modified(stamp: Option<zip::DateTime>) -> SystemTime {
    stamp
        .and_then(to_system_time)
        .unwrap_or(UNIX_EPOCH)
}

fn to_system_time(stamp: zip::DateTime) -> Option<SystemTime> {
    let naive = NaiveDate::from_ymd_opt(
        i32::from(stamp.year()),
        u32::from(stamp.month()),
        u32::from(stamp.day()),
    )?
    .and_hms_opt(
        u32::from(stamp.hour()),
        u32::from(stamp.minute()),
        u32::from(stamp.second()),
    )?;
    let local = naive.and_local_timezone(Local).earliest()?;
    Some(SystemTime::from(local))
}

/// Decompress `entry` into `staged`.
pub(crate) fn stage_entry(entry: &mut impl Read, staged: &Path) -> Result<()> {
    let mut out = File::create(staged).map_err(|e| Error::filesystem(staged, e))?;
    io::copy(entry, &mut out).map_err(|e| Error::filesystem(staged, e))?;
    Ok(())
}
