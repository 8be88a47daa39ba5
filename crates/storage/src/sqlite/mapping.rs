use culture_core::model::{CountryName, ModuleKey, Percent, UserProgress};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// SQLite busy/locked result codes, including their extended variants.
fn is_contention(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| matches!(code.as_ref(), "5" | "6" | "261" | "262" | "517"))
}

pub(crate) fn read_err(err: sqlx::Error) -> StorageError {
    StorageError::ReadFailed(err.to_string())
}

pub(crate) fn write_err(err: sqlx::Error) -> StorageError {
    if is_contention(&err) {
        StorageError::Conflict
    } else {
        StorageError::WriteFailed(err.to_string())
    }
}

pub(crate) fn completed_module_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v)
        .map_err(|_| StorageError::Serialization(format!("completed_module out of range: {v}")))
}

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<UserProgress, StorageError> {
    let completed_module =
        completed_module_from_i64(row.try_get::<i64, _>("completed_module").map_err(ser)?)?;
    let selected_country = row
        .try_get::<Option<String>, _>("selected_country")
        .map_err(ser)?
        .filter(|raw| !raw.trim().is_empty())
        .map(CountryName::new)
        .transpose()
        .map_err(ser)?;

    Ok(UserProgress {
        completed_module,
        selected_country,
    })
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<(ModuleKey, Percent), StorageError> {
    let key = ModuleKey::new(row.try_get::<String, _>("module_key").map_err(ser)?).map_err(ser)?;
    let percent = Percent::new(row.try_get::<i64, _>("percent").map_err(ser)?).map_err(ser)?;
    Ok((key, percent))
}
