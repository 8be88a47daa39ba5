use async_trait::async_trait;
use chrono::Utc;
use culture_core::model::{CountryName, CountryProgress, ModuleKey, Percent, UserId, UserProgress};
use sqlx::Row;

use super::SqliteProgressStore;
use super::mapping::{completed_module_from_i64, map_progress_row, map_user_row, read_err, write_err};
use crate::repository::{ProgressStore, StorageError};

/// Busy/locked upserts are retried this many times before surfacing `Conflict`.
const RATCHET_ATTEMPTS: u32 = 3;

impl SqliteProgressStore {
    async fn try_ratchet(&self, user: &UserId, candidate: u32) -> Result<u32, StorageError> {
        let row = sqlx::query(
            r"
            INSERT INTO users (user_id, completed_module, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                completed_module = MAX(users.completed_module, excluded.completed_module),
                updated_at = excluded.updated_at
            RETURNING completed_module
            ",
        )
        .bind(user.as_str())
        .bind(i64::from(candidate))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;

        let stored: i64 = row
            .try_get("completed_module")
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        completed_module_from_i64(stored)
    }
}

#[async_trait]
impl ProgressStore for SqliteProgressStore {
    async fn read_user(&self, user: &UserId) -> Result<UserProgress, StorageError> {
        let row = sqlx::query(
            r"
            SELECT completed_module, selected_country
            FROM users
            WHERE user_id = ?1
            ",
        )
        .bind(user.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)?;

        match row {
            Some(row) => map_user_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn ratchet_completed_module(
        &self,
        user: &UserId,
        candidate: u32,
    ) -> Result<u32, StorageError> {
        let mut attempt = 1;
        loop {
            match self.try_ratchet(user, candidate).await {
                Err(StorageError::Conflict) if attempt < RATCHET_ATTEMPTS => {
                    log::debug!("ratchet for {user} hit contention (attempt {attempt}), retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn set_module_progress(
        &self,
        user: &UserId,
        country: &CountryName,
        module: &ModuleKey,
        percent: Percent,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO module_progress (user_id, country, module_key, percent, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, country, module_key) DO UPDATE SET
                percent = excluded.percent,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user.as_str())
        .bind(country.as_str())
        .bind(module.as_str())
        .bind(i64::from(percent))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }

    async fn read_country_progress(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<CountryProgress, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT module_key, percent
            FROM module_progress
            WHERE user_id = ?1 AND country = ?2
            ORDER BY module_key ASC
            ",
        )
        .bind(user.as_str())
        .bind(country.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)?;

        let mut progress = CountryProgress::new();
        for row in rows {
            let (key, percent) = map_progress_row(&row)?;
            progress.insert(key, percent);
        }
        Ok(progress)
    }

    async fn set_selected_country(
        &self,
        user: &UserId,
        country: &CountryName,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO users (user_id, completed_module, selected_country, updated_at)
            VALUES (?1, 0, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                selected_country = excluded.selected_country,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user.as_str())
        .bind(country.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }
}
