//! Helper functions could be used in api/, front/, ...

use crate::config;
use anyhow::anyhow;
use argon2::Argon2;
use chrono::NaiveDate;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::{str::FromStr, sync::LazyLock};
use uuid::Uuid;

pub async fn setup_sqlite_db_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
            .pragma("foreign_keys", "ON")
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true),
    )
    .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub fn build_cookie_key(pwd: &str, salt: &str) -> anyhow::Result<[u8; 32]> {
    let mut cookie_key = [0u8; 32];
    Argon2::default()
        .hash_password_into(
            Uuid::from_str(pwd)?.as_bytes(),
            Uuid::from_str(salt)?.as_bytes(),
            &mut cookie_key,
        )
        .map_err(|err| anyhow!("cookie_key couldn't be created: {}", err))?;

    Ok(cookie_key)
}

pub fn build_random_cookie_key() -> anyhow::Result<[u8; 32]> {
    build_cookie_key(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string())
}

/// Whole days between `today` and `due`, negative when `due` is past.
/// Dates carry no time component, so this matches a ceiling division of
/// the raw interval by one day.
pub fn days_remaining(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Client to make http requests
pub static REQUEST_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);
