pub mod bblx;
pub mod bblx_models;
pub mod bblx_schema;

use std::fs;
use std::path::Path;

use diesel::prelude::*;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{Pool, ConnectionManager, PooledConnection};

use parking_lot::Mutex;
use anyhow::{anyhow, Context, Result, Error as AnyhowError};

use crate::logger::info;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

// Idempotent create-if-absent table definitions.
static SCHEMA_SQL: &'static str = include_str!("../../migrations/bblx/up.sql");

#[derive(Debug)]
pub struct DatabaseHandle {
    pool: SqlitePool,
    pub write_lock: Mutex<()>,
}

impl DatabaseHandle {
    pub fn new(database_url: &str) -> Result<Self> {
        let manager = ConnectionManager::new(database_url);
        let pool = Pool::builder()
            .max_size(5)
            .build(manager)
            .with_context(|| format!("Failed to create pool for: {}", database_url))?;

        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
        })
    }

    /// Open an SQLite database file, creating it and its parent
    /// directories when absent, and apply the module schema.
    pub fn open_or_create(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let database_url = db_path
            .to_str()
            .ok_or_else(|| anyhow!("Invalid database path: {:?}", db_path))?;

        info(&format!("Opening module database: {}", database_url));

        let handle = Self::new(database_url)?;
        handle.do_write(|db_conn| db_conn.batch_execute(SCHEMA_SQL))?;

        Ok(handle)
    }

    pub fn get_conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(AnyhowError::from)
    }

    /// Performs a write operation on the database, guarded by a Mutex write_lock.
    pub fn do_write<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let _lock = self.write_lock.lock();
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for write")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }

    /// Performs a read operation on the database.
    pub fn do_read<F, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error>,
    {
        let mut db_conn = self.pool.get()
            .context("Failed to get connection from pool for read")?;
        operation(&mut db_conn).map_err(AnyhowError::from)
    }
}
