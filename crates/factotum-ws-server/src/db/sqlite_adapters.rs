// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::DbError;

pub(crate) fn open_readonly_no_mutex(path: &Path) -> Result<Connection, DbError> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| DbError::Open(format!("{}: {e}", path.display())))
}

pub(crate) fn apply_readonly_pragmas(
    conn: &Connection,
    cache_kib: i64,
    mmap_bytes: i64,
) -> Result<(), DbError> {
    conn.execute_batch(&format!(
        "PRAGMA query_only=ON; PRAGMA journal_mode=OFF; PRAGMA synchronous=OFF; PRAGMA temp_store=MEMORY; PRAGMA cache_size=-{cache_kib}; PRAGMA mmap_size={mmap_bytes};",
    ))
    .map_err(|e| DbError::Open(format!("pragma setup failed: {e}")))
}
