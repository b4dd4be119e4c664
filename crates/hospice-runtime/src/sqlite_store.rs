//! SQLite-backed implementation of the PheromoneStore trait.
//!
//! Durable across restarts. Trails and admission scalars live in separate
//! tables; every write is an upsert.

#![cfg(feature = "sqlite")]

use hospice_core::error::{StoreError, StoreResult};
use hospice_core::store::PheromoneStore;
use hospice_core::types::*;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite-backed pheromone store.
///
/// Supports both in-memory and file-backed databases. The connection sits
/// behind a mutex, which also serialises scalar read-modify-write cycles.
pub struct SqlitePheromoneStore {
    conn: Arc<Mutex<Connection>>,
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl SqlitePheromoneStore {
    /// Create a new in-memory SQLite store.
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::init_with_connection(conn)
    }

    /// Create or open a file-backed SQLite store.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(backend)?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> StoreResult<Self> {
        // WAL keeps readers unblocked while a run streams trail updates
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(backend)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS trails (
                from_bed_id TEXT NOT NULL,
                to_bed_id TEXT NOT NULL,
                value REAL NOT NULL,
                PRIMARY KEY (from_bed_id, to_bed_id)
            );

            CREATE TABLE IF NOT EXISTS bed_pheromones (
                hospital_id TEXT NOT NULL,
                bed_id TEXT NOT NULL,
                id TEXT NOT NULL,
                pheromone_level REAL NOT NULL DEFAULT 1.0,
                last_updated INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (hospital_id, bed_id)
            );
            "#,
        )
        .map_err(backend)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| StoreError::Lock(e.to_string()))
    }

    fn upsert_trail(conn: &Connection, from: &BedId, to: &BedId, value: f64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO trails (from_bed_id, to_bed_id, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(from_bed_id, to_bed_id) DO UPDATE SET value = excluded.value",
            params![from.as_str(), to.as_str(), value],
        )
    }
}

impl PheromoneStore for SqlitePheromoneStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load_trails(&self, bed_ids: &[BedId]) -> StoreResult<Vec<TrailRecord>> {
        let wanted: HashSet<&str> = bed_ids.iter().map(|b| b.as_str()).collect();
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT from_bed_id, to_bed_id, value FROM trails")
            .map_err(backend)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(TrailRecord::new(
                    BedId(row.get(0)?),
                    BedId(row.get(1)?),
                    row.get(2)?,
                ))
            })
            .map_err(backend)?;

        let mut out = Vec::new();
        for row in rows {
            let record = row.map_err(backend)?;
            if wanted.contains(record.from.as_str()) && wanted.contains(record.to.as_str()) {
                out.push(record);
            }
        }
        Ok(out)
    }

    fn save_trail(&self, from: &BedId, to: &BedId, value: f64) -> StoreResult<()> {
        let conn = self.lock()?;
        Self::upsert_trail(&conn, from, to, value).map_err(backend)?;
        Ok(())
    }

    fn save_trails(&self, records: &[TrailRecord]) -> StoreResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(backend)?;
        for r in records {
            Self::upsert_trail(&tx, &r.from, &r.to, r.value).map_err(backend)?;
        }
        tx.commit().map_err(backend)
    }

    fn scalar(&self, key: &ScalarKey) -> StoreResult<Option<f64>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT pheromone_level FROM bed_pheromones WHERE hospital_id = ?1 AND bed_id = ?2",
            params![key.hospital_id.as_str(), key.bed_id.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(backend)
    }

    fn scalars_for(&self, hospital: &HospitalId) -> StoreResult<HashMap<BedId, f64>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT bed_id, pheromone_level FROM bed_pheromones WHERE hospital_id = ?1")
            .map_err(backend)?;
        let rows = stmt
            .query_map(params![hospital.as_str()], |row| {
                Ok((BedId(row.get(0)?), row.get::<_, f64>(1)?))
            })
            .map_err(backend)?;

        let mut out = HashMap::new();
        for row in rows {
            let (bed, level) = row.map_err(backend)?;
            out.insert(bed, level);
        }
        Ok(out)
    }

    fn update_scalar(
        &self,
        key: &ScalarKey,
        update: &mut dyn FnMut(Option<f64>) -> f64,
    ) -> StoreResult<f64> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(backend)?;

        let current: Option<f64> = tx
            .query_row(
                "SELECT pheromone_level FROM bed_pheromones WHERE hospital_id = ?1 AND bed_id = ?2",
                params![key.hospital_id.as_str(), key.bed_id.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(backend)?;

        let next = update(current);
        tx.execute(
            "INSERT INTO bed_pheromones (hospital_id, bed_id, id, pheromone_level, last_updated)
             VALUES (?1, ?2, ?3, ?4, CAST(strftime('%s', 'now') AS INTEGER))
             ON CONFLICT(hospital_id, bed_id) DO UPDATE SET
                pheromone_level = excluded.pheromone_level,
                last_updated = excluded.last_updated",
            params![
                key.hospital_id.as_str(),
                key.bed_id.as_str(),
                key.storage_id(),
                next,
            ],
        )
        .map_err(backend)?;
        tx.commit().map_err(backend)?;

        Ok(next)
    }

    fn trail_count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM trails", [], |row| row.get(0))
            .map_err(backend)
    }

    fn scalar_count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM bed_pheromones", [], |row| row.get(0))
            .map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_upsert_overwrites() {
        let store = SqlitePheromoneStore::new_in_memory().unwrap();
        let (a, b) = (BedId::from("a"), BedId::from("b"));
        store.save_trail(&a, &b, 1.0).unwrap();
        store.save_trail(&a, &b, 0.25).unwrap();
        store.save_trail(&b, &a, 4.0).unwrap();

        let mut loaded = store.load_trails(&[a.clone(), b.clone()]).unwrap();
        loaded.sort_by(|x, y| x.from.cmp(&y.from));
        assert_eq!(
            loaded,
            vec![TrailRecord::new(a.clone(), b.clone(), 0.25), TrailRecord::new(b, a, 4.0)]
        );
        assert_eq!(store.trail_count().unwrap(), 2);
    }

    #[test]
    fn batch_save_commits_all() {
        let store = SqlitePheromoneStore::new_in_memory().unwrap();
        let records: Vec<TrailRecord> = (0..10)
            .map(|i| TrailRecord::new(BedId(format!("b{i}")), BedId(format!("b{}", i + 1)), i as f64))
            .collect();
        store.save_trails(&records).unwrap();
        assert_eq!(store.trail_count().unwrap(), 10);
    }

    #[test]
    fn scalar_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pheromones.db");
        let key = ScalarKey::new("h1", "bedA");

        {
            let store = SqlitePheromoneStore::open(&path).unwrap();
            store.update_scalar(&key, &mut |_| 1.5).unwrap();
        }

        let reopened = SqlitePheromoneStore::open(&path).unwrap();
        assert_eq!(reopened.scalar(&key).unwrap(), Some(1.5));
        let for_h1 = reopened.scalars_for(&HospitalId::from("h1")).unwrap();
        assert_eq!(for_h1.get(&BedId::from("bedA")), Some(&1.5));
        assert_eq!(reopened.scalar_count().unwrap(), 1);
    }

    #[test]
    fn scalars_keyed_by_pair_not_joined_id() {
        let store = SqlitePheromoneStore::new_in_memory().unwrap();
        let first = ScalarKey::new("ward-a", "b1");
        let second = ScalarKey::new("ward", "a-b1");
        assert_eq!(first.storage_id(), second.storage_id());

        store.update_scalar(&first, &mut |_| 1.5).unwrap();
        assert_eq!(store.scalar(&second).unwrap(), None);
        store.update_scalar(&second, &mut |cur| cur.unwrap_or(0.5) + 10.0).unwrap();

        assert_eq!(store.scalar(&first).unwrap(), Some(1.5));
        assert_eq!(store.scalar(&second).unwrap(), Some(10.5));
        let ward = store.scalars_for(&HospitalId::from("ward")).unwrap();
        assert_eq!(ward.get(&BedId::from("a-b1")), Some(&10.5));
        assert_eq!(store.scalar_count().unwrap(), 2);
    }
}
