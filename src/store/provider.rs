//! SQLite-backed local store.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::entities::{
  HeroEntity, HeroFilter, LocationEntity, Related, SortOrder, StoreCounts, TransformationEntity,
};
use super::schema::SCHEMA;
use crate::api::dto::{HeroDto, LocationDto, TransformationDto};

const HERO_COLUMNS: &str = "h.identifier, h.name, h.info, h.photo, h.favorite";

/// Relationship-aware store for heroes, transformations and locations.
///
/// The connection sits behind a mutex, so every mutating batch goes through a
/// single writer and is committed as one transaction.
pub struct StoreDataProvider {
  conn: Mutex<Connection>,
}

impl StoreDataProvider {
  /// Open (or create) the store at `path`.
  pub fn open(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create store directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open store at {}: {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), "Opened local store");
    Self::with_connection(conn)
  }

  /// Store that lives only as long as this value.
  pub fn in_memory() -> Result<Self> {
    let conn =
      Connection::open_in_memory().map_err(|e| eyre!("Failed to open in-memory store: {}", e))?;
    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    conn
      .execute_batch("PRAGMA foreign_keys = ON;")
      .map_err(|e| eyre!("Failed to enable foreign keys: {}", e))?;
    conn
      .execute_batch(SCHEMA)
      .map_err(|e| eyre!("Failed to run store migrations: {}", e))?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
    self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))
  }

  // ==========================================================================
  // Inserts
  // ==========================================================================

  /// Upsert heroes. Returns the number of rows written.
  pub fn insert_heros(&self, heros: &[HeroDto]) -> Result<usize> {
    self.write_batch("hero", |tx| {
      let mut written = 0;
      for dto in heros {
        let Some(entity) = HeroEntity::from_dto(dto) else {
          tracing::warn!("Skipping hero without identifier");
          continue;
        };
        tx.execute(
          "INSERT INTO heros (identifier, name, info, photo, favorite)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(identifier) DO UPDATE SET
             name = excluded.name,
             info = excluded.info,
             photo = excluded.photo,
             favorite = excluded.favorite",
          params![
            entity.identifier,
            entity.name,
            entity.info,
            entity.photo,
            entity.favorite
          ],
        )
        .map_err(|e| eyre!("Failed to store hero: {}", e))?;
        written += 1;
      }
      Ok(written)
    })
  }

  /// Upsert transformations, resolving each owner hero by identifier.
  pub fn insert_transformations(&self, transformations: &[TransformationDto]) -> Result<usize> {
    self.write_batch("transformation", |tx| {
      let mut written = 0;
      for dto in transformations {
        let hero_id = resolve_owner(tx, dto.owner_id())?;
        let Some(entity) = TransformationEntity::from_dto(dto, hero_id) else {
          tracing::warn!("Skipping transformation without identifier");
          continue;
        };
        tx.execute(
          "INSERT INTO transformations (identifier, name, info, photo, hero_id)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(identifier) DO UPDATE SET
             name = excluded.name,
             info = excluded.info,
             photo = excluded.photo,
             hero_id = excluded.hero_id",
          params![
            entity.identifier,
            entity.name,
            entity.info,
            entity.photo,
            entity.hero_id
          ],
        )
        .map_err(|e| eyre!("Failed to store transformation: {}", e))?;
        written += 1;
      }
      Ok(written)
    })
  }

  /// Upsert locations, resolving each owner hero by identifier.
  pub fn insert_locations(&self, locations: &[LocationDto]) -> Result<usize> {
    self.write_batch("location", |tx| {
      let mut written = 0;
      for dto in locations {
        let hero_id = resolve_owner(tx, dto.owner_id())?;
        let Some(entity) = LocationEntity::from_dto(dto, hero_id) else {
          tracing::warn!("Skipping location without identifier");
          continue;
        };
        tx.execute(
          "INSERT INTO locations (identifier, latitude, longitude, date, hero_id)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT(identifier) DO UPDATE SET
             latitude = excluded.latitude,
             longitude = excluded.longitude,
             date = excluded.date,
             hero_id = excluded.hero_id",
          params![
            entity.identifier,
            entity.latitude,
            entity.longitude,
            entity.date,
            entity.hero_id
          ],
        )
        .map_err(|e| eyre!("Failed to store location: {}", e))?;
        written += 1;
      }
      Ok(written)
    })
  }

  /// Run `write` in one transaction and commit it. A batch that writes
  /// nothing is rolled back instead of committed.
  fn write_batch<F>(&self, kind: &str, write: F) -> Result<usize>
  where
    F: FnOnce(&Transaction<'_>) -> Result<usize>,
  {
    let mut conn = self.lock()?;
    let tx = conn
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    let written = write(&tx)?;
    if written == 0 {
      tracing::warn!(kind, "There are no changes to apply in the store");
      return Ok(0);
    }

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;
    tracing::debug!(kind, written, "Store batch committed");
    Ok(written)
  }

  // ==========================================================================
  // Queries
  // ==========================================================================

  /// All heroes sorted by name.
  pub fn fetch_heros(&self, order: SortOrder) -> Result<Vec<HeroEntity>> {
    let conn = self.lock()?;
    let sql = format!(
      "SELECT {} FROM heros h ORDER BY h.name {}, h.identifier",
      HERO_COLUMNS,
      order.sql()
    );
    let mut stmt = conn
      .prepare(&sql)
      .map_err(|e| eyre!("Failed to prepare hero query: {}", e))?;

    let heros = stmt
      .query_map([], |row| hero_at(row, 0))
      .map_err(|e| eyre!("Failed to query heroes: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read hero row: {}", e))?;

    Ok(heros)
  }

  /// First hero matching `filter`.
  pub fn fetch_hero(&self, filter: HeroFilter<'_>) -> Result<Option<HeroEntity>> {
    let conn = self.lock()?;
    let (column, value) = match filter {
      HeroFilter::Identifier(id) => ("identifier", id),
      HeroFilter::Name(name) => ("name", name),
    };
    let sql = format!(
      "SELECT {} FROM heros h WHERE h.{} = ?1 ORDER BY h.identifier LIMIT 1",
      HERO_COLUMNS, column
    );

    conn
      .query_row(&sql, params![value], |row| hero_at(row, 0))
      .optional()
      .map_err(|e| eyre!("Failed to query hero: {}", e))
  }

  /// Transformations owned by `hero_id`, sorted by name. Orphans never match.
  pub fn fetch_transformations(&self, hero_id: &str) -> Result<Vec<Related<TransformationEntity>>> {
    let conn = self.lock()?;
    let sql = format!(
      "SELECT t.identifier, t.name, t.info, t.photo, t.hero_id, {}
       FROM transformations t
       INNER JOIN heros h ON h.identifier = t.hero_id
       WHERE t.hero_id = ?1
       ORDER BY t.name ASC, t.identifier",
      HERO_COLUMNS
    );
    let mut stmt = conn
      .prepare(&sql)
      .map_err(|e| eyre!("Failed to prepare transformation query: {}", e))?;

    let rows = stmt
      .query_map(params![hero_id], |row| {
        Ok(Related {
          entity: transformation_at(row)?,
          hero: Some(hero_at(row, 5)?),
        })
      })
      .map_err(|e| eyre!("Failed to query transformations: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read transformation row: {}", e))?;

    Ok(rows)
  }

  /// A single transformation with its owner, if the owner still resolves.
  pub fn fetch_transformation(
    &self,
    identifier: &str,
  ) -> Result<Option<Related<TransformationEntity>>> {
    let conn = self.lock()?;
    let sql = format!(
      "SELECT t.identifier, t.name, t.info, t.photo, t.hero_id, {}
       FROM transformations t
       LEFT JOIN heros h ON h.identifier = t.hero_id
       WHERE t.identifier = ?1",
      HERO_COLUMNS
    );

    conn
      .query_row(&sql, params![identifier], |row| {
        Ok(Related {
          entity: transformation_at(row)?,
          hero: optional_hero_at(row, 5)?,
        })
      })
      .optional()
      .map_err(|e| eyre!("Failed to query transformation: {}", e))
  }

  /// Locations owned by `hero_id`. Unknown heroes have no locations.
  pub fn fetch_locations(&self, hero_id: &str) -> Result<Vec<Related<LocationEntity>>> {
    let conn = self.lock()?;
    let sql = format!(
      "SELECT l.identifier, l.latitude, l.longitude, l.date, l.hero_id, {}
       FROM locations l
       INNER JOIN heros h ON h.identifier = l.hero_id
       WHERE l.hero_id = ?1
       ORDER BY l.date ASC, l.identifier",
      HERO_COLUMNS
    );
    let mut stmt = conn
      .prepare(&sql)
      .map_err(|e| eyre!("Failed to prepare location query: {}", e))?;

    let rows = stmt
      .query_map(params![hero_id], |row| {
        Ok(Related {
          entity: location_at(row)?,
          hero: Some(hero_at(row, 5)?),
        })
      })
      .map_err(|e| eyre!("Failed to query locations: {}", e))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| eyre!("Failed to read location row: {}", e))?;

    Ok(rows)
  }

  pub fn counts(&self) -> Result<StoreCounts> {
    let conn = self.lock()?;
    let count = |table: &str| -> Result<usize> {
      conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
          row.get::<_, i64>(0)
        })
        .map(|n| n as usize)
        .map_err(|e| eyre!("Failed to count {}: {}", table, e))
    };

    Ok(StoreCounts {
      heros: count("heros")?,
      transformations: count("transformations")?,
      locations: count("locations")?,
    })
  }

  /// Delete every row of every kind.
  pub fn clear(&self) -> Result<()> {
    let mut conn = self.lock()?;
    let tx = conn
      .transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    tx.execute_batch(
      "DELETE FROM locations;
       DELETE FROM transformations;
       DELETE FROM heros;",
    )
    .map_err(|e| eyre!("Failed to clear store: {}", e))?;

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;
    tracing::info!("Local store cleared");
    Ok(())
  }
}

/// Look up the owner hero; a miss yields `None` and the row is stored orphaned.
fn resolve_owner(tx: &Transaction<'_>, hero_id: Option<&str>) -> Result<Option<String>> {
  let Some(hero_id) = hero_id else {
    return Ok(None);
  };

  let resolved: Option<String> = tx
    .query_row(
      "SELECT identifier FROM heros WHERE identifier = ?1",
      params![hero_id],
      |row| row.get(0),
    )
    .optional()
    .map_err(|e| eyre!("Failed to resolve owner hero: {}", e))?;

  if resolved.is_none() {
    tracing::debug!(hero_id, "Owner hero not in store, storing without owner");
  }
  Ok(resolved)
}

fn hero_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<HeroEntity> {
  Ok(HeroEntity {
    identifier: row.get(offset)?,
    name: row.get(offset + 1)?,
    info: row.get(offset + 2)?,
    photo: row.get(offset + 3)?,
    favorite: row.get(offset + 4)?,
  })
}

fn optional_hero_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Option<HeroEntity>> {
  let identifier: Option<String> = row.get(offset)?;
  match identifier {
    Some(_) => hero_at(row, offset).map(Some),
    None => Ok(None),
  }
}

fn transformation_at(row: &Row<'_>) -> rusqlite::Result<TransformationEntity> {
  Ok(TransformationEntity {
    identifier: row.get(0)?,
    name: row.get(1)?,
    info: row.get(2)?,
    photo: row.get(3)?,
    hero_id: row.get(4)?,
  })
}

fn location_at(row: &Row<'_>) -> rusqlite::Result<LocationEntity> {
  Ok(LocationEntity {
    identifier: row.get(0)?,
    latitude: row.get(1)?,
    longitude: row.get(2)?,
    date: row.get(3)?,
    hero_id: row.get(4)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures;

  fn store() -> StoreDataProvider {
    StoreDataProvider::in_memory().unwrap()
  }

  #[test]
  fn test_insert_heros_sorted_ascending() {
    let store = store();
    assert!(store.fetch_heros(SortOrder::Ascending).unwrap().is_empty());

    let written = store.insert_heros(&fixtures::hero_dtos()).unwrap();
    assert_eq!(written, 5);

    let heros = store.fetch_heros(SortOrder::Ascending).unwrap();
    assert_eq!(heros.len(), 5);
    let first = &heros[0];
    assert_eq!(first.name.as_deref(), Some("Bulma"));
    assert_eq!(
      first.info.as_deref(),
      Some("Sobran las presentaciones cuando se habla de Bulma.")
    );
    assert_eq!(first.favorite, Some(false));
  }

  #[test]
  fn test_sorted_descending_starts_with_last_name() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();

    let heros = store.fetch_heros(SortOrder::Descending).unwrap();
    let names: Vec<_> = heros.iter().filter_map(|h| h.name.as_deref()).collect();
    assert_eq!(names, vec!["Vegeta", "Piccolo", "Krilin", "Goku", "Bulma"]);
  }

  #[test]
  fn test_fetch_hero_by_identifier_and_name() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();

    let by_id = store
      .fetch_hero(HeroFilter::Identifier(fixtures::PICCOLO_ID))
      .unwrap()
      .unwrap();
    assert_eq!(by_id.name.as_deref(), Some("Piccolo"));

    let by_name = store.fetch_hero(HeroFilter::Name("Goku")).unwrap().unwrap();
    assert_eq!(by_name.identifier, fixtures::GOKU_ID);

    assert!(store.fetch_hero(HeroFilter::Name("goku")).unwrap().is_none());
  }

  #[test]
  fn test_hero_without_identifier_is_skipped() {
    let store = store();
    let written = store
      .insert_heros(&[HeroDto {
        name: Some("Nameless".to_string()),
        ..HeroDto::default()
      }])
      .unwrap();
    assert_eq!(written, 0);
    assert!(store.counts().unwrap().is_empty());
  }

  #[test]
  fn test_transformations_resolve_owner() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();
    store
      .insert_transformations(&fixtures::goku_transformation_dtos())
      .unwrap();

    let rows = store.fetch_transformations(fixtures::GOKU_ID).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entity.name.as_deref(), Some("1. Oozaru – Gran Mono"));
    assert_eq!(
      rows[0].hero.as_ref().map(|h| h.identifier.as_str()),
      Some(fixtures::GOKU_ID)
    );
    assert!(store
      .fetch_transformations(fixtures::VEGETA_ID)
      .unwrap()
      .is_empty());
  }

  #[test]
  fn test_orphan_transformation_excluded_from_owner_queries() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();

    let orphan = TransformationDto {
      identifier: Some("orphan-1".to_string()),
      name: Some("Ultra Instinto".to_string()),
      hero: Some(HeroDto::reference("no-such-hero")),
      ..TransformationDto::default()
    };
    assert_eq!(store.insert_transformations(&[orphan]).unwrap(), 1);

    assert!(store
      .fetch_transformations("no-such-hero")
      .unwrap()
      .is_empty());

    let stored = store.fetch_transformation("orphan-1").unwrap().unwrap();
    assert_eq!(stored.entity.hero_id, None);
    assert_eq!(stored.hero, None);
    assert_eq!(store.counts().unwrap().transformations, 1);
  }

  #[test]
  fn test_locations_scoped_by_owner() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();
    store.insert_locations(&fixtures::piccolo_location_dtos()).unwrap();

    let rows = store.fetch_locations(fixtures::PICCOLO_ID).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entity.latitude.as_deref(), Some("36.1251954"));
    assert!(store.fetch_locations(fixtures::GOKU_ID).unwrap().is_empty());
    assert!(store.fetch_locations("unknown").unwrap().is_empty());
  }

  #[test]
  fn test_reinsert_is_upsert_and_keeps_children() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();
    store
      .insert_transformations(&fixtures::goku_transformation_dtos())
      .unwrap();

    let mut heros = fixtures::hero_dtos();
    heros[0].favorite = Some(true);
    store.insert_heros(&heros).unwrap();

    let counts = store.counts().unwrap();
    assert_eq!(counts.heros, 5);
    assert_eq!(counts.transformations, 2);

    let goku = store
      .fetch_hero(HeroFilter::Identifier(fixtures::GOKU_ID))
      .unwrap()
      .unwrap();
    assert_eq!(goku.favorite, Some(true));
  }

  #[test]
  fn test_empty_batch_is_noop() {
    let store = store();
    assert_eq!(store.insert_heros(&[]).unwrap(), 0);
    assert_eq!(store.insert_locations(&[]).unwrap(), 0);
    assert!(store.counts().unwrap().is_empty());
  }

  #[test]
  fn test_clear_removes_everything() {
    let store = store();
    store.insert_heros(&fixtures::hero_dtos()).unwrap();
    store
      .insert_transformations(&fixtures::goku_transformation_dtos())
      .unwrap();
    store.insert_locations(&fixtures::piccolo_location_dtos()).unwrap();
    assert!(!store.counts().unwrap().is_empty());

    store.clear().unwrap();
    assert!(store.counts().unwrap().is_empty());
  }

  #[test]
  fn test_file_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("heroes.db");

    StoreDataProvider::open(&path)
      .unwrap()
      .insert_heros(&fixtures::hero_dtos())
      .unwrap();

    let reopened = StoreDataProvider::open(&path).unwrap();
    assert_eq!(reopened.counts().unwrap().heros, 5);
  }
}
