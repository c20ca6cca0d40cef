//! JSON file store
//!
//! Keeps the whole product set in memory and rewrites the backing file on
//! every mutation.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::table::ProductTable;
use super::InventoryStore;
use crate::error::Result;
use crate::model::{Product, ProductId};

/// File-backed product store
///
/// ## Concurrency Model
///
/// One mutex guards the table (records and id counter). Every operation,
/// reads included, holds it for its whole duration, so a mutation and its
/// file write are never interleaved with another call.
///
/// ## Failure Model
///
/// Mutations are applied to the table, then the full set is written. If the
/// write fails the table change is undone before the error is returned, so
/// memory never runs ahead of disk.
pub struct ProductFileStore {
    /// Backing JSON file
    path: PathBuf,

    /// Live records and next id
    table: Mutex<ProductTable>,
}

impl ProductFileStore {
    /// Open a store over an existing products file
    ///
    /// Fails if the file is missing, is not a JSON array of products, or
    /// holds duplicate ids.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let content = fs::read_to_string(&path)?;
        let records: Vec<Product> = serde_json::from_str(&content)?;
        let table = ProductTable::from_records(records)?;

        tracing::info!(
            "Loaded {} products from {}, next id {}",
            table.len(),
            path.display(),
            table.next_id()
        );

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Open a store, first writing an empty array if the file does not exist
    pub fn open_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            write_products(path, &ProductTable::new())?;
            tracing::info!("Initialized empty products file at {}", path.display());
        }

        Self::open(path)
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the id the next create will receive
    pub fn next_id(&self) -> ProductId {
        self.table.lock().next_id()
    }

    /// Get the number of live products
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    fn save(&self, table: &ProductTable) -> Result<()> {
        write_products(&self.path, table)
    }
}

impl InventoryStore for ProductFileStore {
    fn create(&self, draft: &Product) -> Result<Product> {
        let mut table = self.table.lock();

        let product = table.insert_new(draft)?;
        if let Err(e) = self.save(&table) {
            table.revert_insert(product.id);
            return Err(e);
        }

        tracing::debug!("Created {}", product);
        Ok(product)
    }

    fn find(&self, text: Option<&str>) -> Result<Vec<Product>> {
        Ok(self.table.lock().find(text))
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.table.lock().get(id).cloned())
    }

    fn update(&self, product: &Product) -> Result<Option<Product>> {
        let mut table = self.table.lock();

        let previous = match table.replace(product.clone()) {
            Some(previous) => previous,
            None => return Ok(None),
        };
        if let Err(e) = self.save(&table) {
            table.restore(previous);
            return Err(e);
        }

        tracing::debug!("Updated {}", product);
        Ok(Some(product.clone()))
    }

    fn delete(&self, id: ProductId) -> Result<bool> {
        let mut table = self.table.lock();

        let removed = match table.remove(id) {
            Some(removed) => removed,
            None => return Ok(false),
        };
        if let Err(e) = self.save(&table) {
            table.restore(removed);
            return Err(e);
        }

        tracing::debug!("Deleted product {}", id);
        Ok(true)
    }
}

/// Serialize every record in the table and atomically replace `path`
///
/// The array goes to a sibling `.tmp` file, which is flushed to disk before
/// being renamed over the target. Readers see either the old array or the
/// new one, never a partial write.
fn write_products(path: &Path, table: &ProductTable) -> Result<()> {
    let content = serde_json::to_vec_pretty(&table.records())?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = write_synced(&tmp_path, &content).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        tracing::warn!("Failed to write {}: {}", path.display(), e);
        return Err(e.into());
    }

    Ok(())
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
