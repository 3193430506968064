use crate::domain::ports::ProductStore;
use crate::domain::product::Product;
use crate::error::{Result, ShopError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing product listings.
pub const CF_PRODUCTS: &str = "products";

/// A persistent product store backed by RocksDB.
///
/// Products are JSON-encoded under their big-endian id, so iteration order is id order.
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBProductStore {
    db: Arc<DB>,
}

impl RocksDBProductStore {
    /// Opens or creates a RocksDB instance at `path`, creating the products column family if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_products])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn products_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PRODUCTS).ok_or_else(|| {
            ShopError::InternalError(Box::new(std::io::Error::other(
                "Products column family not found",
            )))
        })
    }
}

#[async_trait]
impl ProductStore for RocksDBProductStore {
    async fn store(&self, product: Product) -> Result<()> {
        let cf = self.products_cf()?;
        let value = serde_json::to_vec(&product)?;
        self.db.put_cf(cf, product.id.to_be_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, id: u64) -> Result<Option<Product>> {
        let cf = self.products_cf()?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let cf = self.products_cf()?;
        let mut products = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            products.push(serde_json::from_slice(&value)?);
        }
        Ok(products)
    }
}
