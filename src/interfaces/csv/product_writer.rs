use crate::domain::product::Product;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ProductRow<'a> {
    id: u64,
    name: &'a str,
    stock: u64,
    listed: bool,
}

/// Writes the product listing as `id,name,stock,listed` CSV.
pub struct ProductWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ProductWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_products(&mut self, products: impl IntoIterator<Item = Product>) -> Result<()> {
        let mut wrote_any = false;
        for product in products {
            self.writer.serialize(ProductRow {
                id: product.id,
                name: &product.name,
                stock: product.stock,
                listed: product.listed,
            })?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer.write_record(["id", "name", "stock", "listed"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
