use tracing::{debug, info};

use super::error::ViewError;
use super::quantity::QuantitySelector;
use super::surface::{RowAction, RowCells, TableSurface};
use crate::catalog_actor::CatalogSnapshot;
use crate::domain::{Bill, Product, ProductId};

/// A rendered product row and the inputs it owns.
#[derive(Debug, Clone)]
pub struct RowHandle {
    index: usize,
    product: Product,
    quantity: QuantitySelector,
}

impl RowHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> &QuantitySelector {
        &self.quantity
    }

    pub fn quantity_mut(&mut self) -> &mut QuantitySelector {
        &mut self.quantity
    }

    /// Element name of the quantity container on page-style surfaces.
    pub fn container_id(&self) -> String {
        format!("quantityContainer{}", self.index)
    }

    /// Element name of the quantity input on page-style surfaces.
    pub fn input_id(&self) -> String {
        format!("quantityInput{}", self.index)
    }
}

/// Rows produced by one render, keyed by product id.
///
/// A new render replaces the whole table, so handles never outlive the
/// snapshot they were built from.
#[derive(Debug, Clone, Default)]
pub struct RenderedTable {
    revision: u64,
    rows: Vec<RowHandle>,
}

impl RenderedTable {
    /// Catalog revision the rows were built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RowHandle] {
        &self.rows
    }

    pub fn row(&self, id: ProductId) -> Result<&RowHandle, ViewError> {
        self.rows
            .iter()
            .find(|r| r.product.id == id)
            .ok_or(ViewError::UnknownProduct(id))
    }

    pub fn row_mut(&mut self, id: ProductId) -> Result<&mut RowHandle, ViewError> {
        self.rows
            .iter_mut()
            .find(|r| r.product.id == id)
            .ok_or(ViewError::UnknownProduct(id))
    }

    /// Row at a display position.
    pub fn row_at(&self, index: usize) -> Result<&RowHandle, ViewError> {
        self.rows.get(index).ok_or(ViewError::UnknownRow(index))
    }

    /// Bill for the quantities currently entered, computed from scratch.
    pub fn bill(&self) -> Bill {
        Bill::from_selection(self.rows.iter().map(|r| (&r.product, r.quantity.value())))
    }
}

/// Draws `snapshot` onto `surface`, replacing whatever was there, and
/// returns fresh row handles with every quantity reset to zero.
pub fn render<S: TableSurface + ?Sized>(snapshot: &CatalogSnapshot, surface: &mut S) -> RenderedTable {
    surface.clear_rows();

    if snapshot.products.is_empty() {
        info!(revision = snapshot.revision, "No products to render.");
        return RenderedTable {
            revision: snapshot.revision,
            rows: Vec::new(),
        };
    }

    let rows: Vec<RowHandle> = snapshot
        .products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            surface.append_row(&RowCells {
                index,
                product_id: product.id,
                name: product.name.clone(),
                price: product.price.to_string(),
                description: product.description.clone(),
                actions: RowAction::ALL,
            });
            RowHandle {
                index,
                product: product.clone(),
                quantity: QuantitySelector::default(),
            }
        })
        .collect();

    debug!(revision = snapshot.revision, rows = rows.len(), "Rendered products");
    RenderedTable {
        revision: snapshot.revision,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductList;
    use crate::view::TextSurface;
    use std::sync::Arc;

    fn snapshot(revision: u64, products: Vec<Product>) -> CatalogSnapshot {
        CatalogSnapshot {
            revision,
            products: Arc::new(ProductList::new(products)),
        }
    }

    #[test]
    fn test_one_row_per_product_with_own_fields() {
        let products = vec![
            Product::new(1, "Pen", "2.50", "Blue"),
            Product::new(2, "Pad", "1.20", "Lined"),
            Product::new(3, "Cup", "9", ""),
        ];
        let mut surface = TextSurface::new();
        let table = render(&snapshot(1, products.clone()), &mut surface);

        assert_eq!(table.len(), 3);
        assert_eq!(surface.rows().len(), 3);
        for (i, (row, product)) in surface.rows().iter().zip(&products).enumerate() {
            assert_eq!(row.index, i);
            assert_eq!(row.product_id, product.id);
            assert_eq!(row.name, product.name);
            assert_eq!(row.price, product.price.as_str());
            assert_eq!(row.description, product.description);
        }
    }

    #[test]
    fn test_empty_list_renders_zero_rows() {
        let mut surface = TextSurface::new();
        let table = render(&snapshot(4, vec![]), &mut surface);
        assert!(table.is_empty());
        assert!(surface.rows().is_empty());
        assert_eq!(table.revision(), 4);
    }

    #[test]
    fn test_rerender_clears_previous_rows_and_quantities() {
        let mut surface = TextSurface::new();
        let mut table = render(&snapshot(1, vec![Product::new(1, "Pen", "2.50", "Blue")]), &mut surface);
        table.row_mut(ProductId(1)).unwrap().quantity_mut().set(3);

        let table = render(&snapshot(2, vec![Product::new(1, "Pen", "2.50", "Blue")]), &mut surface);
        assert_eq!(surface.clears(), 2);
        assert_eq!(surface.rows().len(), 1);
        assert_eq!(table.row(ProductId(1)).unwrap().quantity().value(), Some(0));
    }

    #[test]
    fn test_rows_are_keyed_by_product_id() {
        let mut surface = TextSurface::new();
        let table = render(
            &snapshot(1, vec![Product::new(7, "Pen", "2.50", ""), Product::new(3, "Pad", "1", "")]),
            &mut surface,
        );
        let pad = table.row(ProductId(3)).unwrap();
        assert_eq!(pad.index(), 1);
        assert_eq!(pad.input_id(), "quantityInput1");
        assert_eq!(pad.container_id(), "quantityContainer1");
        assert_eq!(table.row(ProductId(9)).unwrap_err(), ViewError::UnknownProduct(ProductId(9)));
        assert_eq!(table.row_at(5).unwrap_err(), ViewError::UnknownRow(5));
    }

    #[test]
    fn test_bill_from_rendered_quantities() {
        let mut surface = TextSurface::new();
        let mut table = render(
            &snapshot(1, vec![Product::new(1, "Pen", "2.50", ""), Product::new(2, "Pad", "1.25", "")]),
            &mut surface,
        );
        table.row_mut(ProductId(2)).unwrap().quantity_mut().set(2);

        let bill = table.bill();
        assert_eq!(bill.lines().len(), 1);
        assert_eq!(bill.lines()[0].text(), "Pad - Quantity: 2 - Subtotal: $2.50");
        assert_eq!(bill.total_text(), "$2.50");
    }
}
