//! Catalog service: farmer product listings.

use chrono::NaiveDate;
use common::UserId;
use domain::{Category, Money, Product, ProductId, StockLevel};
use market_store::MarketStore;

use crate::error::{MarketError, Result};
use crate::gate;

/// Fields a farmer supplies when listing or editing a product.
/// The unit of measure is never accepted from the caller; it is
/// rederived from the category on every save.
#[derive(Debug, Clone)]
pub struct ProductSpec {
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub stock: StockLevel,
    pub harvest_date: Option<NaiveDate>,
}

/// Manages product listings.
#[derive(Clone)]
pub struct CatalogService {
    store: MarketStore,
}

impl CatalogService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Lists a new product for a farmer.
    #[tracing::instrument(skip(self, spec))]
    pub async fn add_product(&self, farmer: UserId, spec: ProductSpec) -> Result<ProductId> {
        self.store
            .with_write(|state| {
                gate::require_farmer(state, farmer)?;
                let product = Product::new(
                    farmer,
                    spec.name,
                    spec.category,
                    spec.price,
                    spec.stock,
                    spec.harvest_date,
                );
                let id = product.id;
                state.insert_product(product);
                tracing::info!(product = %id, "product listed");
                Ok(id)
            })
            .await
    }

    /// Edits a product. Farmers can only edit their own listings;
    /// anyone else's product is reported as not found.
    #[tracing::instrument(skip(self, spec))]
    pub async fn update_product(
        &self,
        farmer: UserId,
        product_id: ProductId,
        spec: ProductSpec,
    ) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_farmer(state, farmer)?;
                let product = state.product_mut(product_id)?;
                if product.farmer != farmer {
                    return Err(MarketError::NotFound);
                }
                product.name = spec.name;
                product.set_category(spec.category);
                product.price = spec.price;
                product.stock = spec.stock;
                product.harvest_date = spec.harvest_date;
                Ok(())
            })
            .await
    }

    /// Public product listing, optionally filtered by category.
    pub async fn list_products(&self, category: Option<Category>) -> Vec<Product> {
        self.store
            .with_read(|state| {
                let mut products: Vec<Product> = state
                    .products()
                    .filter(|p| category.is_none_or(|c| p.category == c))
                    .cloned()
                    .collect();
                products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                products
            })
            .await
    }

    /// A farmer's own listings, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn farmer_products(&self, farmer: UserId) -> Result<Vec<Product>> {
        self.store
            .with_read(|state| {
                gate::require_farmer(state, farmer)?;
                let mut products: Vec<Product> = state
                    .products()
                    .filter(|p| p.farmer == farmer)
                    .cloned()
                    .collect();
                products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(products)
            })
            .await
    }
}
