//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use swatch::ids::{ColorId, ProductId, SizeId};

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Color, Product, ProductOffers, Size},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_color(&self, color: ColorId) -> Result<Color, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let color = self.repository.get_color(&mut tx, color).await?;

        tx.commit().await?;

        Ok(color)
    }

    async fn get_size(&self, size: SizeId) -> Result<Size, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let size = self.repository.get_size(&mut tx, size).await?;

        tx.commit().await?;

        Ok(size)
    }

    async fn product_offers(&self, product: ProductId) -> Result<ProductOffers, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_product(&mut tx, product).await?;

        let available_colors = self.repository.list_product_colors(&mut tx, product).await?;
        let available_sizes = self.repository.list_product_sizes(&mut tx, product).await?;

        tx.commit().await?;

        Ok(ProductOffers {
            product: found,
            available_colors,
            available_sizes,
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve an active product.
    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogServiceError>;

    /// Retrieve a color.
    async fn get_color(&self, color: ColorId) -> Result<Color, CatalogServiceError>;

    /// Retrieve a size.
    async fn get_size(&self, size: SizeId) -> Result<Size, CatalogServiceError>;

    /// Retrieve an active product with the colors and sizes it is offered in.
    async fn product_offers(&self, product: ProductId) -> Result<ProductOffers, CatalogServiceError>;
}
