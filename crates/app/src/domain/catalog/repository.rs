//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use swatch::ids::{ColorId, ProductId, SizeId};

use crate::domain::catalog::models::{Category, Color, Product, Size};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_COLOR_SQL: &str = include_str!("sql/get_color.sql");
const GET_SIZE_SQL: &str = include_str!("sql/get_size.sql");
const LIST_PRODUCT_COLORS_SQL: &str = include_str!("sql/list_product_colors.sql");
const LIST_PRODUCT_SIZES_SQL: &str = include_str!("sql/list_product_sizes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_color(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        color: ColorId,
    ) -> Result<Color, sqlx::Error> {
        query_as::<Postgres, Color>(GET_COLOR_SQL)
            .bind(color.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size: SizeId,
    ) -> Result<Size, sqlx::Error> {
        query_as::<Postgres, Size>(GET_SIZE_SQL)
            .bind(size.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_colors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<ColorId>, sqlx::Error> {
        let ids: Vec<i64> = query_scalar(LIST_PRODUCT_COLORS_SQL)
            .bind(product.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        Ok(ids.into_iter().map(ColorId::new).collect())
    }

    pub(crate) async fn list_product_sizes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Vec<SizeId>, sqlx::Error> {
        let ids: Vec<i64> = query_scalar(LIST_PRODUCT_SIZES_SQL)
            .bind(product.into_inner())
            .fetch_all(&mut **tx)
            .await?;

        Ok(ids.into_iter().map(SizeId::new).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            category: Category {
                id: row.try_get("category_id")?,
                name: row.try_get("category_name")?,
                slug: row.try_get("category_slug")?,
                features_colors: row.try_get("features_colors")?,
                features_sizes: row.try_get("features_sizes")?,
            },
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Color {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ColorId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            hex_code: row.try_get("hex_code")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Size {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SizeId::new(row.try_get("id")?),
            name: row.try_get("name")?,
        })
    }
}
