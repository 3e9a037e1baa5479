//! Test Helpers

use sqlx::{query, query_scalar};

use swatch::ids::{ColorId, ProductId, SizeId};

use crate::{
    domain::catalog::models::{Category, Color, Product, Size},
    test::TestContext,
};

pub(crate) fn product(id: i64, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        category: Category {
            id: 1,
            name: "Emulsions".to_string(),
            slug: "emulsions".to_string(),
            features_colors: true,
            features_sizes: true,
        },
        is_active: true,
    }
}

pub(crate) fn color(id: i64, name: &str) -> Color {
    Color {
        id: ColorId::new(id),
        name: name.to_string(),
        code: format!("C-{id:03}"),
        hex_code: None,
    }
}

pub(crate) fn size(id: i64, name: &str) -> Size {
    Size {
        id: SizeId::new(id),
        name: name.to_string(),
    }
}

pub(crate) async fn seed_category(
    ctx: &TestContext,
    name: &str,
    features_colors: bool,
    features_sizes: bool,
) -> Result<i64, sqlx::Error> {
    query_scalar(
        "INSERT INTO categories (name, slug, features_colors, features_sizes) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(name.to_lowercase().replace(' ', "-"))
    .bind(features_colors)
    .bind(features_sizes)
    .fetch_one(ctx.db.pool())
    .await
}

pub(crate) async fn seed_product(
    ctx: &TestContext,
    category: i64,
    name: &str,
    is_active: bool,
) -> Result<ProductId, sqlx::Error> {
    let id: i64 = query_scalar(
        "INSERT INTO products (category_id, name, slug, is_active) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(category)
    .bind(name)
    .bind(name.to_lowercase().replace(' ', "-"))
    .bind(is_active)
    .fetch_one(ctx.db.pool())
    .await?;

    Ok(ProductId::new(id))
}

pub(crate) async fn seed_color(
    ctx: &TestContext,
    name: &str,
    code: &str,
    hex_code: Option<&str>,
) -> Result<ColorId, sqlx::Error> {
    let id: i64 =
        query_scalar("INSERT INTO colors (name, code, hex_code) VALUES ($1, $2, $3) RETURNING id")
            .bind(name)
            .bind(code)
            .bind(hex_code)
            .fetch_one(ctx.db.pool())
            .await?;

    Ok(ColorId::new(id))
}

pub(crate) async fn seed_size(ctx: &TestContext, name: &str) -> Result<SizeId, sqlx::Error> {
    let id: i64 = query_scalar("INSERT INTO sizes (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(ctx.db.pool())
        .await?;

    Ok(SizeId::new(id))
}

pub(crate) async fn offer_color(
    ctx: &TestContext,
    product: ProductId,
    color: ColorId,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO product_colors (product_id, color_id) VALUES ($1, $2)")
        .bind(product.into_inner())
        .bind(color.into_inner())
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn offer_size(
    ctx: &TestContext,
    product: ProductId,
    size: SizeId,
) -> Result<(), sqlx::Error> {
    query("INSERT INTO product_sizes (product_id, size_id) VALUES ($1, $2)")
        .bind(product.into_inner())
        .bind(size.into_inner())
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}
