use axum_catalog_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let inserted = seed_catalog(&pool).await?;
    println!("Seed completed. Inserted {inserted} products");
    Ok(())
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<u32> {
    let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("Catalog already has {count} products, skipping seed");
        return Ok(0);
    }

    let products = vec![
        (
            "Ferris Plush",
            Decimal::new(1999, 2),
            "A crab-shaped companion for long compile times",
            "Toys",
            4.8_f64,
            320,
        ),
        (
            "Mechanical Keyboard",
            Decimal::new(12950, 2),
            "Tactile switches, PBT keycaps",
            "Electronics",
            4.4,
            87,
        ),
        (
            "Rust Hoodie",
            Decimal::new(5500, 2),
            "Warm hoodie for Rustaceans",
            "Clothing",
            4.1,
            45,
        ),
        (
            "USB-C Dock",
            Decimal::new(8999, 2),
            "Eleven ports, one cable",
            "Electronics",
            3.9,
            120,
        ),
    ];

    let mut inserted = 0;
    for (title, price, description, category, rate, rating_count) in products {
        sqlx::query(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(category)
        .execute(pool)
        .await?;
        let (category_id,): (i64,) = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
            .bind(category)
            .fetch_one(pool)
            .await?;

        let (rating_id,): (i64,) =
            sqlx::query_as("INSERT INTO ratings (rate, count) VALUES ($1, $2) RETURNING id")
                .bind(rate)
                .bind(rating_count)
                .fetch_one(pool)
                .await?;

        sqlx::query(
            r#"
            INSERT INTO products (title, price, description, category_id, rating_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(title)
        .bind(price)
        .bind(description)
        .bind(category_id)
        .bind(rating_id)
        .execute(pool)
        .await?;
        inserted += 1;

        println!("Seeded product {title} ({category})");
    }

    Ok(inserted)
}
