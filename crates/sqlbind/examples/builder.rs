//! Builder example for sqlbind
//!
//! Run with: cargo run --example builder -p sqlbind
//!
//! Uses the in-memory connection, so no database is needed. Set
//! `RUST_LOG`-style filtering in your own subscriber to see `sqlbind.sql` events.

use sqlbind::prelude::*;
use sqlbind::{Column, ColumnType, MemoryConnection};

#[tokio::main]
async fn main() -> Result<(), QueryError> {
    let driver = MemoryConnection::new()
        .with_version("8.0.36")
        .with_columns(vec![
            Column::new("id", ColumnType::Int),
            Column::new("name", ColumnType::String),
            Column::new("active", ColumnType::Bool),
            Column::new("tags", ColumnType::Set),
            Column::new("created_at", ColumnType::DateTime),
        ])
        .with_row([
            Some("1"),
            Some("Laptop"),
            Some("1"),
            Some("new,sale"),
            Some("2024-01-15 10:30:00"),
        ])
        .with_row([Some("2"), Some("Mouse"), Some("0"), Some(""), None]);

    let db = Database::new(driver);
    let info = db.connect(
        &ConnectionOptions::new()
            .hostname("localhost")
            .user("root")
            .database("shop"),
    )?;
    println!("connected to {} ({})", info.version, db.table("products"));

    // ============================================
    // SELECT with join, conditions and limit
    // ============================================
    let mut select = db.query();
    select
        .select(vec![
            FieldSpec::from("id"),
            FieldSpec::from("name"),
            FieldSpec::alias("total", "SUM(o.amount)"),
        ])?
        .from(TableSpec::alias("p", "products"))?
        .join(
            &Join::new("orders").kind("left").alias("o").on("o.product_id = p.id AND o.status = ?"),
            &values!["paid"],
        )?
        .where_("p.price > ?", &values![100])?
        .and("p.name LIKE ?", &values!["%o%"])?
        .add("GROUP BY p.id")
        .limit_offset(0, 10);
    println!("{}", select.to_sql()?);

    // ============================================
    // INSERT, UPDATE, DELETE
    // ============================================
    let mut insert = db.query();
    insert.insert(
        "products",
        vec!["name", "price"],
        &values![vec![Value::from("Keyboard"), Value::from(80)], vec![Value::from("O'Neil mug"), Value::from(12)]],
    )?;
    println!("{}", insert.to_sql()?);

    let mut update = db.query();
    update
        .update("products")?
        .set([
            ("price", ValueExpr::from(99)),
            ("updated_at", ValueExpr::raw("NOW()")),
        ])?
        .where_("id = ?", &values![1])?;
    println!("{}", update.to_sql()?);

    let mut delete = db.query();
    delete.delete().from("products")?.where_("id IN ?", &values![vec![3, 4]])?;
    println!("{}", delete.to_sql()?);

    // ============================================
    // Execute and read typed rows
    // ============================================
    let mut query = db.query();
    query
        .select("*")?
        .from("products")?
        .on_start(|sql| {
            println!("about to run: {sql}");
            StartAction::Continue
        });

    let result = query
        .execute_async(&TracingEvents::new())
        .await?
        .into_result()?;
    for row in &result.rows {
        println!("{}", row.to_json());
    }

    db.disconnect();
    Ok(())
}
