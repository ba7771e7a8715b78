use sqlx::postgres::PgPool;
use sqlx::Row;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("DATABASE_URL is not set; the server will use the in-memory form store.");
            return Ok(());
        }
    };

    println!("CHECKING DATABASE CONNECTION");
    println!("============================");

    println!("\nTesting connection...");
    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => {
            println!("Connection successful!");
            pool
        }
        Err(e) => {
            println!("Connection failed: {}", e);
            println!("\nTroubleshooting:");
            println!("1. Make sure PostgreSQL is running");
            println!("2. Check the username, password, host and port in DATABASE_URL");
            println!("3. Verify the database exists");
            return Ok(());
        }
    };

    let row = sqlx::query("SELECT current_database(), current_user, version()")
        .fetch_one(&pool)
        .await?;
    let db: String = row.get(0);
    let user: String = row.get(1);
    let version: String = row.get(2);
    println!("Current Database: {}", db);
    println!("Current User: {}", user);
    println!("PostgreSQL Version: {}", version);

    println!("\nChecking 'forms' table...");
    let table_row = sqlx::query(
        "SELECT count(*) FROM information_schema.tables WHERE table_name = 'forms'",
    )
    .fetch_one(&pool)
    .await?;
    let count: i64 = table_row.get(0);

    if count == 0 {
        println!("Forms table does not exist; it is created by migrations on server start.");
        return Ok(());
    }

    let forms: i64 = sqlx::query("SELECT count(*) FROM forms")
        .fetch_one(&pool)
        .await?
        .get(0);
    println!("Forms table exists with {} form(s).", forms);

    Ok(())
}
