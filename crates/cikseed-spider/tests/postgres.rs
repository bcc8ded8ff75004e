use cikseed_spider::cik::Cik;
use cikseed_spider::error::StorageError;
use cikseed_spider::fetcher::Company;
use cikseed_spider::storage::{Header, PgStorage, Storage};
use dotenv::var;
use tokio_postgres::{self as pg, NoTls};

// Runs only when CIKSEED_TEST_DATABASE_URL points at a scratch database. Everything happens
// inside a throwaway schema, dropped at the end.

fn company(name: &str, cik: &str, tickers: &[&str], exchanges: &[&str]) -> Company {
    Company {
        name: name.to_string(),
        cik: Cik::parse(cik).unwrap(),
        tickers: Some(tickers.iter().map(|t| t.to_string()).collect()),
        exchanges: Some(exchanges.iter().map(|e| e.to_string()).collect()),
    }
}

async fn count(storage: &PgStorage, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {table}");
    storage
        .client()
        .query_one(query.as_str(), &[])
        .await
        .unwrap()
        .get(0)
}

#[tokio::test]
async fn postgres_storage() {
    dotenv::dotenv().ok();
    let url = match var("CIKSEED_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("CIKSEED_TEST_DATABASE_URL not set; skipping");
            return;
        }
    };

    // -- CONNECT TO POSTGRES --
    let (pg_client, pg_conn) = pg::connect(&url, NoTls).await.unwrap();
    tokio::spawn(async move {
        if let Err(err) = pg_conn.await {
            panic!("database connection error: {}", err)
        }
    });

    let schema = format!("cikseed_test_{}", std::process::id());
    pg_client
        .batch_execute(&format!(
            "DROP SCHEMA IF EXISTS {schema} CASCADE; CREATE SCHEMA {schema}; SET search_path TO {schema};"
        ))
        .await
        .unwrap();
    let mut storage = PgStorage::from_client(pg_client);

    // -- SCHEMA --
    storage.initialize_schema().await.unwrap();
    assert!(matches!(
        storage.initialize_schema().await,
        Err(StorageError::Schema(_))
    ));

    // -- HEADERS --
    let header = Header::new(["balance", "sheet"]);
    storage.insert_header(&header).await.unwrap();
    assert!(matches!(
        storage.insert_header(&header).await,
        Err(StorageError::ConstraintViolation { .. })
    ));

    // -- PARITY --
    let corrupt = company("Apple Inc.", "320193", &["AAPL", "AAPL.B"], &["NASDAQ"]);
    assert!(matches!(
        storage.insert_company(&corrupt).await,
        Err(StorageError::CorruptData(_))
    ));
    assert_eq!(count(&storage, "company").await, 0);

    // -- INSERT --
    let apple = company("Apple Inc.", "320193", &["AAPL"], &["NASDAQ"]);
    let id = storage.insert_company(&apple).await.unwrap();
    let row = storage
        .client()
        .query_one(
            "SELECT c.cik, t.value, t.exchange FROM company c JOIN ticker t ON t.company_id = c.id WHERE c.id = $1",
            &[&id],
        )
        .await
        .unwrap();
    assert_eq!(row.get::<_, String>(0), "0000320193");
    assert_eq!(row.get::<_, String>(1), "AAPL");
    assert_eq!(row.get::<_, String>(2), "NASDAQ");

    // -- ATOMICITY --
    let imposter = company("Imposter", "1", &["ZZZ", "AAPL"], &["NYSE", "NYSE"]);
    match storage.insert_company(&imposter).await {
        Err(StorageError::ConstraintViolation { constraint, .. }) => {
            assert_eq!(constraint, "ticker_value_key")
        }
        other => panic!("expected a constraint violation, got {other:?}"),
    }
    assert_eq!(count(&storage, "company").await, 1);
    assert_eq!(count(&storage, "ticker").await, 1);

    // -- CASCADE --
    storage
        .client()
        .execute("DELETE FROM company WHERE id = $1", &[&id])
        .await
        .unwrap();
    assert_eq!(count(&storage, "ticker").await, 0);

    storage
        .client()
        .batch_execute(&format!("DROP SCHEMA {schema} CASCADE"))
        .await
        .unwrap();
}
