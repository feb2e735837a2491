use log::info;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

pub async fn connect_to_database(
    mongo_uri: &str,
    db_name: &str,
    timeout: Duration,
) -> mongodb::error::Result<Database> {
    let mut options = ClientOptions::parse(mongo_uri).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);

    let client = Client::with_options(options)?;
    let db = client.database(db_name);
    db.run_command(doc! { "ping": 1 }).await?;
    info!("Connected to MongoDB database {}", db_name);
    Ok(db)
}

pub async fn close_database(db: Database) {
    info!("Closing MongoDB connection");
    db.client().clone().shutdown().await;
}
