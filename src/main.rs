use std::sync::Arc;

use anyhow::Result;

pub mod cache;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod error;
pub mod logging;
pub mod service;
pub mod util;
pub mod web;

use crate::service::GoldService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let service = Arc::new(GoldService::from_settings());
    if let Err(why) = web::start(service).await {
        logging::error_file_async(format!("Failed to start the http server because {:?}", why));
        logging::error_console(format!("Failed to start the http server because {:?}", why));
        return Err(why);
    }

    Ok(())
}
