mod cli;
mod infra;
mod routes;
mod server;

use casework::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
