// migration/src/main.rs

use migration::Migrator;
use sea_orm_migration::prelude::*;

// DATABASE_URL を読み込み、up / down / fresh / status などのサブコマンドを提供する
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
