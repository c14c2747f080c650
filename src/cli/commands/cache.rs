use crate::config::Config;
use crate::db::Store;

async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}

pub async fn cmd_clear_cache(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let removed = store.clear_drug_cache().await?;
    println!("Cache cleared ({removed} entries removed).");
    Ok(())
}

pub async fn cmd_purge_cache(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let removed = store.purge_expired_cache().await?;
    let remaining = store.count_cached_summaries().await?;
    println!("Purged {removed} expired entries; {remaining} cached summaries remain.");
    Ok(())
}
