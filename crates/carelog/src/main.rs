use std::sync::Arc;

use carelog_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    carelog_core::logging::init("carelog")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(
        toilet_channel = cfg.toilet_channel.0,
        foodwater_channel = cfg.foodwater_channel.0,
        water_bowl_ml = cfg.water_bowl_ml,
        "starting {} care log bot",
        cfg.pet_name
    );

    carelog_discord::router::run(cfg)
        .await
        .map_err(|e| anyhow::anyhow!("discord bot failed: {e}"))?;

    Ok(())
}
