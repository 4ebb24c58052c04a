//! Storefront demo binary
//!
//! Drives one scripted session through the store and logs what a UI would
//! render along the way.

use anyhow::Context;
use skyservices::{
    Catalog, StorefrontAction, StorefrontConfig, StorefrontEnvironment, StorefrontReducer, StorefrontState,
    format_amount,
};
use skyservices_core::environment::SystemClock;
use skyservices_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type StorefrontStore = Store<StorefrontState, StorefrontAction, StorefrontEnvironment, StorefrontReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyservices=debug,skyservices_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().context("loading storefront configuration")?;
    tracing::info!(?config, "Configuration loaded");

    let catalog = Arc::new(Catalog::skyservices());
    for (section, offerings) in catalog.sections() {
        tracing::info!(section = section.title(), offerings = offerings.len(), "Catalog section");
        for offering in offerings {
            tracing::info!("  [{}] {} {}", offering.id, offering.name, format_amount(offering.price));
        }
    }

    let env = StorefrontEnvironment::new(Arc::clone(&catalog), Arc::new(SystemClock), config.clone());
    let store = Store::new(StorefrontState::new(), StorefrontReducer::new(), env);

    store
        .send_and_wait_for(
            StorefrontAction::SessionStarted,
            |a| matches!(a, StorefrontAction::ShowWelcome),
            config.welcome_delay * 2,
        )
        .await?;
    render(&store).await;

    for id in ["1", "2", "1"] {
        store.send(StorefrontAction::add(id)).await?;
    }
    render(&store).await;

    store.send(StorefrontAction::remove("1")).await?;
    store.send(StorefrontAction::add("1")).await?;
    render(&store).await;

    let mut checkout = store.send(StorefrontAction::InitiateCheckout).await?;
    // Added during processing; the post-checkout clear removes it as well
    store.send(StorefrontAction::add("4")).await?;
    checkout
        .wait_with_timeout(config.checkout_delay * 2)
        .await
        .context("waiting for checkout to complete")?;
    render(&store).await;

    tokio::time::sleep(config.clear_delay + Duration::from_millis(50)).await;
    render(&store).await;

    store.send(StorefrontAction::ToggleTheme).await?;
    let snapshot = store.state(serde_json::to_string_pretty).await?;
    println!("{snapshot}");

    store.send(StorefrontAction::ResetSession).await?;
    store.shutdown_default().await?;

    Ok(())
}

async fn render(store: &StorefrontStore) {
    let (lines, totals, checkout, notification) = store
        .state(|s| {
            let lines: Vec<String> = s
                .selection
                .lines()
                .iter()
                .map(|l| format!("{} x{}", l.name(), l.quantity))
                .collect();
            (lines, s.totals(), s.checkout, s.notification.as_ref().map(|n| n.message()))
        })
        .await;

    tracing::info!(?lines, %totals, ?checkout, "Selection");
    if let Some(message) = notification {
        tracing::info!("Notification: {message}");
    }
}
