//! List the order lines of a commande, with stats
//!
//! Reads COMMANDE_API_URL / COMMANDE_API_TOKEN from the environment or `.env`.
//!
//! Run: cargo run --example list_items -- <commande_uuid>

use anyhow::Context;
use commande_client::shared::models::AnalyticsPeriod;
use commande_client::{ClientConfig, CommandeItemFilters, CommandeItemService, ListParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,commande_client=debug")),
        )
        .init();

    let commande_uuid = std::env::args()
        .nth(1)
        .context("usage: list_items <commande_uuid>")?;

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "connecting");
    let service = CommandeItemService::new(config.build_http_client()?);

    let page = service
        .list_by_commande(&commande_uuid, ListParams::default())
        .await
        .context("listing order lines")?;

    println!("{} line(s), page {}/{}", page.total, page.page, page.pages);
    for item in &page.items {
        println!(
            "  {} {:<10} x{:<4} {:>10.2} {} [{}]",
            item.uuid,
            item.type_item(),
            item.quantite,
            item.prix_total,
            item.devise,
            item.statut
        );
    }

    let filters = CommandeItemFilters::for_commande(&commande_uuid);
    let stats = service.get_stats(&filters).await?;
    println!(
        "revenue {:.2}, {} returned, {:.1}% return rate",
        stats.chiffre_affaires, stats.items_retournes, stats.taux_retour
    );

    let analytics = service.get_analytics(AnalyticsPeriod::Mois, &filters).await?;
    for point in &analytics.evolution {
        println!("  {} {:>6} {:>10.2}", point.date, point.quantite, point.chiffre_affaires);
    }

    Ok(())
}
