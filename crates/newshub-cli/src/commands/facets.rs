use anyhow::Result;

use newshub_core::{feed::derive_facets, NewsClient};

pub async fn run(client: &NewsClient) -> Result<()> {
    let articles = client.list_articles().await?;
    let facets = derive_facets(&articles);

    if facets.is_empty() {
        println!("No articles yet, nothing to filter by.");
        return Ok(());
    }

    println!("Categories ({}):", facets.categories.len());
    for category in &facets.categories {
        println!("  {}", category);
    }

    println!("\nRegions ({}):", facets.countries.len());
    for country in &facets.countries {
        println!("  {}", country);
    }

    println!("\nUse them with: newshub feed --category <name> --country <name>");

    Ok(())
}
