use anyhow::Result;

use newshub_core::{NewsClient, NewsSource, ViewLatch};

pub async fn run(client: &NewsClient, id: &str) -> Result<()> {
    // Count the view before loading, like opening the article page would
    let mut latch = ViewLatch::new();
    if let Err(e) = latch.record_view(client, id).await {
        tracing::warn!("Failed to record view of {}: {}", id, e);
    }

    let article = client.fetch_article(id).await?;

    if !article.categories.is_empty() {
        println!("{}", article.categories.join(" | "));
    }
    println!("{}\n", article.headline);

    let published = article
        .published_at()
        .map(|d| d.format("%B %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| article.created_at.clone());
    println!("{} | {} | {} views\n", article.countries, published, article.views);

    for paragraph in article.paragraphs() {
        println!("{}\n", paragraph.trim());
    }

    if let Some(image) = &article.image_url {
        println!("Image: {}", image);
    }

    Ok(())
}
