use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use newshub_core::{
    feed::{split_regions, ArticleDraft},
    Error, NewsClient,
};

use crate::display::short_date;

/// Fields to change on update; `None` keeps the current value
pub struct ArticleChanges {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub regions: Option<String>,
    pub date: Option<NaiveDate>,
}

pub fn ensure_logged_in(client: &NewsClient) -> Result<()> {
    if !client.is_authenticated() {
        return Err(Error::NotLoggedIn.into());
    }
    Ok(())
}

pub async fn list(client: &NewsClient) -> Result<()> {
    let articles = client.list_articles().await?;

    if articles.is_empty() {
        println!("No articles yet.");
        println!("\nTo publish one, run:");
        println!("  newshub admin create --headline <text> --body <text> --regions <list>");
        return Ok(());
    }

    println!("Articles ({}):\n", articles.len());

    for article in &articles {
        let categories = if article.categories.is_empty() {
            "categories pending".to_string()
        } else {
            article.categories.join(", ")
        };

        println!("  {} - {}", article.id, article.headline);
        println!(
            "    {} | {} | {} | {} views",
            short_date(article),
            article.countries,
            categories,
            article.views
        );
    }

    Ok(())
}

pub async fn create(
    client: &NewsClient,
    headline: &str,
    body: &str,
    regions: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let created_on = date.unwrap_or_else(|| Utc::now().date_naive());
    let draft = ArticleDraft::new(headline, body, regions, created_on);

    println!("Publishing '{}' (the backend assigns categories)...", draft.headline);

    match client.create_article(&draft).await? {
        Some(article) => {
            println!("Created article {}", article.id);
            if !article.categories.is_empty() {
                println!("Categories: {}", article.categories.join(", "));
            }
        }
        None => println!("Article created."),
    }

    Ok(())
}

pub async fn update(client: &NewsClient, id: &str, changes: ArticleChanges) -> Result<()> {
    let current = client.get_article(id).await?;
    // An unreadable stored date can only be replaced, not carried over
    let mut draft = match changes.date {
        Some(date) => ArticleDraft::from_article_on(&current, date),
        None => ArticleDraft::from_article(&current)?,
    };

    if let Some(headline) = changes.headline {
        draft.headline = headline.trim().to_string();
    }
    if let Some(body) = changes.body {
        draft.body = body;
    }
    if let Some(regions) = changes.regions {
        draft.countries = split_regions(&regions);
    }

    let original = ArticleDraft::from_article(&current).ok();
    if original.as_ref() == Some(&draft) {
        println!("Nothing to update.");
        return Ok(());
    }

    client.update_article(id, &draft).await?;
    println!("Updated article {}", id);

    Ok(())
}

pub async fn delete(client: &NewsClient, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Are you sure you want to delete article {}?", id))? {
        println!("Cancelled.");
        return Ok(());
    }

    client.delete_article(id).await?;
    println!("Deleted article {}", id);

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
