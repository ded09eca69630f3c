use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::types::{CleanedBook, Comment, LinkedComment};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetch the comments dataset, a JSON array of comment records, by URL.
pub fn fetch_comments(url: &str) -> Result<Vec<Comment>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch comments from {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Comments source returned status {}", response.status());
    }

    let comments: Vec<Comment> = response
        .json()
        .context("Failed to parse comments JSON")?;

    Ok(comments)
}

pub fn parse_comments(json: &str) -> Result<Vec<Comment>> {
    serde_json::from_str(json).context("Failed to parse comments JSON")
}

/// Resolve each comment's book reference by exact title match.
///
/// Titles are compared as-is: a near-miss (case, whitespace, accents) stays
/// unmatched and the comment keeps a NULL book reference. When several books
/// share a title, the first-loaded one wins.
pub fn link_comments_to_books(
    comments: Vec<Comment>,
    books: &[CleanedBook],
) -> Vec<LinkedComment> {
    let mut ids_by_title: HashMap<&str, i64> = HashMap::new();
    for book in books {
        ids_by_title
            .entry(book.livro.as_str())
            .or_insert(book.livro_id);
    }

    comments
        .into_iter()
        .map(|c| LinkedComment {
            livro_id: ids_by_title.get(c.livro.as_str()).copied(),
            nome: c.nome,
            sobrenome: c.sobrenome,
            comentario: c.comentario,
        })
        .collect()
}
