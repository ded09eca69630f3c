use std::collections::HashMap;

use anyhow::{Result, anyhow};

use crate::types::{Book, CleanedBook};

/// Sentinel label substituted for missing genres before dimension extraction.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// A deduplicated lookup table mapping a categorical value to a 1-based
/// surrogate id equal to its position in first-occurrence order.
#[derive(Debug, Clone)]
pub struct DimensionTable {
    names: Vec<String>,
    ids: HashMap<String, i64>,
}

impl DimensionTable {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut ids: HashMap<String, i64> = HashMap::new();

        for value in values {
            if !ids.contains_key(value) {
                names.push(value.to_string());
                ids.insert(value.to_string(), names.len() as i64);
            }
        }

        DimensionTable { names, ids }
    }

    pub fn id_of(&self, value: &str) -> Option<i64> {
        self.ids.get(value).copied()
    }

    /// Distinct values in first-occurrence order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// (id, value) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as i64 + 1, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Derive the author and genre dimension tables and attach their ids to
/// every book row.
///
/// Missing genres are replaced with `UNKNOWN_GENRE` before the genre
/// dimension is extracted, so the sentinel gets a regular dimension entry
/// instead of a missing value collapsing into a spurious one. Both
/// dimensions are derived from the column's own distinct values, so every
/// row's lookup resolves and no row is dropped.
pub fn attach_dimension_keys(
    books: Vec<Book>,
) -> Result<(Vec<CleanedBook>, DimensionTable, DimensionTable)> {
    let autores = DimensionTable::from_values(books.iter().map(|b| b.autor.as_str()));
    let generos = DimensionTable::from_values(
        books
            .iter()
            .map(|b| b.genero.as_deref().unwrap_or(UNKNOWN_GENRE)),
    );

    let mut cleaned = Vec::with_capacity(books.len());
    for book in books {
        let genero = book
            .genero
            .as_deref()
            .unwrap_or(UNKNOWN_GENRE)
            .to_string();
        let autor_id = autores
            .id_of(&book.autor)
            .ok_or_else(|| anyhow!("Author missing from dimension table: {}", book.autor))?;
        let genero_id = generos
            .id_of(&genero)
            .ok_or_else(|| anyhow!("Genre missing from dimension table: {}", genero))?;

        cleaned.push(CleanedBook {
            livro_id: book.livro_id,
            livro: book.livro,
            autor: book.autor,
            idioma_original: book.idioma_original,
            ano_publicacao: book.ano_publicacao,
            vendas: book.vendas,
            genero,
            autor_id,
            genero_id,
        });
    }

    Ok((cleaned, autores, generos))
}
