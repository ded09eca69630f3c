use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::Book;

/// A row of the source CSV. The serde renames are the fixed mapping from
/// the English source headers to the target schema column names.
#[derive(Debug, Deserialize)]
struct CsvBook {
    #[serde(rename = "Book")]
    livro: String,
    #[serde(rename = "Author(s)")]
    autor: String,
    #[serde(rename = "Original language")]
    idioma_original: String,
    #[serde(rename = "First published")]
    ano_publicacao: i32,
    #[serde(rename = "Approximate sales in millions")]
    vendas: f64,
    #[serde(rename = "Genre")]
    genero: Option<String>,
}

pub fn load_books(path: &Path) -> Result<Vec<Book>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    read_books(file)
}

/// Each book gets its 1-based `livro_id` from the row position at load time.
pub fn read_books<R: Read>(input: R) -> Result<Vec<Book>> {
    let mut reader = csv::Reader::from_reader(input);

    let mut books = Vec::new();
    for (idx, row) in reader.deserialize::<CsvBook>().enumerate() {
        let row = row.with_context(|| format!("Failed to parse CSV row {}", idx + 1))?;
        books.push(Book {
            livro_id: idx as i64 + 1,
            livro: row.livro,
            autor: row.autor,
            idioma_original: row.idioma_original,
            ano_publicacao: row.ano_publicacao,
            vendas: row.vendas,
            genero: row.genero.filter(|s| !s.trim().is_empty()),
        });
    }

    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Book,Author(s),Original language,First published,Approximate sales in millions,Genre
The Hobbit,J. R. R. Tolkien,English,1937,100.5,Fantasy
\"Harry Potter and the Philosopher's Stone\",J. K. Rowling,English,1997,120,Fantasy
The Dream of the Red Chamber,Cao Xueqin,Chinese,1791,100,
";

    #[test]
    fn test_read_books_renames_columns() {
        let books = read_books(SAMPLE_CSV.as_bytes()).expect("Failed to read CSV");

        assert_eq!(books.len(), 3);
        assert_eq!(books[0].livro, "The Hobbit");
        assert_eq!(books[0].autor, "J. R. R. Tolkien");
        assert_eq!(books[0].idioma_original, "English");
        assert_eq!(books[0].ano_publicacao, 1937);
        assert_eq!(books[0].vendas, 100.5);
        assert_eq!(books[0].genero.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn test_read_books_assigns_one_based_row_ids() {
        let books = read_books(SAMPLE_CSV.as_bytes()).expect("Failed to read CSV");

        let ids: Vec<i64> = books.iter().map(|b| b.livro_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_books_quoted_title_with_apostrophe() {
        let books = read_books(SAMPLE_CSV.as_bytes()).expect("Failed to read CSV");

        assert_eq!(books[1].livro, "Harry Potter and the Philosopher's Stone");
    }

    #[test]
    fn test_read_books_empty_genre_is_missing() {
        let books = read_books(SAMPLE_CSV.as_bytes()).expect("Failed to read CSV");

        assert_eq!(books[2].genero, None);
    }

    #[test]
    fn test_read_books_malformed_year_is_an_error() {
        let csv = "\
Book,Author(s),Original language,First published,Approximate sales in millions,Genre
The Hobbit,J. R. R. Tolkien,English,nineteen-thirty-seven,100.5,Fantasy
";
        let result = read_books(csv.as_bytes());
        assert!(result.is_err());
    }
}
