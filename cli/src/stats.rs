use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use livros_backend::csv_import;
use livros_backend::dimensions::DimensionTable;
use livros_backend::types::Book;

/// Print summary statistics for the source CSV: row count, missing genres,
/// distinct author/genre counts, and the most frequent authors.
pub fn stats(csv_path: &Path, top_authors: usize) -> Result<()> {
    let books = csv_import::load_books(csv_path)?;
    print_stats(&books, top_authors);
    Ok(())
}

fn print_stats(books: &[Book], top_authors: usize) {
    let missing_genre = books.iter().filter(|b| b.genero.is_none()).count();
    let autores = DimensionTable::from_values(books.iter().map(|b| b.autor.as_str()));
    let generos =
        DimensionTable::from_values(books.iter().filter_map(|b| b.genero.as_deref()));

    println!("{} rows", books.len());
    println!("{} rows with missing genre", missing_genre);
    println!("{} distinct authors", autores.len());
    println!("{} distinct genres", generos.len());
    println!();
    println!("Top {} authors by book count:", top_authors);
    for (autor, count) in author_counts(books).into_iter().take(top_authors) {
        println!("{:>5}  {}", count, autor);
    }
}

/// (author, count) pairs, most frequent first, ties by name.
fn author_counts(books: &[Book]) -> Vec<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for book in books {
        *counts.entry(book.autor.as_str()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(autor: &str, genero: Option<&str>) -> Book {
        Book {
            livro_id: 1,
            livro: "T".to_string(),
            autor: autor.to_string(),
            idioma_original: "English".to_string(),
            ano_publicacao: 2000,
            vendas: 10.0,
            genero: genero.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_author_counts_most_frequent_first() {
        let books = vec![
            book("J. K. Rowling", Some("Fantasy")),
            book("Agatha Christie", Some("Crime novel")),
            book("J. K. Rowling", Some("Fantasy")),
        ];

        let counts = author_counts(&books);

        assert_eq!(counts[0], ("J. K. Rowling", 2));
        assert_eq!(counts[1], ("Agatha Christie", 1));
    }

    #[test]
    fn test_author_counts_ties_sorted_by_name() {
        let books = vec![book("Zadie Smith", None), book("Agatha Christie", None)];

        let counts = author_counts(&books);

        assert_eq!(counts[0].0, "Agatha Christie");
        assert_eq!(counts[1].0, "Zadie Smith");
    }
}
