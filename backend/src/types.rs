use serde::Deserialize;

/// A book row loaded from the source CSV.
///
/// `livro_id` is a generated 1-based surrogate id assigned from the row's
/// position at load time, so later stages never depend on array position.
#[derive(Debug, Clone)]
pub struct Book {
    pub livro_id: i64,
    pub livro: String,
    pub autor: String,
    pub idioma_original: String,
    pub ano_publicacao: i32,
    pub vendas: f64,
    /// None when the source field is empty. Replaced with the "Unknown"
    /// sentinel before dimension extraction.
    pub genero: Option<String>,
}

/// A book row after genre sentinel-fill and dimension key assignment.
#[derive(Debug, Clone)]
pub struct CleanedBook {
    pub livro_id: i64,
    pub livro: String,
    pub autor: String,
    pub idioma_original: String,
    pub ano_publicacao: i32,
    pub vendas: f64,
    pub genero: String,
    pub autor_id: i64,
    pub genero_id: i64,
}

/// A comment record from the remote JSON dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Book title, the join key against the books table.
    pub livro: String,
    pub nome: String,
    pub sobrenome: String,
    pub comentario: String,
}

/// A comment with its book reference resolved by title.
#[derive(Debug, Clone)]
pub struct LinkedComment {
    /// None when the title matched no loaded book.
    pub livro_id: Option<i64>,
    pub nome: String,
    pub sobrenome: String,
    pub comentario: String,
}
