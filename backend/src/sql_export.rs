use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::dimensions::DimensionTable;
use crate::types::{CleanedBook, LinkedComment};

pub const AUTORES_SQL: &str = "autores.sql";
pub const GENEROS_SQL: &str = "generos.sql";
pub const LIVROS_SQL: &str = "livros.sql";
pub const COMENTARIOS_SQL: &str = "comentarios.sql";

/// Wrap a string in single quotes, doubling any embedded single quote.
pub fn sql_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// An absent id becomes the bare NULL token.
pub fn sql_nullable_id(id: Option<i64>) -> String {
    match id {
        Some(n) => n.to_string(),
        None => "NULL".to_string(),
    }
}

// Truncate mode: re-running the export overwrites prior output.
fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// One INSERT per distinct author, in dimension order.
pub fn write_autores(path: &Path, autores: &DimensionTable) -> Result<()> {
    let mut out = create_output(path)?;
    for nome in autores.names() {
        writeln!(out, "INSERT INTO autores (nome) VALUES ({});", sql_str(nome))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One INSERT per distinct genre, translated and lowercased labels.
pub fn write_generos(path: &Path, nomes_pt: &[String]) -> Result<()> {
    let mut out = create_output(path)?;
    for nome in nomes_pt {
        writeln!(out, "INSERT INTO generos (nome) VALUES ({});", sql_str(nome))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One INSERT per book row. Years are plain integers, sales are formatted
/// to two decimal places.
pub fn write_livros(path: &Path, livros: &[CleanedBook]) -> Result<()> {
    let mut out = create_output(path)?;
    for livro in livros {
        writeln!(
            out,
            "INSERT INTO livros (nome, idioma, ano_publicacao, vendas, autor_id, genero_id) VALUES ({}, {}, {}, {:.2}, {}, {});",
            sql_str(&livro.livro),
            sql_str(&livro.idioma_original),
            livro.ano_publicacao,
            livro.vendas,
            livro.autor_id,
            livro.genero_id,
        )?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One INSERT per comment row. An unmatched book reference is emitted as
/// NULL.
pub fn write_comentarios(path: &Path, comentarios: &[LinkedComment]) -> Result<()> {
    let mut out = create_output(path)?;
    for c in comentarios {
        writeln!(
            out,
            "INSERT INTO comentarios (livro_id, nome, sobrenome, comentario) VALUES ({}, {}, {}, {});",
            sql_nullable_id(c.livro_id),
            sql_str(&c.nome),
            sql_str(&c.sobrenome),
            sql_str(&c.comentario),
        )?;
    }
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
