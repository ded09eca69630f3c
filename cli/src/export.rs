use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};

use livros_backend::dimensions::DimensionTable;
use livros_backend::translate::{GoogleTranslator, Translator};
use livros_backend::types::Comment;
use livros_backend::{TARGET_LANG, get_create_output_dir, logger};
use livros_backend::{comments, csv_import, dimensions, sql_export, translate};

pub struct ExportConfig {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub comments_url: String,
    pub skip_comments: bool,
}

/// Run the full pipeline against the live translation service and the
/// remote comments source.
pub fn export(config: &ExportConfig) -> Result<()> {
    let translator = GoogleTranslator::new(TARGET_LANG)?;

    let comments = if config.skip_comments {
        None
    } else {
        logger::info(&format!("Fetching comments from {}", config.comments_url));
        Some(comments::fetch_comments(&config.comments_url)?)
    };

    run_pipeline(config, &translator, comments)
}

/// Pipeline stages, with the translation capability and the comment data
/// passed in so tests can substitute a stub translator and local fixtures.
///
/// Each stage takes its tables as arguments and returns the next ones;
/// nothing is shared through process-wide state.
pub fn run_pipeline(
    config: &ExportConfig,
    translator: &dyn Translator,
    comments: Option<Vec<Comment>>,
) -> Result<()> {
    logger::info("=== export() ===");

    let start_time: DateTime<Local> = Local::now();

    let output_dir = get_create_output_dir(&config.output_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create output directory: {}", e))?;

    logger::info("=== Loading books CSV ===");
    let books = csv_import::load_books(&config.csv_path)?;
    logger::info(&format!(
        "Loaded {} book rows from {}",
        books.len(),
        config.csv_path.display()
    ));

    logger::info("=== Assigning author and genre ids ===");
    let (livros, autores, generos) = dimensions::attach_dimension_keys(books)?;
    logger::info(&format!(
        "{} distinct authors, {} distinct genres",
        autores.len(),
        generos.len()
    ));

    logger::info("=== Translating genres ===");
    let nomes_pt = translate_genres_with_progress(&generos, translator)?;

    logger::info("=== Writing SQL files ===");
    sql_export::write_autores(&output_dir.join(sql_export::AUTORES_SQL), &autores)?;
    sql_export::write_generos(&output_dir.join(sql_export::GENEROS_SQL), &nomes_pt)?;
    sql_export::write_livros(&output_dir.join(sql_export::LIVROS_SQL), &livros)?;

    if let Some(comments) = comments {
        let linked = comments::link_comments_to_books(comments, &livros);
        let unmatched = linked.iter().filter(|c| c.livro_id.is_none()).count();
        if unmatched > 0 {
            logger::warn(&format!(
                "{} of {} comments matched no book title",
                unmatched,
                linked.len()
            ));
        }
        sql_export::write_comentarios(&output_dir.join(sql_export::COMENTARIOS_SQL), &linked)?;
    } else {
        logger::warn("Skipping comments, comentarios.sql not written");
    }

    let end_time = Local::now();
    logger::info(&format!(
        "Export completed in {}, SQL files written to {}",
        format_duration(end_time - start_time),
        output_dir.display()
    ));

    Ok(())
}

// One service call per distinct genre, so the bar length is the genre
// cardinality, not the dataset size.
fn translate_genres_with_progress(
    generos: &DimensionTable,
    translator: &dyn Translator,
) -> Result<Vec<String>> {
    let pb = ProgressBar::new(generos.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut nomes_pt = Vec::with_capacity(generos.len());
    for nome in generos.names() {
        pb.set_message(format!("Translating {}", nome));
        let nome_pt = translate::translate_genre_label(nome, translator)
            .with_context(|| format!("Failed to translate genre: {}", nome))?;
        nomes_pt.push(nome_pt);
        pb.inc(1);
    }
    pb.finish_with_message(format!("Translated {} genres", generos.len()));

    Ok(nomes_pt)
}

fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(0)), "0:00:00");
        assert_eq!(format_duration(chrono::Duration::seconds(75)), "0:01:15");
        assert_eq!(format_duration(chrono::Duration::seconds(3661)), "1:01:01");
    }
}
