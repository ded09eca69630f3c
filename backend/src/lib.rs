pub mod logger;
pub mod types;
pub mod csv_import;
pub mod dimensions;
pub mod translate;
pub mod comments;
pub mod sql_export;

use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Default input CSV path, relative to the working directory.
pub static DEFAULT_CSV_PATH: &str = "livros.csv";

/// Remote JSON source for the book comments dataset.
pub static COMENTARIOS_URL: &str =
    "https://raw.githubusercontent.com/guilhermeonrails/datas-csv/refs/heads/main/comentarios.json";

/// Target language for genre translation.
pub static TARGET_LANG: &str = "pt";

pub fn get_create_output_dir(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if !dir.exists() {
        create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}
