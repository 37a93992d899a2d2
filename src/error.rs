use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElectionError {
    #[error("{dataset} dataset: no {role} column found (headers: {headers})")]
    MissingColumn {
        dataset: String,
        role: &'static str,
        headers: String,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ElectionError>;
