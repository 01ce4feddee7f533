//! Structural conversion errors. Any of these aborts the run.

use aidcards_model::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to open workbook {path}: {source}")]
    OpenWorkbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no sheet named `{sheet}`")]
    MissingSheet { path: String, sheet: String },

    #[error("failed to read sheet `{sheet}`: {source}")]
    ReadSheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet `{sheet}` is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),
}
