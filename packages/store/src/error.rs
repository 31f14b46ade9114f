use thiserror::Error;

/// Failures raised by local state handling (never by the network).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv export produced invalid utf-8")]
    CsvEncoding,

    #[error("session storage unavailable: {0}")]
    Storage(String),

    #[error("required field missing: {0}")]
    MissingField(String),

    #[error("no records selected")]
    EmptySelection,

    #[error("an order needs at least one item")]
    EmptyOrder,

    #[error("order line {0} has no item")]
    BlankLine(usize),
}
