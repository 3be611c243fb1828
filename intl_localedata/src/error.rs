use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleDataError {
    #[error("no compiled data for locale {0:?}")]
    UnknownLocale(String),
    #[error("malformed locale data: {0}")]
    MalformedData(String),
    #[error("missing key at path {0:?}")]
    Missing(Vec<String>),
    #[error("io error loading locale data: {0}")]
    Io(String),
    #[error("could not decode locale data json: {0}")]
    Json(String),
}

impl From<std::io::Error> for LocaleDataError {
    fn from(e: std::io::Error) -> Self {
        LocaleDataError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for LocaleDataError {
    fn from(e: serde_json::Error) -> Self {
        LocaleDataError::Json(e.to_string())
    }
}
