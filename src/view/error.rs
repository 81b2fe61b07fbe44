use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The year selector offered a year the table does not contain.
    #[error("no World Cup final recorded for {year}")]
    YearNotFound { year: u16 },
}
