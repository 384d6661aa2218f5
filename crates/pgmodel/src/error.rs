use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The catalog could not be reached, or authentication failed.
    #[error("could not connect to postgres: {0}")]
    Connect(#[source] tokio_postgres::Error),

    /// A catalog query failed, or a row could not be decoded.
    #[error("catalog query failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// The catalog returned rows that do not fit together.
    #[error("inconsistent catalog data: {0}")]
    Catalog(String),
}
