use crate::domain::error::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to read catalog data: {0}")]
    ReadFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 書き込み失敗。メモリ上の変更は巻き戻されない。
    #[error("failed to write catalog data: {0}")]
    WriteFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}
