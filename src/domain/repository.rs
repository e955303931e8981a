use super::model::book::Book;
use super::model::catalog::Catalog;
use super::model::member::Member;

/// 永続化ファイルから読み出した生レコード。
/// 会員の借用ISBNは未照合のまま（照合はCatalog::restoreが行う）。
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
}

/// 永続化の抽象。Infra層が実装する。
pub trait CatalogRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// ファイルを読む。ファイル自体が存在しなければOk(None)。
    fn load(&self) -> Result<Option<ParsedFile>, Self::Error>;

    /// カタログ全体を書き直す。
    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error>;
}
