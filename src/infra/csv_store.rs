use std::path::{Path, PathBuf};

use crate::domain::model::book::Book;
use crate::domain::model::catalog::Catalog;
use crate::domain::model::member::Member;
use crate::domain::repository::{CatalogRepository, ParsedFile};

use super::csv;

/// データファイル先頭の見出し行。読み込み時は位置だけで読み飛ばし、内容は照合しない。
pub const HEADER: [&str; 6] = [
    "TYPE",
    "ID/ISBN",
    "TITLE/NAME",
    "AUTHOR/BORROWED_ISBNs",
    "IS_BORROWED",
    "GENRE",
];

#[derive(Debug, thiserror::Error)]
pub enum CsvStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// CSVファイルによるCatalogRepository実装。
/// 1カタログ = 1ファイル。保存は毎回ヘッダごと全行書き直す。
pub struct CsvCatalogRepository {
    path: PathBuf,
}

impl CsvCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for CsvCatalogRepository {
    type Error = CsvStoreError;

    fn load(&self) -> Result<Option<ParsedFile>, Self::Error> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;

        let mut parsed = ParsedFile::default();
        // 先頭レコードは見出しとして読み飛ばす。空ファイルはレコード0件。
        for record in csv::decode_records(&content).into_iter().skip(1) {
            if let Some(book) = Book::from_row(&record) {
                parsed.books.push(book);
            } else if let Some(member) = Member::from_row(&record) {
                parsed.members.push(member);
            }
            // タグ不明・列数不足の行は黙って読み飛ばす
        }
        Ok(Some(parsed))
    }

    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error> {
        let mut content = String::new();
        content.push_str(&csv::encode_record(&HEADER.map(String::from)));
        content.push('\n');
        for book in catalog.books() {
            content.push_str(&csv::encode_record(&book.to_row()));
            content.push('\n');
        }
        for member in catalog.members() {
            content.push_str(&csv::encode_record(&member.to_row()));
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
