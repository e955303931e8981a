use serde::Serialize;

use crate::domain::model::book::Book;
use crate::domain::model::catalog::{Catalog, LoadWarning};
use crate::domain::model::id::{Isbn, MemberId};
use crate::domain::model::member::Member;
use crate::domain::repository::CatalogRepository;

use super::error::LibraryError;

/// 起動時読み込みの結果。シェルがそのまま表示できる形で返す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    /// 解決できなかった借用参照など、致命的でない整合性ギャップ。
    pub warnings: Vec<LoadWarning>,
}

/// カタログがどう初期化されたか。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoadOutcome {
    /// 既存ファイルを読み込んだ。件数は照合前の生レコード数。
    Loaded { books: usize, members: usize },
    /// ファイルが無かったので空で開始し、見出しのみの新規ファイルを書いた。
    StartedFresh,
    /// ファイルは無く、新規ファイルの書き込みにも失敗した。空のまま続行する。
    FreshWriteFailed { message: String },
    /// 読み込みに失敗した。カタログは空のまま（中途半端な状態は作らない）。
    ReadFailed { message: String },
}

/// 貸出・返却成功の確認表示に使う要約。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSummary {
    pub book_title: String,
    pub member_name: String,
}

/// カタログ操作のユースケース境界。
/// 起動時に一度読み込んだCatalogをメモリに保持し、変更が成立するたびに
/// ファイル全体を書き戻す。
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
    catalog: Catalog,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// 永続化状態からサービスを組み立てる。読み書きに失敗しても
    /// パニックせず、経緯をLoadReportとして返して空カタログで続行する。
    pub fn open(repo: R) -> (Self, LoadReport) {
        let loaded = repo
            .load()
            .map_err(|e| LibraryError::ReadFailure(Box::new(e)));
        match loaded {
            Ok(Some(parsed)) => {
                let books = parsed.books.len();
                let members = parsed.members.len();
                let (catalog, warnings) = Catalog::restore(parsed.books, parsed.members);
                let report = LoadReport {
                    outcome: LoadOutcome::Loaded { books, members },
                    warnings,
                };
                (Self { repo, catalog }, report)
            }
            Ok(None) => {
                let catalog = Catalog::new();
                // 空カタログの保存 = 見出しのみの新規ファイル作成
                let outcome = match repo
                    .save(&catalog)
                    .map_err(|e| LibraryError::WriteFailure(Box::new(e)))
                {
                    Ok(()) => LoadOutcome::StartedFresh,
                    Err(e) => LoadOutcome::FreshWriteFailed {
                        message: e.to_string(),
                    },
                };
                let report = LoadReport {
                    outcome,
                    warnings: Vec::new(),
                };
                (Self { repo, catalog }, report)
            }
            Err(e) => {
                let report = LoadReport {
                    outcome: LoadOutcome::ReadFailed {
                        message: e.to_string(),
                    },
                    warnings: Vec::new(),
                };
                (
                    Self {
                        repo,
                        catalog: Catalog::new(),
                    },
                    report,
                )
            }
        }
    }

    /// 蔵書を追加して保存する。
    pub fn add_book(&mut self, book: Book) -> Result<(), LibraryError> {
        self.catalog.add_book(book)?;
        self.persist()
    }

    /// 会員を登録して保存する。
    pub fn add_member(&mut self, member: Member) -> Result<(), LibraryError> {
        self.catalog.add_member(member)?;
        self.persist()
    }

    /// 貸出。成功時は確認表示用の要約を返す。
    /// 保存に失敗した場合でもメモリ上の貸出は成立したまま残る。
    pub fn borrow_book(
        &mut self,
        member_id: &MemberId,
        isbn: &Isbn,
    ) -> Result<LoanSummary, LibraryError> {
        self.catalog.borrow_book(member_id, isbn)?;
        let summary = self.loan_summary(member_id, isbn);
        self.persist()?;
        Ok(summary)
    }

    /// 返却。保存失敗時の挙動はborrow_bookと同じ。
    pub fn return_book(
        &mut self,
        member_id: &MemberId,
        isbn: &Isbn,
    ) -> Result<LoanSummary, LibraryError> {
        self.catalog.return_book(member_id, isbn)?;
        let summary = self.loan_summary(member_id, isbn);
        self.persist()?;
        Ok(summary)
    }

    pub fn find_book(&self, isbn: &Isbn) -> Option<&Book> {
        self.catalog.find_book(isbn)
    }

    pub fn find_member(&self, member_id: &MemberId) -> Option<&Member> {
        self.catalog.find_member(member_id)
    }

    /// 挿入順の読み取り専用ビュー。
    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn members(&self) -> &[Member] {
        self.catalog.members()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    // --- private ---

    fn loan_summary(&self, member_id: &MemberId, isbn: &Isbn) -> LoanSummary {
        // 直前の操作が成功しているので両者は必ず存在する
        LoanSummary {
            book_title: self
                .find_book(isbn)
                .map(|book| book.title().to_string())
                .unwrap_or_default(),
            member_name: self
                .find_member(member_id)
                .map(|member| member.name().to_string())
                .unwrap_or_default(),
        }
    }

    fn persist(&self) -> Result<(), LibraryError> {
        self.repo
            .save(&self.catalog)
            .map_err(|e| LibraryError::WriteFailure(Box::new(e)))
    }
}
