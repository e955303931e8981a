//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use card_catalog::application::service::CatalogService;
use card_catalog::domain::model::book::Book;
use card_catalog::domain::model::catalog::Catalog;
use card_catalog::domain::model::id::{Isbn, MemberId};
use card_catalog::domain::model::member::Member;
use card_catalog::domain::repository::{CatalogRepository, ParsedFile};

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。保存状態はJSON文字列で持つ。
/// Cloneはハンドルの複製で、保存状態は共有される。
#[derive(Clone)]
pub struct InMemoryRepo {
    inner: Rc<RepoState>,
}

struct RepoState {
    store: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RepoState {
                store: RefCell::new(None),
                fail_saves: Cell::new(false),
            }),
        }
    }

    /// 以後のsaveをすべて失敗させる。書き込み失敗系のテスト用。
    pub fn fail_saves(&self) {
        self.inner.fail_saves.set(true);
    }

    /// 最後に保存されたカタログ。未保存ならNone。
    pub fn stored(&self) -> Option<Catalog> {
        self.inner
            .store
            .borrow()
            .as_ref()
            .map(|json| serde_json::from_str(json).unwrap())
    }
}

impl CatalogRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<ParsedFile>, Self::Error> {
        let store = self.inner.store.borrow();
        match store.as_ref() {
            Some(json) => {
                let catalog: Catalog = serde_json::from_str(json).unwrap();
                Ok(Some(ParsedFile {
                    books: catalog.books().to_vec(),
                    members: catalog.members().to_vec(),
                }))
            }
            None => Ok(None),
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<(), Self::Error> {
        if self.inner.fail_saves.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(catalog).unwrap();
        *self.inner.store.borrow_mut() = Some(json);
        Ok(())
    }
}

// =============================================================================
// Standard catalog — 構造化済みテスト用カタログ
// =============================================================================

pub const CLEAN_CODE: &str = "978-0132350884";
pub const DUNE: &str = "978-0441172719";
pub const COSMOS: &str = "978-0345539434";
pub const BOB: &str = "M001";
pub const CAROL: &str = "M002";

pub fn isbn(s: &str) -> Isbn {
    Isbn::new(s)
}

pub fn member_id(s: &str) -> MemberId {
    MemberId::new(s)
}

/// 標準的なテスト用カタログ:
/// ```text
/// BOOK             Clean Code (978-0132350884)
/// FICTION_BOOK     Dune (978-0441172719, Science Fiction)
/// NON_FICTION_BOOK Cosmos (978-0345539434, Astronomy)
/// MEMBER           M001 Bob Johnson / M002 Carol White
/// ```
pub fn standard_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .add_book(Book::new("Clean Code", "Robert C. Martin", CLEAN_CODE))
        .unwrap();
    catalog
        .add_book(Book::fiction("Dune", "Frank Herbert", DUNE, "Science Fiction"))
        .unwrap();
    catalog
        .add_book(Book::non_fiction("Cosmos", "Carl Sagan", COSMOS, "Astronomy"))
        .unwrap();
    catalog.add_member(Member::new(BOB, "Bob Johnson")).unwrap();
    catalog.add_member(Member::new(CAROL, "Carol White")).unwrap();
    catalog
}

/// カタログをInMemoryRepoへ保存した上でServiceを開く。
/// 保存状態を覗くためのリポジトリハンドルも返す。
pub fn open_with_catalog(catalog: &Catalog) -> (CatalogService<InMemoryRepo>, InMemoryRepo) {
    let repo = InMemoryRepo::new();
    repo.save(catalog).unwrap();
    let handle = repo.clone();
    let (service, _report) = CatalogService::open(repo);
    (service, handle)
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
#[allow(dead_code)]
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
