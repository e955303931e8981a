use std::fmt;

use serde::{Deserialize, Serialize};

use super::book::Book;
use super::id::{Isbn, MemberId};
use super::member::Member;
use crate::domain::error::DomainError;

/// ファイル復元時に検出した非致命的な整合性ギャップ。
/// エラーにはせず、警告として呼び出し側へ渡す。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoadWarning {
    /// 会員が参照するISBNが蔵書に存在しない。該当参照は借用リストから外される。
    UnknownBorrowedIsbn { member_id: MemberId, isbn: Isbn },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBorrowedIsbn { member_id, isbn } => write!(
                f,
                "member {member_id} references unknown ISBN {isbn}; reference dropped"
            ),
        }
    }
}

/// 蔵書と会員の全レコードを所有する集約。不変条件はすべてここで守る:
///
/// - ISBNと会員IDはそれぞれ重複しない
/// - 貸出フラグが立っている蔵書は、高々1人の会員の借用リストに載る
/// - 両コレクションとも挿入順を保つ（ファイルの行順 = 挿入順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    books: Vec<Book>,
    members: Vec<Member>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルから読んだ生レコード群を集約に組み立てる。
    /// 会員の仮借用リストを蔵書と照合し、解決できない参照は警告付きで落とす。
    pub fn restore(books: Vec<Book>, mut members: Vec<Member>) -> (Self, Vec<LoadWarning>) {
        let known = |isbn: &Isbn| books.iter().any(|book| book.isbn() == isbn);
        let mut warnings = Vec::new();
        for member in &mut members {
            for isbn in member.retain_known_borrowed(known) {
                warnings.push(LoadWarning::UnknownBorrowedIsbn {
                    member_id: member.member_id().clone(),
                    isbn,
                });
            }
        }
        (Self { books, members }, warnings)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.members.is_empty()
    }

    /// ISBN完全一致で蔵書を引く。
    pub fn find_book(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn() == isbn)
    }

    /// 会員ID完全一致で会員を引く。
    pub fn find_member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members
            .iter()
            .find(|member| member.member_id() == member_id)
    }

    /// 蔵書を追加する。既存ISBNとの重複は拒否。
    pub fn add_book(&mut self, book: Book) -> Result<(), DomainError> {
        if self.find_book(book.isbn()).is_some() {
            return Err(DomainError::DuplicateIsbn(book.isbn().clone()));
        }
        self.books.push(book);
        Ok(())
    }

    /// 会員を登録する。既存IDとの重複は拒否。
    pub fn add_member(&mut self, member: Member) -> Result<(), DomainError> {
        if self.find_member(member.member_id()).is_some() {
            return Err(DomainError::DuplicateMemberId(member.member_id().clone()));
        }
        self.members.push(member);
        Ok(())
    }

    /// 貸出。失敗条件は記載順に検査し、最初に成立した1つだけを返す:
    /// 会員不在 → 蔵書不在 → 貸出中 → 当人リストに既載。
    pub fn borrow_book(&mut self, member_id: &MemberId, isbn: &Isbn) -> Result<(), DomainError> {
        let member = self
            .find_member(member_id)
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?;
        let already_listed = member.has_borrowed(isbn);
        let book = self
            .find_book(isbn)
            .ok_or_else(|| DomainError::BookNotFound(isbn.clone()))?;
        if book.is_borrowed() {
            return Err(DomainError::AlreadyBorrowed(isbn.clone()));
        }
        // 貸出フラグ不変条件が保たれている限り、ここが成立することはない
        if already_listed {
            return Err(DomainError::AlreadyBorrowed(isbn.clone()));
        }

        self.find_book_mut(isbn)
            .ok_or_else(|| DomainError::BookNotFound(isbn.clone()))?
            .set_borrowed(true);
        self.find_member_mut(member_id)
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?
            .record_borrow(isbn.clone());
        Ok(())
    }

    /// 返却。失敗条件は記載順に検査する:
    /// 会員不在 → 蔵書不在 → 未貸出 → 当人の借用ではない。
    pub fn return_book(&mut self, member_id: &MemberId, isbn: &Isbn) -> Result<(), DomainError> {
        let member = self
            .find_member(member_id)
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?;
        let held_by_member = member.has_borrowed(isbn);
        let book = self
            .find_book(isbn)
            .ok_or_else(|| DomainError::BookNotFound(isbn.clone()))?;
        if !book.is_borrowed() {
            return Err(DomainError::NotCurrentlyBorrowed(isbn.clone()));
        }
        if !held_by_member {
            return Err(DomainError::NotBorrowedByMember {
                member_id: member_id.clone(),
                isbn: isbn.clone(),
            });
        }

        self.find_book_mut(isbn)
            .ok_or_else(|| DomainError::BookNotFound(isbn.clone()))?
            .set_borrowed(false);
        self.find_member_mut(member_id)
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()))?
            .record_return(isbn);
        Ok(())
    }

    // --- Private helpers ---

    fn find_book_mut(&mut self, isbn: &Isbn) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.isbn() == isbn)
    }

    fn find_member_mut(&mut self, member_id: &MemberId) -> Option<&mut Member> {
        self.members
            .iter_mut()
            .find(|member| member.member_id() == member_id)
    }
}
