use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::Isbn;

/// 蔵書の種別。永続化行では先頭セルのタグとして明示する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookKind {
    Plain,
    Fiction { genre: String },
    NonFiction { subject_area: String },
}

impl BookKind {
    /// 永続化行のタグ文字列。
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Plain => "BOOK",
            Self::Fiction { .. } => "FICTION_BOOK",
            Self::NonFiction { .. } => "NON_FICTION_BOOK",
        }
    }
}

/// 蔵書レコード。Catalogが所有し、貸出フラグの変更もCatalog経由で行う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    is_borrowed: bool,
    kind: BookKind,
}

impl Book {
    /// 一般書。貸出フラグは落ちた状態で始まる。
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self::with_kind(title, author, isbn, BookKind::Plain)
    }

    /// 小説（ジャンル付き）。
    pub fn fiction(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::Fiction {
                genre: genre.into(),
            },
        )
    }

    /// ノンフィクション（主題分野付き）。
    pub fn non_fiction(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        subject_area: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            title,
            author,
            isbn,
            BookKind::NonFiction {
                subject_area: subject_area.into(),
            },
        )
    }

    fn with_kind(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        kind: BookKind,
    ) -> Self {
        Self {
            isbn: Isbn::new(isbn),
            title: title.into(),
            author: author.into(),
            is_borrowed: false,
            kind,
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn is_borrowed(&self) -> bool {
        self.is_borrowed
    }

    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    pub(crate) fn set_borrowed(&mut self, borrowed: bool) {
        self.is_borrowed = borrowed;
    }

    /// 永続化行に変換する。列はタグ, ISBN, タイトル, 著者, 貸出フラグ, 種別固有値。
    /// 一般書の6列目は空セルになる。
    pub fn to_row(&self) -> Vec<String> {
        let extra = match &self.kind {
            BookKind::Plain => String::new(),
            BookKind::Fiction { genre } => genre.clone(),
            BookKind::NonFiction { subject_area } => subject_area.clone(),
        };
        vec![
            self.kind.tag().to_string(),
            self.isbn.to_string(),
            self.title.clone(),
            self.author.clone(),
            self.is_borrowed.to_string(),
            extra,
        ]
    }

    /// 永続化行から復元する。タグ不一致・列数不足はNone（その行は読み飛ばされる）。
    /// 貸出フラグは大文字小文字を区別せず、"true"以外はすべて未貸出扱い。
    pub fn from_row(row: &[String]) -> Option<Self> {
        let kind = match row.first()?.as_str() {
            "BOOK" if row.len() >= 5 => BookKind::Plain,
            "FICTION_BOOK" if row.len() >= 6 => BookKind::Fiction {
                genre: row[5].clone(),
            },
            "NON_FICTION_BOOK" if row.len() >= 6 => BookKind::NonFiction {
                subject_area: row[5].clone(),
            },
            _ => return None,
        };
        Some(Self {
            isbn: Isbn::new(row[1].as_str()),
            title: row[2].clone(),
            author: row[3].clone(),
            is_borrowed: row[4].eq_ignore_ascii_case("true"),
            kind,
        })
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_borrowed {
            "Borrowed"
        } else {
            "Available"
        };
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Status: {}",
            self.title, self.author, self.isbn, status
        )?;
        match &self.kind {
            BookKind::Plain => Ok(()),
            BookKind::Fiction { genre } => write!(f, ", Genre: {genre}"),
            BookKind::NonFiction { subject_area } => write!(f, ", Subject Area: {subject_area}"),
        }
    }
}
