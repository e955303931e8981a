use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{Isbn, MemberId};

/// 会員レコード。借用中の蔵書はISBNキーでのみ参照する（Book本体はCatalogが所有）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    member_id: MemberId,
    name: String,
    borrowed: Vec<Isbn>,
}

impl Member {
    pub fn new(member_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            member_id: MemberId::new(member_id),
            name: name.into(),
            borrowed: Vec::new(),
        }
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 借用中のISBN一覧（借りた順）。
    pub fn borrowed(&self) -> &[Isbn] {
        &self.borrowed
    }

    pub fn has_borrowed(&self, isbn: &Isbn) -> bool {
        self.borrowed.iter().any(|held| held == isbn)
    }

    pub(crate) fn record_borrow(&mut self, isbn: Isbn) {
        self.borrowed.push(isbn);
    }

    pub(crate) fn record_return(&mut self, isbn: &Isbn) {
        self.borrowed.retain(|held| held != isbn);
    }

    /// `keep`を満たさないISBNを借用リストから外し、外したものを返す。
    /// ファイル復元時の実在照合に使う。
    pub(crate) fn retain_known_borrowed(&mut self, keep: impl Fn(&Isbn) -> bool) -> Vec<Isbn> {
        let mut dropped = Vec::new();
        self.borrowed.retain(|isbn| {
            if keep(isbn) {
                true
            } else {
                dropped.push(isbn.clone());
                false
            }
        });
        dropped
    }

    /// 永続化行に変換する。列はタグ, 会員ID, 氏名, 借用ISBNの";"連結。
    /// 借用なしの4列目は空セルになる。ISBNに";"が現れない前提。
    pub fn to_row(&self) -> Vec<String> {
        let isbns = self
            .borrowed
            .iter()
            .map(Isbn::as_str)
            .collect::<Vec<_>>()
            .join(";");
        vec![
            "MEMBER".to_string(),
            self.member_id.to_string(),
            self.name.clone(),
            isbns,
        ]
    }

    /// 永続化行から復元する。タグ不一致・列数不足はNone。
    /// 借用ISBNはまだ実在照合されていない仮リストとして持つ。
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.first()?.as_str() != "MEMBER" || row.len() < 4 {
            return None;
        }
        let borrowed = if row[3].is_empty() {
            Vec::new()
        } else {
            row[3].split(';').map(Isbn::new).collect()
        };
        Some(Self {
            member_id: MemberId::new(row[1].as_str()),
            name: row[2].clone(),
            borrowed,
        })
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member ID: {}, Name: {}, Books Borrowed: {}",
            self.member_id,
            self.name,
            self.borrowed.len()
        )
    }
}
