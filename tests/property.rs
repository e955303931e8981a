//! Property-based tests — codec round-trips and catalog invariants with proptest.

mod common;

use common::{isbn, member_id, standard_catalog, BOB, CAROL, CLEAN_CODE, COSMOS, DUNE};
use proptest::prelude::*;

use card_catalog::domain::model::book::Book;
use card_catalog::domain::model::member::Member;
use card_catalog::infra::csv::{decode_records, encode_record};

// =============================================================================
// Row strategies
// =============================================================================

/// 正規形の蔵書行。タグに応じて6列目（種別固有値）を持つ。
fn book_row() -> impl Strategy<Value = Vec<String>> {
    let kind = prop_oneof![
        Just(("BOOK".to_string(), String::new())),
        any::<String>().prop_map(|genre| ("FICTION_BOOK".to_string(), genre)),
        any::<String>().prop_map(|subject| ("NON_FICTION_BOOK".to_string(), subject)),
    ];
    let flag = prop_oneof![Just("true".to_string()), Just("false".to_string())];
    (kind, "[0-9A-Za-z-]{1,17}", any::<String>(), any::<String>(), flag).prop_map(
        |((tag, extra), isbn, title, author, flag)| vec![tag, isbn, title, author, flag, extra],
    )
}

/// 正規形の会員行。借用ISBNは";"連結（空リストは空セル）。
fn member_row() -> impl Strategy<Value = Vec<String>> {
    let isbns = prop::collection::vec("[0-9A-Za-z-]{1,17}", 0..4);
    ("[A-Z][0-9]{1,4}", any::<String>(), isbns).prop_map(|(id, name, isbns)| {
        vec!["MEMBER".to_string(), id, name, isbns.join(";")]
    })
}

// =============================================================================
// CSV codec round-trips
// =============================================================================

proptest! {
    /// 任意のセル列はエンコード→デコードで元に戻る。
    #[test]
    fn codec_round_trips_arbitrary_cells(
        records in prop::collection::vec(prop::collection::vec(any::<String>(), 2..6), 0..5)
    ) {
        let text: String = records.iter().map(|record| encode_record(record) + "\n").collect();
        prop_assert_eq!(decode_records(&text), records);
    }

    /// 蔵書行は from_row → to_row で恒等。
    #[test]
    fn book_row_round_trips(row in book_row()) {
        let book = Book::from_row(&row).unwrap();
        prop_assert_eq!(book.to_row(), row);
    }

    /// 会員行は from_row → to_row で恒等。
    #[test]
    fn member_row_round_trips(row in member_row()) {
        let member = Member::from_row(&row).unwrap();
        prop_assert_eq!(member.to_row(), row);
    }

    /// 蔵書行はファイルテキストを経由しても恒等。
    #[test]
    fn book_row_survives_file_encoding(row in book_row()) {
        let text = encode_record(&row) + "\n";
        let decoded = decode_records(&text);
        prop_assert_eq!(&decoded[0], &row);

        let book = Book::from_row(&decoded[0]).unwrap();
        prop_assert_eq!(book.to_row(), row);
    }
}

// =============================================================================
// Catalog invariants
// =============================================================================

proptest! {
    /// 貸出→返却でカタログは完全に元の状態へ戻る。
    #[test]
    fn borrow_then_return_restores_catalog(pick in 0..3usize, who in 0..2usize) {
        let isbns = [CLEAN_CODE, DUNE, COSMOS];
        let members = [BOB, CAROL];
        let mut catalog = standard_catalog();
        let before = catalog.clone();

        catalog.borrow_book(&member_id(members[who]), &isbn(isbns[pick])).unwrap();
        prop_assert_ne!(&catalog, &before);

        catalog.return_book(&member_id(members[who]), &isbn(isbns[pick])).unwrap();
        prop_assert_eq!(&catalog, &before);
    }

    /// 重複ISBNの追加は常に失敗し、カタログは増えない。
    #[test]
    fn duplicate_isbn_never_grows_catalog(pick in 0..3usize, title in "[A-Za-z ]{1,30}") {
        let isbns = [CLEAN_CODE, DUNE, COSMOS];
        let mut catalog = standard_catalog();

        let result = catalog.add_book(Book::new(title, "Author", isbns[pick]));
        prop_assert!(result.is_err());
        prop_assert_eq!(catalog.books().len(), 3);
    }

    /// どんな操作列の後でも、貸出フラグと借用リストは一対一に対応する。
    #[test]
    fn borrow_flag_matches_member_lists_after_any_ops(
        ops in prop::collection::vec((0..2u8, 0..2usize, 0..3usize), 0..25)
    ) {
        let isbns = [CLEAN_CODE, DUNE, COSMOS];
        let members = [BOB, CAROL];
        let mut catalog = standard_catalog();

        for (op, who, pick) in ops {
            let member = member_id(members[who]);
            let target = isbn(isbns[pick]);
            let _ = match op {
                0 => catalog.borrow_book(&member, &target),
                _ => catalog.return_book(&member, &target),
            };
        }

        for book in catalog.books() {
            let holders = catalog
                .members()
                .iter()
                .filter(|member| member.has_borrowed(book.isbn()))
                .count();
            prop_assert_eq!(holders, usize::from(book.is_borrowed()));
        }
    }
}
