use super::model::id::{Isbn, MemberId};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("a book with ISBN {0} already exists")]
    DuplicateIsbn(Isbn),

    #[error("a member with ID {0} already exists")]
    DuplicateMemberId(MemberId),

    #[error("book not found: {0}")]
    BookNotFound(Isbn),

    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("book {0} is already borrowed")]
    AlreadyBorrowed(Isbn),

    #[error("book {0} is not currently borrowed")]
    NotCurrentlyBorrowed(Isbn),

    #[error("book {isbn} was not borrowed by member {member_id}")]
    NotBorrowedByMember { member_id: MemberId, isbn: Isbn },
}
