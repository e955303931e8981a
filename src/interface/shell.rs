//! Interactive shell for card-catalog
//!
//! stdin/stdout menu loop <-> application::CatalogService
//!
//! 9 commands: add book, add member, borrow, return, 4x display, exit

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::application::error::LibraryError;
use crate::application::service::{CatalogService, LoadOutcome, LoadReport};
use crate::domain::model::book::Book;
use crate::domain::model::id::{Isbn, MemberId};
use crate::domain::model::member::Member;
use crate::infra::csv_store::CsvCatalogRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// 対話シェルを起動する。data_pathは永続化ファイル。
pub fn run(data_path: PathBuf) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    // 司書名は挨拶表示にだけ使い、永続化はしない。EOFなら既定名で続行。
    let name = prompt(&mut input, "Enter your name: ")?.unwrap_or_else(|| "Admin".to_string());

    let repo = CsvCatalogRepository::new(&data_path);
    let (mut service, report) = CatalogService::open(repo);
    render_load_report(&report, &data_path);
    println!("\n{}", librarian_greeting(&name));

    if service.is_empty() {
        seed_demo_data(&mut service);
    }

    println!("\n--- Current Books ---");
    print_books(&service);
    println!("\n--- Current Members ---");
    print_members(&service);

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter your choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_book_command(&mut service, &mut input)?,
            "2" => add_member_command(&mut service, &mut input)?,
            "3" => borrow_command(&mut service, &mut input)?,
            "4" => return_command(&mut service, &mut input)?,
            "5" => print_books(&service),
            "6" => print_members(&service),
            "7" => print_borrowed(&service),
            "8" => print_state(&service),
            "9" => {
                println!("Exiting the Library Management System. Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

// =============================================================================
// Commands
// =============================================================================

type Input<'a> = dyn Iterator<Item = io::Result<String>> + 'a;

fn add_book_command(
    service: &mut CatalogService<CsvCatalogRepository>,
    input: &mut Input<'_>,
) -> anyhow::Result<()> {
    let Some(title) = prompt(input, "Enter book title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, "Enter book author: ")? else {
        return Ok(());
    };
    let Some(isbn) = prompt(input, "Enter book ISBN: ")? else {
        return Ok(());
    };
    let Some(kind) = prompt(input, "Enter book type (book/fiction/nonfiction): ")? else {
        return Ok(());
    };

    let book = match kind.to_lowercase().as_str() {
        "" | "book" => Book::new(title, author, isbn),
        "fiction" => {
            let Some(genre) = prompt(input, "Enter genre: ")? else {
                return Ok(());
            };
            Book::fiction(title, author, isbn, genre)
        }
        "nonfiction" => {
            let Some(subject_area) = prompt(input, "Enter subject area: ")? else {
                return Ok(());
            };
            Book::non_fiction(title, author, isbn, subject_area)
        }
        other => {
            println!("Unknown book type '{other}'. Book not added.");
            return Ok(());
        }
    };

    let title = book.title().to_string();
    match service.add_book(book) {
        Ok(()) => println!("Book '{title}' added to the library."),
        Err(e) => println!("{}", failure_line("adding book", &e)),
    }
    Ok(())
}

fn add_member_command(
    service: &mut CatalogService<CsvCatalogRepository>,
    input: &mut Input<'_>,
) -> anyhow::Result<()> {
    let Some(member_id) = prompt(input, "Enter member ID: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Enter member name: ")? else {
        return Ok(());
    };

    let member = Member::new(member_id, name);
    let name = member.name().to_string();
    match service.add_member(member) {
        Ok(()) => println!("Member '{name}' added to the library."),
        Err(e) => println!("{}", failure_line("adding member", &e)),
    }
    Ok(())
}

fn borrow_command(
    service: &mut CatalogService<CsvCatalogRepository>,
    input: &mut Input<'_>,
) -> anyhow::Result<()> {
    let Some(member_id) = prompt(input, "Enter member ID: ")? else {
        return Ok(());
    };
    let Some(isbn) = prompt(input, "Enter book ISBN: ")? else {
        return Ok(());
    };

    match service.borrow_book(&MemberId::new(member_id), &Isbn::new(isbn)) {
        Ok(summary) => println!(
            "'{}' borrowed by {}.",
            summary.book_title, summary.member_name
        ),
        Err(e) => println!("{}", loan_failure_line("borrowing book", &e)),
    }
    Ok(())
}

fn return_command(
    service: &mut CatalogService<CsvCatalogRepository>,
    input: &mut Input<'_>,
) -> anyhow::Result<()> {
    let Some(member_id) = prompt(input, "Enter member ID: ")? else {
        return Ok(());
    };
    let Some(isbn) = prompt(input, "Enter book ISBN: ")? else {
        return Ok(());
    };

    match service.return_book(&MemberId::new(member_id), &Isbn::new(isbn)) {
        Ok(summary) => println!(
            "'{}' returned by {}.",
            summary.book_title, summary.member_name
        ),
        Err(e) => println!("{}", loan_failure_line("returning book", &e)),
    }
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn render_load_report(report: &LoadReport, path: &Path) {
    match &report.outcome {
        LoadOutcome::Loaded { books, members } => println!(
            "Loaded {books} book record(s) and {members} member record(s) from '{}'.",
            path.display()
        ),
        LoadOutcome::StartedFresh => println!(
            "'{}' not found. Starting with empty library.",
            path.display()
        ),
        LoadOutcome::FreshWriteFailed { message } => println!(
            "Warning: could not create '{}': {message}",
            path.display()
        ),
        LoadOutcome::ReadFailed { message } => {
            println!("Warning: {message}. Starting with empty library.");
        }
    }
    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
}

/// 司書の挨拶行。司書IDは固定で、永続化もしない。
fn librarian_greeting(name: &str) -> String {
    format!("Librarian ID: L001, Name: {name}")
}

/// 操作名を冠した失敗表示行。
fn failure_line(operation: &str, e: &LibraryError) -> String {
    format!("Error {operation}: {e}")
}

/// 貸出・返却の失敗表示行。入力の確認を促す定型文を添える。
fn loan_failure_line(operation: &str, e: &LibraryError) -> String {
    format!(
        "{}. Please check the details and try again.",
        failure_line(operation, e)
    )
}

fn print_menu() {
    println!("\n--- Library Management System ---");
    println!("1. Add Book");
    println!("2. Add Member");
    println!("3. Borrow Book");
    println!("4. Return Book");
    println!("5. Display Books");
    println!("6. Display Members");
    println!("7. Display Current Borrowed Books");
    println!("8. Display Current Library State");
    println!("9. Exit");
}

fn print_books(service: &CatalogService<CsvCatalogRepository>) {
    if service.books().is_empty() {
        println!("No books in the library.");
    }
    for book in service.books() {
        println!("{book}");
    }
}

fn print_members(service: &CatalogService<CsvCatalogRepository>) {
    if service.members().is_empty() {
        println!("No members registered.");
    }
    for member in service.members() {
        println!("{member}");
    }
}

fn print_borrowed(service: &CatalogService<CsvCatalogRepository>) {
    for member in service.members() {
        if member.borrowed().is_empty() {
            println!(
                "Member {} (ID: {}) has not borrowed any books.",
                member.name(),
                member.member_id()
            );
        } else {
            println!(
                "Member {} (ID: {}) has borrowed the following books:",
                member.name(),
                member.member_id()
            );
            for isbn in member.borrowed() {
                let title = service.find_book(isbn).map(Book::title).unwrap_or("?");
                println!("- {title} (ISBN: {isbn})");
            }
        }
    }
}

fn print_state(service: &CatalogService<CsvCatalogRepository>) {
    println!("\n--- Current Library State ---");
    println!("Books:");
    print_books(service);
    println!("\nMembers:");
    print_members(service);
}

// =============================================================================
// Input & seeding
// =============================================================================

/// ラベルを表示して1行読む。EOFならNone。前後の空白は落とす。
fn prompt(input: &mut Input<'_>, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match input.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

/// 空のカタログに投入するデモデータ。
fn seed_demo_data(service: &mut CatalogService<CsvCatalogRepository>) {
    println!("\n--- Initializing Library with Dummy Data ---");
    let books = [
        Book::new(
            "The Hitchhiker's Guide to the Galaxy",
            "Douglas Adams",
            "978-0345391803",
        ),
        Book::fiction("Dune", "Frank Herbert", "978-0441172719", "Science Fiction"),
        Book::non_fiction("Cosmos", "Carl Sagan", "978-0345539434", "Astronomy"),
        Book::new("Python Crash Course", "Eric Matthes", "978-1593279288"),
        Book::new("Clean Code", "Robert C. Martin", "978-0132350884"),
    ];
    for book in books {
        if let Err(e) = service.add_book(book) {
            println!("Warning: {e}");
        }
    }

    let members = [
        Member::new("M001", "Bob Johnson"),
        Member::new("M002", "Carol White"),
        Member::new("M003", "David Green"),
    ];
    for member in members {
        if let Err(e) = service.add_member(member) {
            println!("Warning: {e}");
        }
    }
}
