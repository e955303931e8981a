use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let data_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("library.csv"));

    card_catalog::interface::shell::run(data_path)
}
