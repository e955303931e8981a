//! カタログデータファイル用の区切りテキストコーデック。
//!
//! RFC 4180相当の最小実装。区切り文字・引用符・改行を含むセルだけを
//! ダブルクォートで包み、埋め込み引用符は二重化する。読み手は
//! クォート内の改行をレコード区切りとして扱わない。

/// セル列を1レコード分のテキストに変換する（改行は含まない）。
pub fn encode_record(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| encode_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn encode_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// テキスト全体をレコード列に分解する。
/// 空行は読み捨て、CRLFはLFと同じレコード区切りとして扱う。
/// 閉じられていないクォートは入力末尾で暗黙に閉じる。
pub fn decode_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    // クォートだけの空セル("")と未開始セルを区別する
    let mut cell_started = false;
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
            continue;
        }
        match c {
            '"' if !cell_started => {
                in_quotes = true;
                cell_started = true;
            }
            // セル途中のクォートはそのまま保持する
            '"' => cell.push('"'),
            ',' => {
                record.push(std::mem::take(&mut cell));
                cell_started = false;
            }
            // CRLFのCRは読み捨てる
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if cell_started || !record.is_empty() {
                    record.push(std::mem::take(&mut cell));
                    records.push(std::mem::take(&mut record));
                }
                cell_started = false;
            }
            _ => {
                cell.push(c);
                cell_started = true;
            }
        }
    }
    if cell_started || !record.is_empty() {
        record.push(cell);
        records.push(record);
    }
    records
}
