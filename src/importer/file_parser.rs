// ==========================================
// 人力看板 - 文件读取与分词
// ==========================================
// 阶段 0: 文件 → 文本（.csv/.tsv/.txt 直接读取，.xlsx/.xls 首个工作表转为 tab 文本）
// 阶段 1: 文本 → 行（分隔符识别 / 引号感知拆分 / 丢弃表头 / 列数检查）
// ==========================================

use crate::config::ParseOptions;
use crate::importer::error::{ImportError, ImporterResult};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// 字段分隔符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

/// 一行原始单元格（未裁剪）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize, // 表头为第 1 行
    pub cells: Vec<String>,
}

/// 分词结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    pub delimiter: Delimiter,
    pub rows: Vec<RawRow>,
    pub warnings: Vec<String>,
}

/// 去除开头的 UTF-8 BOM
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

/// 按首行 tab 字段数识别分隔符
pub fn detect_delimiter(first_line: &str, tsv_field_threshold: usize) -> Delimiter {
    if first_line.split('\t').count() > tsv_field_threshold {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// 拆分单行
///
/// - Tab: 直接按 `\t` 拆分，不处理引号
/// - Comma: 双引号包裹的字段内逗号不作分隔，`""` 为字面引号
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    match delimiter {
        Delimiter::Tab => line.split('\t').map(str::to_string).collect(),
        Delimiter::Comma => split_quoted(line),
    }
}

/// 引号状态拆分: 任意位置的 `"` 切换引号状态，引号内 `""` 为字面引号，
/// 引号外的逗号才是分隔符；其余字符（含 `\r`）原样保留
fn split_quoted(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells
}

/// 文本分词
///
/// 首行（去除首尾空白后）为表头，无条件丢弃；空白行跳过；
/// 列数不足 `min_columns` 的行产生告警并排除。
pub fn tokenize(text: &str, options: &ParseOptions) -> TokenizedText {
    let text = strip_bom(text).trim();

    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let header = lines.next().unwrap_or("");
    let delimiter = detect_delimiter(header, options.tsv_field_threshold);

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (index, line) in lines.filter(|l| !l.trim().is_empty()).enumerate() {
        let row_number = index + 2;
        let cells = split_line(line, delimiter);

        if cells.len() < options.min_columns {
            warnings.push(format!(
                "Row {}: Not enough columns ({})",
                row_number,
                cells.len()
            ));
            continue;
        }

        rows.push(RawRow { row_number, cells });
    }

    debug!(
        delimiter = ?delimiter,
        rows = rows.len(),
        warnings = warnings.len(),
        "分词完成"
    );

    TokenizedText {
        delimiter,
        rows,
        warnings,
    }
}

// ==========================================
// 文件读取
// ==========================================

/// 读取导入文件为原始文本
///
/// # 支持格式
/// - .csv / .tsv / .txt: UTF-8 文本（非 UTF-8 报错）
/// - .xlsx / .xls: 首个工作表，单元格以 tab 连接
pub fn read_raw_text(path: &Path) -> ImporterResult<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => {
            let bytes = std::fs::read(path)?;
            String::from_utf8(bytes).map_err(|_| ImportError::NotUtf8 {
                path: path.display().to_string(),
            })
        }
        "xlsx" | "xls" => read_workbook_as_tsv(path),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

fn read_workbook_as_tsv(path: &Path) -> ImporterResult<String> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::EmptyWorkbook(path.display().to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let lines: Vec<String> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(render_cell)
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect();

    debug!(sheet = %sheet_name, rows = lines.len(), "工作表读取完成");
    Ok(lines.join("\n"))
}

/// 单元格转文本；日期单元格输出为 "4 June 1999" 形式，与文本导出一致
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => date.format("%-d %B %Y").to_string(),
            None => cell.to_string(),
        },
        // 单元格内的 tab/换行会破坏行结构
        Data::String(s) => s.replace(['\t', '\n', '\r'], " "),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn header(delim: &str) -> String {
        (0..26)
            .map(|i| format!("H{}", i))
            .collect::<Vec<_>>()
            .join(delim)
    }

    fn row(delim: &str, id: &str) -> String {
        (0..26)
            .map(|i| if i == 2 { id.to_string() } else { format!("c{}", i) })
            .collect::<Vec<_>>()
            .join(delim)
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a\tb\tc\td\te\tf", 5), Delimiter::Tab);
        assert_eq!(detect_delimiter("a\tb\tc\td\te", 5), Delimiter::Comma);
        assert_eq!(detect_delimiter("a,b,c", 5), Delimiter::Comma);
    }

    #[test]
    fn test_split_line_respects_quotes() {
        let cells = split_line(r#"a,"Doe, John","say ""hi""",d"#, Delimiter::Comma);
        assert_eq!(cells, vec!["a", "Doe, John", r#"say "hi""#, "d"]);
    }

    #[test]
    fn test_split_line_quote_inside_field() {
        let cells = split_line(r#"a,Somchai "Big, Boss",c"#, Delimiter::Comma);
        assert_eq!(cells, vec!["a", "Somchai Big, Boss", "c"]);
    }

    #[test]
    fn test_split_line_keeps_inner_carriage_return() {
        let cells = split_line("a,b\rc,d", Delimiter::Comma);
        assert_eq!(cells, vec!["a", "b\rc", "d"]);
    }

    #[test]
    fn test_split_line_unclosed_quote_runs_to_end() {
        let cells = split_line(r#"a,"b,c"#, Delimiter::Comma);
        assert_eq!(cells, vec!["a", "b,c"]);
        assert_eq!(split_line("", Delimiter::Comma), vec![""]);
    }

    #[test]
    fn test_split_line_tab_ignores_quotes() {
        let cells = split_line("a\t\"b,c\"\t", Delimiter::Tab);
        assert_eq!(cells, vec!["a", "\"b,c\"", ""]);
    }

    #[test]
    fn test_tokenize_discards_header_and_blank_lines() {
        let text = format!(
            "\u{feff}{}\r\n{}\r\n\r\n   \n{}\n",
            header("\t"),
            row("\t", "E1"),
            row("\t", "E2")
        );
        let out = tokenize(&text, &ParseOptions::default());

        assert_eq!(out.delimiter, Delimiter::Tab);
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].cells[2], "E1");
        assert_eq!(out.rows[0].row_number, 2);
        assert_eq!(out.rows[1].row_number, 3);
        assert!(out.warnings.is_empty());
        // 去除 \r 后末列不带回车
        assert_eq!(out.rows[0].cells[25], "c25");
    }

    #[test]
    fn test_tokenize_short_row_warning() {
        let text = format!("{}\nE1,only,three\n{}", header(","), row(",", "E2"));
        let out = tokenize(&text, &ParseOptions::default());

        assert_eq!(out.delimiter, Delimiter::Comma);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].row_number, 3);
        assert_eq!(out.warnings, vec!["Row 2: Not enough columns (3)".to_string()]);
    }

    #[test]
    fn test_tokenize_empty_text() {
        let out = tokenize("", &ParseOptions::default());
        assert!(out.rows.is_empty());
        assert!(out.warnings.is_empty());

        let header_only = tokenize(&header(","), &ParseOptions::default());
        assert!(header_only.rows.is_empty());
    }

    #[test]
    fn test_read_raw_text_csv() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "{}", header(",")).unwrap();
        writeln!(temp_file, "{}", row(",", "E1")).unwrap();

        let text = read_raw_text(temp_file.path()).unwrap();
        assert!(text.contains("E1"));
    }

    #[test]
    fn test_read_raw_text_errors() {
        let missing = read_raw_text(Path::new("non_existent.csv"));
        assert!(matches!(missing, Err(ImportError::FileNotFound(_))));

        let temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let unsupported = read_raw_text(temp_file.path());
        assert!(matches!(unsupported, Err(ImportError::UnsupportedFormat(_))));

        let mut latin1 = Builder::new().suffix(".txt").tempfile().unwrap();
        latin1.write_all(&[0x66, 0x6f, 0xff, 0xfe, 0x0a]).unwrap();
        let bad = read_raw_text(latin1.path());
        assert!(matches!(bad, Err(ImportError::NotUtf8 { .. })));
    }
}
