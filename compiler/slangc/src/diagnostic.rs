//! Terminal rendering of driver errors.
//!
//! Lex and parse errors carry a span and are shown with the offending
//! source line and a caret underline. Runtime errors have no location and
//! render as a single line.

use std::fmt::Write;

use slang_ir::Span;

use crate::SlangError;

/// 1-based `(line, column)` of a byte offset. Columns count characters.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = floor_char_boundary(source, offset);
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = source[line_start..offset].chars().count() + 1;
    (line, col)
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Render `error` against the source it came from.
pub fn render(error: &SlangError, source: &str, path: &str) -> String {
    let mut out = format!("error: {error}\n");
    match error.span() {
        Some(span) => write_snippet(&mut out, source, path, span),
        None => {
            let _ = writeln!(out, " --> {path}");
        }
    }
    out
}

fn write_snippet(out: &mut String, source: &str, path: &str, span: Span) {
    let start = floor_char_boundary(source, span.start as usize);
    let (line, col) = line_col(source, start);
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);
    let text = &source[line_start..line_end];

    // Underline the span, clipped to its first line; at least one caret.
    let end = floor_char_boundary(source, (span.end as usize).clamp(start, line_end));
    let width = source[start..end].chars().count().max(1);

    let gutter = line.to_string().len();
    let pad = " ".repeat(gutter);
    let _ = writeln!(out, "{pad}--> {path}:{line}:{col}");
    let _ = writeln!(out, "{pad} |");
    let _ = writeln!(out, "{line} | {text}");
    let _ = writeln!(
        out,
        "{pad} | {}{}",
        " ".repeat(col - 1),
        "^".repeat(width)
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slang_eval::EvalError;

    use super::*;

    fn parse_error(source: &str) -> SlangError {
        match slang_parse::parse(source) {
            Ok(program) => panic!("expected a parse error, got {program:?}"),
            Err(err) => SlangError::from(err),
        }
    }

    #[test]
    fn line_and_column() {
        let source = "ab\ncd\n\nxé";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 1), (1, 2));
        assert_eq!(line_col(source, 3), (2, 1));
        assert_eq!(line_col(source, 6), (3, 1));
        assert_eq!(line_col(source, 8), (4, 2));
        assert_eq!(line_col(source, 100), (4, 3));
    }

    #[test]
    fn syntax_error_snippet() {
        let source = "let x = 1;\nlet = 2;";
        assert_eq!(
            render(&parse_error(source), source, "main.sl"),
            "error: expected identifier name following `let` or `const`, found `=`\n\
             \x20--> main.sl:2:5\n\
             \x20 |\n\
             2 | let = 2;\n\
             \x20 |     ^\n"
        );
    }

    #[test]
    fn lex_error_snippet() {
        let source = "let a = 1 # 2;";
        assert_eq!(
            render(&parse_error(source), source, "main.sl"),
            "error: unrecognized character '#' in source\n\
             \x20--> main.sl:1:11\n\
             \x20 |\n\
             1 | let a = 1 # 2;\n\
             \x20 |           ^\n"
        );
    }

    #[test]
    fn multi_character_tokens_are_underlined() {
        let source = "let \"name\" = 1;";
        let rendered = render(&parse_error(source), source, "a.sl");
        assert!(rendered.ends_with("1 | let \"name\" = 1;\n  |     ^^^^^^\n"));
    }

    #[test]
    fn runtime_errors_have_no_snippet() {
        let error = SlangError::from(EvalError::UndeclaredVariable {
            name: "y".into(),
        });
        assert_eq!(
            render(&error, "y;", "main.sl"),
            "error: variable `y` is not declared\n --> main.sl\n"
        );
    }
}
