//! Alternate surface spellings.
//!
//! Slang source may use slang words (`permit x equivalate to 1 fr`) for
//! keywords and operators. `transcribe` rewrites them into the canonical
//! vocabulary before lexing. Rules apply in table order, each over the
//! output of the previous one. A word matches only at word boundaries and
//! never inside a `"…"` string literal.

/// `(slang spelling, canonical text)`, applied in order.
const WORDS: &[(&str, &str)] = &[
    ("oppositiate", "!"),
    ("fr", ";"),
    ("equivalate to", "="),
    ("permit", "let"),
    ("no_change", "const"),
    ("spitbars", "print"),
    ("si", "if"),
    ("nothin", "null"),
    ("si_no", "else"),
    ("dont_fw", "!="),
    ("fw", "=="),
    ("moreover", "&&"),
    ("carenot", "|"),
    ("street", "fn"),
    ("einstein", "math"),
    ("foh", "for"),
    ("diesto", "<"),
    ("kills", ">"),
    ("yuh", "true"),
    ("nuh", "false"),
    ("frick_around", "try"),
    ("find_out", "catch"),
    ("minus", "-"),
    ("plus", "+"),
    ("minusminus", "--"),
    ("plusplus", "++"),
    ("times", "*"),
    ("divided by", "/"),
];

/// Type annotations are accepted and dropped.
const ANNOTATIONS: &[&str] = &[": number", ": string", ": object", ": boolean"];

/// Rewrite slang spellings into canonical source text.
pub fn transcribe(source: &str) -> String {
    let mut text = source.to_string();
    for (word, canonical) in WORDS {
        text = replace_words(&text, word, canonical);
    }
    for annotation in ANNOTATIONS {
        text = text.replace(annotation, "");
    }
    text
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace whole-word occurrences of `word` outside string literals.
fn replace_words(text: &str, word: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut prev: Option<char> = None;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if !in_string
            && rest.starts_with(word)
            && !prev.is_some_and(is_word_char)
            && !rest[word.len()..].chars().next().is_some_and(is_word_char)
        {
            out.push_str(replacement);
            prev = word.chars().next_back();
            rest = &rest[word.len()..];
            continue;
        }

        if c == '"' {
            in_string = !in_string;
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::transcribe;

    #[test]
    fn keywords_and_operators() {
        assert_eq!(transcribe("permit x equivalate to 1 fr"), "let x = 1 ;");
        assert_eq!(transcribe("no_change y equivalate to x plus 2 fr"), "const y = x + 2 ;");
        assert_eq!(
            transcribe("si (a fw b) { yuh fr } si_no { nuh fr }"),
            "if (a == b) { true ; } else { false ; }"
        );
        assert_eq!(transcribe("street f() {}"), "fn f() {}");
        assert_eq!(transcribe("a divided by b times c"), "a / b * c");
    }

    #[test]
    fn words_without_a_builtin_stay_identifiers() {
        assert_eq!(transcribe("talk() fr pullup(x) fr"), "talk() ; pullup(x) ;");
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(transcribe("fresh sign"), "fresh sign");
        assert_eq!(transcribe("dont_fw"), "!=");
        assert_eq!(transcribe("timestamp minuscule"), "timestamp minuscule");
        // `plus` never matches inside `plusplus`, so the later rule applies.
        assert_eq!(transcribe("i plusplus fr"), "i ++ ;");
        assert_eq!(transcribe("n minusminus fr"), "n -- ;");
    }

    #[test]
    fn strings_are_untouched() {
        assert_eq!(
            transcribe("spitbars(\"permit me fr\") fr"),
            "print(\"permit me fr\") ;"
        );
        assert_eq!(transcribe("\"a\" plus \"b\""), "\"a\" + \"b\"");
    }

    #[test]
    fn type_annotations_are_erased() {
        assert_eq!(
            transcribe("street add(a: number, b: number) { a plus b fr }"),
            "fn add(a, b) { a + b ; }"
        );
        assert_eq!(transcribe("permit s: string equivalate to \"x\" fr"), "let s = \"x\" ;");
    }

    #[test]
    fn canonical_source_passes_through() {
        let source = "let x = 1; fn f(a) { a + x; } print(f(2));";
        assert_eq!(transcribe(source), source);
    }

    #[test]
    fn try_catch_spelling() {
        assert_eq!(
            transcribe("frick_around { oops fr } find_out { nothin fr }"),
            "try { oops ; } catch { null ; }"
        );
    }
}
