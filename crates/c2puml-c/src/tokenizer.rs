//! Lexical analysis for C/C++ source text.
//!
//! The tokenizer turns a decoded source string into a flat token stream the
//! extractors can brace-match and split without being confused by comments,
//! string contents or preprocessor text:
//!
//! - `//` and `/* */` comments are dropped, with line counting preserved so
//!   tokens keep their source line numbers.
//! - String and character literal contents are kept verbatim inside a single
//!   token, so a `{` or `;` inside a literal never corrupts brace matching.
//! - Preprocessor directives are atomic tokens, one per logical line:
//!   `\`-continuations are joined before the directive is emitted.
//!   Conditional compilation is never evaluated; every branch stays visible.
//! - Whitespace and newlines are not tokens. Declarations split across
//!   physical lines therefore arrive as one uninterrupted token run, which
//!   keeps name/type boundaries intact for the extractors.
//!
//! Malformed input (unterminated comments or literals, unbalanced braces)
//! degrades to whatever well-bounded tokens exist; the tokenizer itself
//! never fails.

/// Token classification for C/C++ lexical analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Structure keywords
    Struct,
    Enum,
    Union,
    Typedef,

    // Storage class and qualifier keywords
    Static,
    Extern,
    Inline,
    Const,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Assign,
    Asterisk,
    Colon,

    // Literals and identifiers
    Identifier,
    Number,
    StringLit,
    CharLit,

    // Preprocessor directives (one token per logical line)
    Include,
    Define,
    Preprocessor,

    // Anything else (operators, punctuation we do not classify)
    Unknown,
}

/// A single token with its source line (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Tokenize C/C++ source text.
pub fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line: u32 = 1;
    // True until the first non-whitespace character of the current physical
    // line; preprocessor directives are only recognized there
    let mut at_line_start = true;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            at_line_start = true;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Comments
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '*' {
            i += 2;
            loop {
                if i >= chars.len() {
                    // Unterminated block comment: the rest of the file is
                    // comment text
                    break;
                }
                if chars[i] == '\n' {
                    line += 1;
                } else if chars[i] == '*' && i + 1 < chars.len() && chars[i + 1] == '/' {
                    i += 2;
                    break;
                }
                i += 1;
            }
            continue;
        }

        // Preprocessor directive, joined across `\`-continuations
        if c == '#' && at_line_start {
            let start_line = line;
            let mut text = String::new();
            while i < chars.len() {
                let ch = chars[i];
                if ch == '\n' {
                    if text.trim_end().ends_with('\\') {
                        while text.ends_with(char::is_whitespace) {
                            text.pop();
                        }
                        text.pop();
                        text.push(' ');
                        line += 1;
                        i += 1;
                        continue;
                    }
                    break;
                }
                text.push(ch);
                i += 1;
            }
            let text: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let kind = if text.starts_with("#include") {
                TokenKind::Include
            } else if text.starts_with("#define") {
                TokenKind::Define
            } else {
                TokenKind::Preprocessor
            };
            tokens.push(Token::new(kind, text, start_line));
            continue;
        }

        at_line_start = false;

        // String literal, contents verbatim, escapes honored
        if c == '"' {
            let start_line = line;
            let mut text = String::from('"');
            i += 1;
            while i < chars.len() {
                let ch = chars[i];
                if ch == '\\' && i + 1 < chars.len() {
                    text.push(ch);
                    text.push(chars[i + 1]);
                    i += 2;
                    continue;
                }
                if ch == '"' {
                    text.push(ch);
                    i += 1;
                    break;
                }
                if ch == '\n' {
                    // Unterminated literal: close it at end of line
                    break;
                }
                text.push(ch);
                i += 1;
            }
            tokens.push(Token::new(TokenKind::StringLit, text, start_line));
            continue;
        }

        // Character literal
        if c == '\'' {
            let start_line = line;
            let mut text = String::from('\'');
            i += 1;
            while i < chars.len() {
                let ch = chars[i];
                if ch == '\\' && i + 1 < chars.len() {
                    text.push(ch);
                    text.push(chars[i + 1]);
                    i += 2;
                    continue;
                }
                if ch == '\'' {
                    text.push(ch);
                    i += 1;
                    break;
                }
                if ch == '\n' {
                    break;
                }
                text.push(ch);
                i += 1;
            }
            tokens.push(Token::new(TokenKind::CharLit, text, start_line));
            continue;
        }

        // Identifier or keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let kind = keyword_kind(&text);
            tokens.push(Token::new(kind, text, line));
            continue;
        }

        // Number (integers, floats, hex/octal/binary, suffixes)
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
            {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            tokens.push(Token::new(TokenKind::Number, text, line));
            continue;
        }

        // Single-character punctuation
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Assign,
            '*' => TokenKind::Asterisk,
            ':' => TokenKind::Colon,
            _ => TokenKind::Unknown,
        };
        tokens.push(Token::new(kind, c.to_string(), line));
        i += 1;
    }

    tokens
}

fn keyword_kind(text: &str) -> TokenKind {
    match text {
        "struct" => TokenKind::Struct,
        "enum" => TokenKind::Enum,
        "union" => TokenKind::Union,
        "typedef" => TokenKind::Typedef,
        "static" => TokenKind::Static,
        "extern" => TokenKind::Extern,
        "inline" => TokenKind::Inline,
        "const" => TokenKind::Const,
        _ => TokenKind::Identifier,
    }
}

/// Find the index of the brace matching the opener at `open_idx`.
///
/// Returns `None` when `open_idx` is not an opener or the input runs out
/// before the depth returns to zero (truncated input).
pub fn find_matching(
    tokens: &[Token],
    open_idx: usize,
    open: TokenKind,
    close: TokenKind,
) -> Option<usize> {
    if tokens.get(open_idx).map(|t| t.kind) != Some(open) {
        return None;
    }
    let mut depth = 1usize;
    let mut i = open_idx + 1;
    while i < tokens.len() {
        if tokens[i].kind == open {
            depth += 1;
        } else if tokens[i].kind == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Join token texts back into a readable C fragment.
///
/// Spacing is tightened around brackets and separators so type strings come
/// out the way they were written: `char *`, `uint8_t[32]`, `int (*)(int)`.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() {
            let prev = out.chars().last();
            let no_space_before = matches!(token.text.as_str(), ")" | "]" | "," | ";" | "[")
                || (token.text == "(" && prev == Some(')'))
                || (token.text == "*" && prev == Some('*'));
            let no_space_after_prev = matches!(prev, Some('(') | Some('['));
            if !no_space_before && !no_space_after_prev {
                out.push(' ');
            }
        }
        out.push_str(&token.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_simple_declaration() {
        let tokens = tokenize("int x;");
        assert_eq!(
            tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
            vec!["int", "x", ";"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_keywords_are_classified() {
        assert_eq!(
            kinds("typedef struct enum union static extern inline const"),
            vec![
                TokenKind::Typedef,
                TokenKind::Struct,
                TokenKind::Enum,
                TokenKind::Union,
                TokenKind::Static,
                TokenKind::Extern,
                TokenKind::Inline,
                TokenKind::Const,
            ]
        );
    }

    #[test]
    fn test_comments_are_stripped_but_lines_preserved() {
        let tokens = tokenize("int a; // trailing\n/* block\ncomment */ int b;");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["int", "a", ";", "int", "b", ";"]);
        // `int b` sits on line 3, after the two comment lines
        assert_eq!(tokens[3].line, 3);
    }

    #[test]
    fn test_brace_inside_string_does_not_affect_matching() {
        let tokens = tokenize("char *s = \"{ not a brace ; }\";");
        let braces = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::LBrace | TokenKind::RBrace))
            .count();
        assert_eq!(braces, 0);
        let string = tokens.iter().find(|t| t.kind == TokenKind::StringLit).unwrap();
        assert_eq!(string.text, "\"{ not a brace ; }\"");
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let tokens = tokenize(r#"char *s = "say \"hi\"";"#);
        let string = tokens.iter().find(|t| t.kind == TokenKind::StringLit).unwrap();
        assert_eq!(string.text, r#""say \"hi\"""#);
    }

    #[test]
    fn test_unterminated_string_does_not_panic() {
        let tokens = tokenize("char *s = \"oops\nint after;");
        // Tokenization continues on the next line
        assert!(tokens.iter().any(|t| t.text == "after"));
    }

    #[test]
    fn test_preprocessor_lines_are_atomic() {
        let tokens = tokenize("#include <stdio.h>\n#define MAX 10\n#ifdef DEBUG\nint x;\n#endif");
        assert_eq!(tokens[0].kind, TokenKind::Include);
        assert_eq!(tokens[0].text, "#include <stdio.h>");
        assert_eq!(tokens[1].kind, TokenKind::Define);
        assert_eq!(tokens[1].text, "#define MAX 10");
        assert_eq!(tokens[2].kind, TokenKind::Preprocessor);
        // Both conditional branches stay visible as code tokens
        assert!(tokens.iter().any(|t| t.text == "x"));
    }

    #[test]
    fn test_multiline_define_is_joined() {
        let tokens = tokenize("#define SWAP(a, b) \\\n    do { a ^= b; } \\\n    while (0)\nint x;");
        assert_eq!(tokens[0].kind, TokenKind::Define);
        assert_eq!(tokens[0].text, "#define SWAP(a, b) do { a ^= b; } while (0)");
        // The joined directive never leaks braces into the code stream
        assert_eq!(tokens[1].text, "int");
        assert_eq!(tokens[1].line, 4);
    }

    #[test]
    fn test_multiline_declaration_is_a_single_token_run() {
        let joined = tokenize("static\nint\nvalue\n;");
        let flat = tokenize("static int value;");
        let texts = |ts: &[Token]| ts.iter().map(|t| t.text.clone()).collect::<Vec<_>>();
        assert_eq!(texts(&joined), texts(&flat));
    }

    #[test]
    fn test_find_matching_brace() {
        let tokens = tokenize("struct S { int a; struct { int b; } inner; };");
        let open = tokens.iter().position(|t| t.kind == TokenKind::LBrace).unwrap();
        let close = find_matching(&tokens, open, TokenKind::LBrace, TokenKind::RBrace).unwrap();
        assert_eq!(tokens[close + 1].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_find_matching_unbalanced_returns_none() {
        let tokens = tokenize("struct S { int a;");
        let open = tokens.iter().position(|t| t.kind == TokenKind::LBrace).unwrap();
        assert!(find_matching(&tokens, open, TokenKind::LBrace, TokenKind::RBrace).is_none());
    }

    #[test]
    fn test_render_tokens_spacing() {
        let tokens = tokenize("char * names [ 10 ]");
        assert_eq!(render_tokens(&tokens), "char * names[10]");

        let fn_ptr = tokenize("int (*)(int, int)");
        assert_eq!(render_tokens(&fn_ptr), "int (*)(int, int)");
    }

    #[test]
    fn test_number_formats() {
        let tokens = tokenize("0x1F 0b101 42u 3.14f");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
        assert_eq!(tokens[0].text, "0x1F");
    }
}
