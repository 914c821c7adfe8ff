//! Element extraction over the token stream.
//!
//! Each extractor is an isolated function making its own pass over the
//! tokens: structs/unions, enums, functions, globals, macros, typedefs and
//! includes. This is deliberate regex/brace-matching structural parsing, not
//! a grammar: extraction is best effort, and a single malformed element is
//! skipped while the rest of the file is still processed. Nothing here
//! returns an error.

use crate::tokenizer::{find_matching, render_tokens, Token, TokenKind};
use c2puml::model::{Enum, EnumValue, Field, Function, Struct, TypedefKind, TypedefRelation, Union};
use std::collections::BTreeMap;

/// Everything extracted from one file's token stream.
#[derive(Debug, Default)]
pub struct Extraction {
    pub structs: BTreeMap<String, Struct>,
    pub enums: BTreeMap<String, Enum>,
    pub unions: BTreeMap<String, Union>,
    pub functions: Vec<Function>,
    pub globals: Vec<Field>,
    pub includes: Vec<String>,
    pub macros: Vec<String>,
    pub typedefs: BTreeMap<String, String>,
    pub typedef_relations: Vec<TypedefRelation>,
}

/// Run every extractor over the token stream.
pub fn extract_all(tokens: &[Token]) -> Extraction {
    let mut out = Extraction {
        includes: extract_includes(tokens),
        macros: extract_macros(tokens),
        enums: extract_enums(tokens),
        functions: extract_functions(tokens),
        globals: extract_globals(tokens),
        ..Extraction::default()
    };

    let composites = extract_composites(tokens);
    out.structs = composites.structs;
    out.unions = composites.unions;

    let (typedefs, relations) = extract_typedefs(tokens);
    out.typedefs = typedefs;
    out.typedef_relations = relations;

    associate_methods(&mut out.structs, &out.functions);
    out
}

/// Raw `#include` targets in declaration order, quotes/brackets stripped.
pub fn extract_includes(tokens: &[Token]) -> Vec<String> {
    let mut includes = Vec::new();
    for token in tokens {
        if token.kind != TokenKind::Include {
            continue;
        }
        let rest = token.text["#include".len()..].trim();
        let target = if let Some(inner) = rest.strip_prefix('<') {
            inner.split('>').next()
        } else if let Some(inner) = rest.strip_prefix('"') {
            inner.split('"').next()
        } else {
            None
        };
        if let Some(target) = target {
            if !target.is_empty() {
                includes.push(target.to_string());
            }
        }
    }
    includes
}

/// Macro definitions: the full text after `#define `, in order. Object-like
/// and function-like macros are both recorded.
pub fn extract_macros(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Define)
        .filter_map(|t| {
            let rest = t.text["#define".len()..].trim();
            (!rest.is_empty()).then(|| rest.to_string())
        })
        .collect()
}

/// Structs and unions extracted together, so nested anonymous members of
/// either kind land in the right table.
#[derive(Debug, Default)]
pub struct Composites {
    pub structs: BTreeMap<String, Struct>,
    pub unions: BTreeMap<String, Union>,
}

/// Extract top-level struct and union definitions, `typedef struct` forms
/// included. Nested anonymous blocks are registered as synthetic records
/// named `<Parent>_<member>` and referenced from a field at the member's
/// declared position.
pub fn extract_composites(tokens: &[Token]) -> Composites {
    let mut out = Composites::default();
    let mut depth: u32 = 0;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::LBrace => {
                // An opener with no matching brace is truncated input; not
                // counting it lets later well-bounded constructs extract
                if find_matching(tokens, i, TokenKind::LBrace, TokenKind::RBrace).is_some() {
                    depth += 1;
                }
                i += 1;
            }
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            kw @ (TokenKind::Struct | TokenKind::Union) if depth == 0 => {
                let is_typedef = i > 0 && tokens[i - 1].kind == TokenKind::Typedef;
                let mut j = i + 1;
                let tag = match tokens.get(j) {
                    Some(t) if t.kind == TokenKind::Identifier => {
                        j += 1;
                        Some(t.text.clone())
                    }
                    _ => None,
                };

                if tokens.get(j).map(|t| t.kind) != Some(TokenKind::LBrace) {
                    // Forward declaration or variable of a named record
                    i = j;
                    continue;
                }
                let Some(close) = find_matching(tokens, j, TokenKind::LBrace, TokenKind::RBrace)
                else {
                    // Truncated input: nothing well-bounded to extract here
                    i = j;
                    continue;
                };

                let alias = is_typedef
                    .then(|| trailing_identifier(tokens, close + 1))
                    .flatten();
                if let Some(name) = tag.clone().or(alias) {
                    let fields = parse_record_body(&tokens[j + 1..close], &name, &mut out);
                    match kw {
                        TokenKind::Struct => {
                            out.structs.insert(name.clone(), Struct::new(name, fields));
                        }
                        _ => {
                            out.unions.insert(name.clone(), Union::new(name, fields));
                        }
                    }
                }
                i = close + 1;
            }
            _ => i += 1,
        }
    }

    out
}

/// First run of declarator tokens after `pos`, up to the terminating
/// semicolon; returns the last identifier in it (the typedef alias or the
/// declared member name).
fn trailing_identifier(tokens: &[Token], pos: usize) -> Option<String> {
    let mut name = None;
    let mut i = pos;
    while i < tokens.len() && tokens[i].kind != TokenKind::Semicolon {
        if tokens[i].kind == TokenKind::Identifier {
            name = Some(tokens[i].text.clone());
        }
        i += 1;
    }
    name
}

/// Parse the member declarations of a struct/union body, preserving order.
///
/// Nested anonymous struct/union members recurse; their synthetic record is
/// registered in `sinks` and the member keeps its declared position.
fn parse_record_body(body: &[Token], parent: &str, sinks: &mut Composites) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut anon_counter = 0usize;
    let mut i = 0;

    while i < body.len() {
        match body[i].kind {
            // Directives inside bodies are skipped; fields from every
            // conditional branch stay visible
            TokenKind::Include | TokenKind::Define | TokenKind::Preprocessor => i += 1,
            TokenKind::Semicolon => i += 1,
            kw @ (TokenKind::Struct | TokenKind::Union)
                if has_brace_before_semicolon(&body[i..]) =>
            {
                let mut j = i + 1;
                let tag = match body.get(j) {
                    Some(t) if t.kind == TokenKind::Identifier => {
                        j += 1;
                        Some(t.text.clone())
                    }
                    _ => None,
                };
                if body.get(j).map(|t| t.kind) != Some(TokenKind::LBrace) {
                    i = j;
                    continue;
                }
                let Some(close) = find_matching(body, j, TokenKind::LBrace, TokenKind::RBrace)
                else {
                    break;
                };

                let semi = body[close + 1..]
                    .iter()
                    .position(|t| t.kind == TokenKind::Semicolon)
                    .map(|p| close + 1 + p)
                    .unwrap_or(body.len());
                let member_name = body[close + 1..semi]
                    .iter()
                    .rev()
                    .find(|t| t.kind == TokenKind::Identifier)
                    .map(|t| t.text.clone())
                    .unwrap_or_else(|| {
                        let name = format!("__anon{anon_counter}");
                        anon_counter += 1;
                        name
                    });

                let record_name = tag.unwrap_or_else(|| format!("{parent}_{member_name}"));
                let inner_fields = parse_record_body(&body[j + 1..close], &record_name, sinks);
                let keyword = match kw {
                    TokenKind::Struct => {
                        sinks
                            .structs
                            .insert(record_name.clone(), Struct::new(&record_name, inner_fields));
                        "struct"
                    }
                    _ => {
                        sinks
                            .unions
                            .insert(record_name.clone(), Union::new(&record_name, inner_fields));
                        "union"
                    }
                };
                fields.push(Field::new(member_name, format!("{keyword} {record_name}")));
                i = semi + 1;
            }
            _ => {
                // Plain member: collect until the terminating semicolon
                let semi = body[i..]
                    .iter()
                    .position(|t| t.kind == TokenKind::Semicolon)
                    .map(|p| i + p);
                let Some(semi) = semi else {
                    // Truncated member, skip what is left
                    break;
                };
                fields.extend(parse_field_declaration(&body[i..semi]));
                i = semi + 1;
            }
        }
    }

    fields
}

/// True when a `{` appears before the next `;` (i.e. the struct/union
/// keyword at the slice start opens a nested definition, not a member of a
/// named record type).
fn has_brace_before_semicolon(tokens: &[Token]) -> bool {
    for token in tokens {
        match token.kind {
            TokenKind::LBrace => return true,
            TokenKind::Semicolon => return false,
            _ => {}
        }
    }
    false
}

/// Extract top-level enum definitions, `typedef enum` included.
pub fn extract_enums(tokens: &[Token]) -> BTreeMap<String, Enum> {
    let mut enums = BTreeMap::new();
    let mut depth: u32 = 0;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::LBrace => {
                if find_matching(tokens, i, TokenKind::LBrace, TokenKind::RBrace).is_some() {
                    depth += 1;
                }
                i += 1;
            }
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            TokenKind::Enum if depth == 0 => {
                let is_typedef = i > 0 && tokens[i - 1].kind == TokenKind::Typedef;
                let mut j = i + 1;
                let tag = match tokens.get(j) {
                    Some(t) if t.kind == TokenKind::Identifier => {
                        j += 1;
                        Some(t.text.clone())
                    }
                    _ => None,
                };
                if tokens.get(j).map(|t| t.kind) != Some(TokenKind::LBrace) {
                    i = j;
                    continue;
                }
                let Some(close) = find_matching(tokens, j, TokenKind::LBrace, TokenKind::RBrace)
                else {
                    i = j;
                    continue;
                };

                let alias = is_typedef
                    .then(|| trailing_identifier(tokens, close + 1))
                    .flatten();
                if let Some(name) = tag.or(alias) {
                    let values = parse_enum_values(&tokens[j + 1..close]);
                    enums.insert(name.clone(), Enum::new(name, values));
                }
                i = close + 1;
            }
            _ => i += 1,
        }
    }

    enums
}

fn parse_enum_values(body: &[Token]) -> Vec<EnumValue> {
    let mut values = Vec::new();
    for segment in split_on_commas(body) {
        let Some(name_token) = segment.iter().find(|t| t.kind == TokenKind::Identifier) else {
            continue;
        };
        let value = segment
            .iter()
            .position(|t| t.kind == TokenKind::Assign)
            .map(|p| render_tokens(&segment[p + 1..]))
            .filter(|v| !v.is_empty());
        values.push(EnumValue {
            name: name_token.text.clone(),
            value,
        });
    }
    values
}

/// Extract top-level function declarations and definitions.
///
/// Declarations and definitions are recorded identically apart from
/// `is_declaration`; function bodies are skipped wholesale, so nothing
/// inside them can surface elsewhere. A function-pointer parameter stays in
/// the parameter list and is never misread as a new function.
pub fn extract_functions(tokens: &[Token]) -> Vec<Function> {
    let mut functions = Vec::new();
    let mut depth: u32 = 0;
    let mut stmt_start = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::LBrace => {
                if find_matching(tokens, i, TokenKind::LBrace, TokenKind::RBrace).is_some() {
                    depth += 1;
                } else {
                    stmt_start = i + 1;
                }
                i += 1;
            }
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                i += 1;
                if depth == 0 {
                    stmt_start = i;
                }
            }
            TokenKind::Semicolon if depth == 0 => {
                i += 1;
                stmt_start = i;
            }
            TokenKind::Include | TokenKind::Define | TokenKind::Preprocessor if depth == 0 => {
                i += 1;
                stmt_start = i;
            }
            TokenKind::LParen if depth == 0 && i > stmt_start => {
                if tokens[i - 1].kind == TokenKind::Identifier {
                    if let Some((function, end)) = parse_function_at(tokens, stmt_start, i) {
                        functions.push(function);
                        i = end + 1;
                        stmt_start = i;
                        continue;
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    functions
}

/// Try to read a function whose name sits right before the `(` at
/// `paren_idx`, with its return type starting at `stmt_start`. Returns the
/// function and the index of its last token.
fn parse_function_at(
    tokens: &[Token],
    stmt_start: usize,
    paren_idx: usize,
) -> Option<(Function, usize)> {
    let name = &tokens[paren_idx - 1];
    if name.kind != TokenKind::Identifier {
        return None;
    }
    let prefix = &tokens[stmt_start..paren_idx - 1];
    if prefix.is_empty() {
        // A bare `name(...)` is a macro invocation or call, not a function
        return None;
    }
    if prefix.iter().any(|t| {
        matches!(
            t.kind,
            TokenKind::Typedef | TokenKind::Assign | TokenKind::LParen | TokenKind::RParen
        )
    }) {
        return None;
    }

    let close = find_matching(tokens, paren_idx, TokenKind::LParen, TokenKind::RParen)?;

    // Terminator: `;` for a declaration, `{` for a definition. Attribute-ish
    // identifiers in between are tolerated.
    let mut j = close + 1;
    let (term_idx, is_declaration) = loop {
        match tokens.get(j).map(|t| t.kind) {
            Some(TokenKind::Semicolon) => break (j, true),
            Some(TokenKind::LBrace) => break (j, false),
            Some(TokenKind::Identifier) | Some(TokenKind::Const) | Some(TokenKind::Unknown) => {
                j += 1
            }
            _ => return None,
        }
    };

    let is_static = prefix.iter().any(|t| t.kind == TokenKind::Static);
    let is_inline = prefix.iter().any(|t| t.kind == TokenKind::Inline);
    let return_tokens: Vec<Token> = prefix
        .iter()
        .filter(|t| {
            !matches!(
                t.kind,
                TokenKind::Static | TokenKind::Extern | TokenKind::Inline
            )
        })
        .cloned()
        .collect();
    if return_tokens.is_empty() {
        return None;
    }

    let end = if is_declaration {
        term_idx
    } else {
        find_matching(tokens, term_idx, TokenKind::LBrace, TokenKind::RBrace)
            .unwrap_or(tokens.len() - 1)
    };

    let function = Function {
        name: name.text.clone(),
        return_type: render_tokens(&return_tokens),
        parameters: parse_parameters(&tokens[paren_idx + 1..close]),
        is_static,
        is_inline,
        is_declaration,
    };
    Some((function, end))
}

fn parse_parameters(tokens: &[Token]) -> Vec<Field> {
    let mut parameters = Vec::new();
    for segment in split_on_commas(tokens) {
        if segment.is_empty() {
            continue;
        }
        if segment.len() == 1 && segment[0].text == "void" {
            continue;
        }
        if segment.iter().all(|t| t.text == ".") {
            parameters.push(Field::new("", "..."));
            continue;
        }
        if let Some(name_idx) = function_pointer_name(&segment) {
            let name = segment[name_idx].text.clone();
            let mut rest = segment.to_vec();
            rest.remove(name_idx);
            parameters.push(Field::new(name, render_tokens(&rest)));
            continue;
        }
        match segment.last() {
            Some(last) if last.kind == TokenKind::Identifier && segment.len() >= 2 => {
                parameters.push(Field::new(
                    last.text.clone(),
                    render_tokens(&segment[..segment.len() - 1]),
                ));
            }
            _ => {
                // Unnamed prototype parameter: keep the type only
                parameters.push(Field::new("", render_tokens(&segment)));
            }
        }
    }
    parameters
}

/// Index of the declarator name in a `(*name)` group, when present.
fn function_pointer_name(tokens: &[Token]) -> Option<usize> {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind == TokenKind::LParen {
            let mut j = i + 1;
            let mut stars = 0;
            while tokens.get(j).map(|t| t.kind) == Some(TokenKind::Asterisk) {
                stars += 1;
                j += 1;
            }
            if stars > 0
                && tokens.get(j).map(|t| t.kind) == Some(TokenKind::Identifier)
                && tokens.get(j + 1).map(|t| t.kind) == Some(TokenKind::RParen)
            {
                return Some(j);
            }
        }
        i += 1;
    }
    None
}

/// Extract top-level variable declarations.
///
/// Function bodies are skipped wholesale via brace matching, so local
/// variables, loop counters and `return` statements can never be mistaken
/// for globals. Statements containing parentheses (function declarations,
/// calls, function-pointer variables) are excluded.
pub fn extract_globals(tokens: &[Token]) -> Vec<Field> {
    let mut globals = Vec::new();
    let mut stmt: Vec<Token> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::Include | TokenKind::Define | TokenKind::Preprocessor => i += 1,
            TokenKind::LBrace => {
                let Some(close) = find_matching(tokens, i, TokenKind::LBrace, TokenKind::RBrace)
                else {
                    // Truncated block: nothing after it is well-bounded
                    break;
                };
                let is_record = stmt
                    .iter()
                    .any(|t| matches!(t.kind, TokenKind::Struct | TokenKind::Enum | TokenKind::Union));
                let is_initializer = stmt.iter().any(|t| t.kind == TokenKind::Assign);
                let has_paren = stmt.iter().any(|t| t.kind == TokenKind::LParen);
                if (is_record || is_initializer) && !has_paren {
                    // `struct X { ... } name;` or `int a[] = { ... };`:
                    // keep the prefix, drop the braced part, continue
                    // collecting the rest of the statement
                    i = close + 1;
                } else {
                    // Function body
                    stmt.clear();
                    i = close + 1;
                }
            }
            TokenKind::Semicolon => {
                flush_global_statement(&stmt, &mut globals);
                stmt.clear();
                i += 1;
            }
            _ => {
                stmt.push(tokens[i].clone());
                i += 1;
            }
        }
    }

    globals
}

fn flush_global_statement(stmt: &[Token], globals: &mut Vec<Field>) {
    if stmt.is_empty() {
        return;
    }
    if stmt.iter().any(|t| {
        matches!(
            t.kind,
            TokenKind::Typedef | TokenKind::LParen | TokenKind::RParen
        )
    }) {
        return;
    }
    // Bare forward declaration: `struct X;`
    if matches!(
        stmt[0].kind,
        TokenKind::Struct | TokenKind::Enum | TokenKind::Union
    ) && stmt.len() <= 2
    {
        return;
    }

    // Storage class is not part of the type
    let cleaned: Vec<Token> = stmt
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Static | TokenKind::Extern))
        .cloned()
        .collect();
    let end = cleaned
        .iter()
        .position(|t| t.kind == TokenKind::Assign)
        .unwrap_or(cleaned.len());
    globals.extend(parse_field_declaration(&cleaned[..end]));
}

/// Extract typedefs with their relationship classification.
pub fn extract_typedefs(
    tokens: &[Token],
) -> (BTreeMap<String, String>, Vec<TypedefRelation>) {
    let mut typedefs = BTreeMap::new();
    let mut relations = Vec::new();
    let mut depth: u32 = 0;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::LBrace => {
                if find_matching(tokens, i, TokenKind::LBrace, TokenKind::RBrace).is_some() {
                    depth += 1;
                }
                i += 1;
            }
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            TokenKind::Typedef if depth == 0 => {
                i = parse_typedef_at(tokens, i, &mut typedefs, &mut relations);
            }
            _ => i += 1,
        }
    }

    (typedefs, relations)
}

/// Parse one typedef starting at the `typedef` keyword; returns the index to
/// resume scanning from.
fn parse_typedef_at(
    tokens: &[Token],
    start: usize,
    typedefs: &mut BTreeMap<String, String>,
    relations: &mut Vec<TypedefRelation>,
) -> usize {
    let mut j = start + 1;

    // typedef struct/enum/union [Tag] [{ ... }] Alias;
    if let Some(kw) = tokens.get(j).map(|t| t.kind) {
        if matches!(kw, TokenKind::Struct | TokenKind::Enum | TokenKind::Union) {
            let keyword = match kw {
                TokenKind::Struct => "struct",
                TokenKind::Enum => "enum",
                _ => "union",
            };
            let kind = match kw {
                TokenKind::Struct => TypedefKind::Struct,
                TokenKind::Enum => TypedefKind::Enum,
                _ => TypedefKind::Union,
            };
            let mut k = j + 1;
            let tag = match tokens.get(k) {
                Some(t) if t.kind == TokenKind::Identifier => {
                    k += 1;
                    Some(t.text.clone())
                }
                _ => None,
            };
            if tokens.get(k).map(|t| t.kind) == Some(TokenKind::LBrace) {
                match find_matching(tokens, k, TokenKind::LBrace, TokenKind::RBrace) {
                    Some(close) => k = close + 1,
                    None => return k + 1,
                }
            } else if tag.is_none() {
                // Neither tag nor body: malformed, skip the keyword
                return k;
            }
            let semi = next_semicolon(tokens, k);
            let alias = tokens[k..semi]
                .iter()
                .rev()
                .find(|t| t.kind == TokenKind::Identifier)
                .map(|t| t.text.clone());
            if let Some(alias) = alias {
                let original = tag.clone().unwrap_or_else(|| alias.clone());
                typedefs.insert(alias.clone(), format!("{keyword} {original}"));
                relations.push(
                    TypedefRelation::new(alias, original, kind)
                        .with_tag(tag.unwrap_or_default()),
                );
            }
            return semi + 1;
        }
    }

    // Plain alias or function pointer
    let semi = next_semicolon(tokens, j);
    let stmt = &tokens[j..semi];
    if stmt.is_empty() {
        return semi + 1;
    }

    if let Some(name_idx) = function_pointer_name(stmt) {
        let name = stmt[name_idx].text.clone();
        let mut rest = stmt.to_vec();
        rest.remove(name_idx);
        let underlying = render_tokens(&rest);
        typedefs.insert(name.clone(), underlying.clone());
        relations.push(TypedefRelation::new(
            name,
            underlying,
            TypedefKind::FunctionPointer,
        ));
        return semi + 1;
    }

    if stmt.iter().any(|t| t.kind == TokenKind::LParen) {
        // Some other parenthesized form (e.g. array-of-function-pointers);
        // best effort says skip it
        return semi + 1;
    }

    if let Some(name_idx) = stmt.iter().rposition(|t| t.kind == TokenKind::Identifier) {
        if name_idx > 0 {
            let name = stmt[name_idx].text.clone();
            let mut rest = stmt.to_vec();
            rest.remove(name_idx);
            let underlying = render_tokens(&rest);
            typedefs.insert(name.clone(), underlying.clone());
            relations.push(TypedefRelation::new(name, underlying, TypedefKind::Alias));
        }
    }
    semi + 1
}

fn next_semicolon(tokens: &[Token], from: usize) -> usize {
    tokens[from..]
        .iter()
        .position(|t| t.kind == TokenKind::Semicolon)
        .map(|p| from + p)
        .unwrap_or(tokens.len())
}

/// Associate functions to structs by naming convention: a function whose
/// name starts with a struct's name (case-insensitive) is listed among that
/// struct's methods.
pub fn associate_methods(structs: &mut BTreeMap<String, Struct>, functions: &[Function]) {
    for function in functions {
        let lower = function.name.to_lowercase();
        let owner = structs
            .keys()
            .find(|name| lower.starts_with(&name.to_lowercase()))
            .cloned();
        if let Some(owner) = owner {
            if let Some(item) = structs.get_mut(&owner) {
                item.methods.push(function.name.clone());
            }
        }
    }
}

/// Split a token run on commas at bracket depth zero.
fn split_on_commas(tokens: &[Token]) -> Vec<Vec<Token>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0i32;
    for token in tokens {
        match token.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                depth += 1;
                current.push(token.clone());
            }
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth -= 1;
                current.push(token.clone());
            }
            TokenKind::Comma if depth == 0 => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(token.clone()),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Parse one member/variable declaration into fields.
///
/// Handles pointers, arrays (`[N]` retained in the type), bitfields (width
/// retained), function-pointer members, initializers and multiple
/// declarators (`int x, *y, z[4];`). An unparsable declaration yields
/// nothing rather than garbage.
fn parse_field_declaration(tokens: &[Token]) -> Vec<Field> {
    if tokens.len() < 2 {
        return Vec::new();
    }
    let mut fields = Vec::new();
    let mut base_type: Option<String> = None;

    for (idx, segment) in split_on_commas(tokens).iter().enumerate() {
        if idx == 0 {
            match parse_declarator(segment) {
                Some((name, type_name, base)) => {
                    base_type = Some(base);
                    fields.push(Field::new(name, type_name));
                }
                None => return fields,
            }
        } else if let Some(base) = &base_type {
            let Some(name_idx) = segment.iter().rposition(|t| t.kind == TokenKind::Identifier)
            else {
                continue;
            };
            let name = segment[name_idx].text.clone();
            let mut decor = segment.to_vec();
            decor.remove(name_idx);
            let end = decor
                .iter()
                .position(|t| t.kind == TokenKind::Assign)
                .unwrap_or(decor.len());
            let decor_text = render_tokens(&decor[..end]);
            let type_name = if decor_text.is_empty() {
                base.clone()
            } else if decor_text.starts_with('[') {
                format!("{base}{decor_text}")
            } else {
                format!("{base} {decor_text}")
            };
            fields.push(Field::new(name, type_name));
        }
    }

    fields
}

/// Parse the first declarator of a declaration. Returns the declared name,
/// its full type string, and the base type later declarators share.
fn parse_declarator(segment: &[Token]) -> Option<(String, String, String)> {
    if let Some(name_idx) = function_pointer_name(segment) {
        let name = segment[name_idx].text.clone();
        let mut rest = segment.to_vec();
        rest.remove(name_idx);
        let type_name = render_tokens(&rest);
        return Some((name, type_name.clone(), type_name));
    }

    // The name cannot sit past an array bound, bitfield width or initializer
    let limit = segment
        .iter()
        .position(|t| {
            matches!(
                t.kind,
                TokenKind::LBracket | TokenKind::Colon | TokenKind::Assign
            )
        })
        .unwrap_or(segment.len());
    let name_idx = segment[..limit]
        .iter()
        .rposition(|t| t.kind == TokenKind::Identifier)?;
    if name_idx == 0 {
        return None;
    }

    let name = segment[name_idx].text.clone();
    let init = segment
        .iter()
        .position(|t| t.kind == TokenKind::Assign)
        .unwrap_or(segment.len());
    let mut type_tokens: Vec<Token> = segment[..init].to_vec();
    type_tokens.remove(name_idx);
    let type_name = render_tokens(&type_tokens);

    // Base type for later declarators: the leading tokens, pointers stripped
    let mut base_end = name_idx;
    while base_end > 0 && segment[base_end - 1].kind == TokenKind::Asterisk {
        base_end -= 1;
    }
    let base = render_tokens(&segment[..base_end]);

    Some((name, type_name, base))
}
