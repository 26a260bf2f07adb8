//! Planning edits to an `@NgModule` registration file.
//!
//! The module file is never parsed into a syntax tree. It is treated as text
//! with a small lexical pass that tells code apart from comments and string
//! literals, which is enough to find:
//!
//! - the import block (`import ... from '...';` statements),
//! - the `@NgModule({ ... })` metadata object,
//! - the `declarations` / `exports` / `imports` array literals inside it.
//!
//! Every edit is an insertion at a byte offset of the original content, so
//! the plan can be applied by any engine that understands insertions.
//! Insertions that would duplicate an existing registration are skipped.

use tracing::debug;

use crate::domain::{
    entities::{common::RelativePath, mutation::FileMutation, options::LibraryRegistration},
    error::DomainError,
};

/// What to register in a module file.
#[derive(Debug, Clone)]
pub struct RegistrationRequest<'a> {
    /// Class name, e.g. `FooComponent`.
    pub component_class: String,
    /// The generated `.component.ts` file.
    pub component_path: RelativePath,
    /// Also list the component in `exports`.
    pub export: bool,
    /// Grid library module to register when the module lacks it.
    pub library: Option<&'a LibraryRegistration>,
}

/// Plans insertions into a module registration file.
pub struct ModuleRewriter;

impl ModuleRewriter {
    /// Compute the insertions that register a component in `content`.
    ///
    /// Returns an empty list when everything is already registered.
    pub fn plan(
        module_path: &RelativePath,
        content: &str,
        request: &RegistrationRequest<'_>,
    ) -> Result<Vec<FileMutation>, DomainError> {
        let source = Source::new(content);
        let metadata = source.ng_module_metadata().ok_or_else(|| DomainError::AnchorNotFound {
            path: module_path.to_string(),
            anchor: "an @NgModule({ ... }) decorator".into(),
        })?;

        let imports = source.import_statements();
        let import_at = imports.first().map_or(0, |i| i.start);
        let quote = imports.first().map_or('\'', |i| i.quote);
        let eol = source.eol;

        let module_dir = module_path.parent().unwrap_or_else(RelativePath::root);
        let component_specifier =
            RelativePath::import_specifier(&module_dir, &request.component_path);

        let mut edits = Vec::new();
        let insert = |position: usize, anchor: &str, text: String| FileMutation::Insert {
            path: module_path.clone(),
            position,
            anchor: anchor.to_string(),
            text,
        };

        // library import goes above the component import
        let library = request.library.filter(|lib| {
            let present = imports.iter().any(|i| i.specifier == lib.import_specifier);
            if present {
                debug!(specifier = %lib.import_specifier, "Grid library already imported");
            }
            !present
        });

        if let Some(lib) = library {
            edits.push(insert(
                import_at,
                "import block",
                format!(
                    "import {{ {} }} from {quote}{}{quote};{eol}",
                    lib.module_symbol, lib.import_specifier
                ),
            ));
        }

        let component_imported = imports.iter().any(|i| {
            i.specifier == component_specifier && i.symbols.iter().any(|s| *s == request.component_class)
        });
        if component_imported {
            debug!(specifier = %component_specifier, "Component import already present");
        } else {
            edits.push(insert(
                import_at,
                "import block",
                format!(
                    "import {{ {} }} from {quote}{component_specifier}{quote};{eol}",
                    request.component_class
                ),
            ));
        }

        let mut register = |key: &str, symbol: &str| -> Result<(), DomainError> {
            let anchor = format!("NgModule.{key}");
            let edit = source
                .array_insertion(metadata, key, symbol)
                .map_err(|reason| DomainError::AnchorNotFound {
                    path: module_path.to_string(),
                    anchor: format!("{anchor} ({reason})"),
                })?;
            match edit {
                Some((position, text)) => edits.push(insert(position, &anchor, text)),
                None => debug!(%anchor, symbol, "Already registered"),
            }
            Ok(())
        };

        register("declarations", &request.component_class)?;
        if request.export {
            register("exports", &request.component_class)?;
        }
        if let Some(lib) = library {
            register("imports", &lib.module_symbol)?;
        }

        // properties added to `{}` share one offset; the last one closes the line
        let (open, close) = metadata;
        let inline_empty =
            source.trimmed(open + 1, close).is_none() && !source.text[open + 1..close].contains('\n');
        if inline_empty {
            let last_property = edits.iter_mut().rev().find_map(|m| match m {
                FileMutation::Insert { position, text, .. } if *position == open + 1 => Some(text),
                _ => None,
            });
            if let Some(text) = last_property {
                text.push_str(eol);
            }
        }

        Ok(edits)
    }
}

// ============================================================================
// Lexical scanning
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Comment,
    Str,
}

/// An `import ... from '...'` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportStatement {
    start: usize,
    specifier: String,
    /// Local names bound by the statement.
    symbols: Vec<String>,
    quote: char,
}

struct Source<'a> {
    text: &'a str,
    bytes: &'a [u8],
    kinds: Vec<Lexeme>,
    /// Line ending of the file, `\r\n` when it uses any.
    eol: &'static str,
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl<'a> Source<'a> {
    fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let len = bytes.len();
        let mut kinds = vec![Lexeme::Code; len];
        let mut i = 0;

        while i < len {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let end = text[i..].find('\n').map_or(len, |n| i + n);
                    kinds[i..end].fill(Lexeme::Comment);
                    i = end;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let end = text[i + 2..].find("*/").map_or(len, |n| i + 2 + n + 2);
                    kinds[i..end].fill(Lexeme::Comment);
                    i = end;
                }
                quote @ (b'\'' | b'"' | b'`') => {
                    let mut j = i + 1;
                    while j < len {
                        if bytes[j] == b'\\' {
                            j += 2;
                            continue;
                        }
                        j += 1;
                        if bytes[j - 1] == quote {
                            break;
                        }
                    }
                    let end = j.min(len);
                    kinds[i..end].fill(Lexeme::Str);
                    i = end;
                }
                _ => i += 1,
            }
        }

        let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            text,
            bytes,
            kinds,
            eol,
        }
    }

    fn is_code(&self, i: usize) -> bool {
        self.kinds.get(i) == Some(&Lexeme::Code)
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&self, mut i: usize) -> usize {
        while i < self.bytes.len()
            && (self.kinds[i] == Lexeme::Comment || self.bytes[i].is_ascii_whitespace())
        {
            i += 1;
        }
        i
    }

    /// First occurrence of `needle` starting in code at or after `from`.
    fn find_code(&self, needle: &str, from: usize) -> Option<usize> {
        self.text
            .get(from..)?
            .match_indices(needle)
            .map(|(offset, _)| from + offset)
            .find(|&i| self.is_code(i))
    }

    /// Index of the bracket closing the one at `open`.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth: i32 = 0;
        for i in open..self.bytes.len() {
            if !self.is_code(i) {
                continue;
            }
            match self.bytes[i] {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// `(open, close)` braces of the `@NgModule({ ... })` argument.
    fn ng_module_metadata(&self) -> Option<(usize, usize)> {
        let mut from = 0;
        while let Some(at) = self.find_code("@NgModule", from) {
            from = at + "@NgModule".len();
            let paren = self.skip_trivia(from);
            if self.bytes.get(paren) != Some(&b'(') {
                continue;
            }
            let brace = self.skip_trivia(paren + 1);
            if self.bytes.get(brace) != Some(&b'{') {
                continue;
            }
            if let Some(close) = self.matching_close(brace) {
                return Some((brace, close));
            }
        }
        None
    }

    fn import_statements(&self) -> Vec<ImportStatement> {
        let mut statements = Vec::new();
        let mut from = 0;

        while let Some(at) = self.find_code("import", from) {
            from = at + "import".len();

            let starts_statement = self.text[..at]
                .bytes()
                .rev()
                .find(|b| !matches!(b, b' ' | b'\t'))
                .is_none_or(|b| b == b'\n' || b == b';' || b == b'\r' || b == b'/');
            let next = self.bytes.get(from).copied();
            if !starts_statement || next.is_some_and(|b| is_ident(b) || b == b'(' || b == b'.') {
                continue;
            }

            // the first string literal after `import` is the specifier
            let Some(quote_at) = (from..self.bytes.len()).find(|&i| self.kinds[i] == Lexeme::Str)
            else {
                break;
            };
            if self.text[from..quote_at].contains(';') {
                continue;
            }
            let quote = self.bytes[quote_at];
            let Some(close) = self.text[quote_at + 1..].find(quote as char) else {
                break;
            };
            let specifier = self.text[quote_at + 1..quote_at + 1 + close].to_string();

            let clause = self.text[from..quote_at].trim();
            let clause = clause.strip_suffix("from").unwrap_or(clause).trim();
            let clause = clause.strip_prefix("type ").unwrap_or(clause);

            statements.push(ImportStatement {
                start: at,
                specifier,
                symbols: import_symbols(clause),
                quote: quote as char,
            });
            from = quote_at + 1 + close + 1;
        }

        statements
    }

    /// Top-level property `key` of the object `(open, close)`; returns the
    /// offset of its value.
    fn property_value(&self, (open, close): (usize, usize), key: &str) -> Option<usize> {
        let mut depth: i32 = 0;
        let mut i = open + 1;

        while i < close {
            if !self.is_code(i) {
                i += 1;
                continue;
            }
            let b = self.bytes[i];
            match b {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth -= 1,
                _ if depth == 0 && is_ident(b) => {
                    let start = i;
                    while i < close && self.is_code(i) && is_ident(self.bytes[i]) {
                        i += 1;
                    }
                    if &self.text[start..i] == key {
                        let colon = self.skip_trivia(i);
                        if self.bytes.get(colon) == Some(&b':') {
                            return Some(self.skip_trivia(colon + 1));
                        }
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// Trim whitespace and comments from both ends of `start..end`.
    fn trimmed(&self, mut start: usize, mut end: usize) -> Option<(usize, usize)> {
        start = self.skip_trivia(start);
        while end > start
            && (self.kinds[end - 1] == Lexeme::Comment || self.bytes[end - 1].is_ascii_whitespace())
        {
            end -= 1;
        }
        (start < end).then_some((start, end))
    }

    /// Element ranges of the array `(open, close)` plus its trailing comma.
    fn array_elements(&self, open: usize, close: usize) -> (Vec<(usize, usize)>, Option<usize>) {
        let mut depth: i32 = 0;
        let mut segment = open + 1;
        let mut elements = Vec::new();
        let mut last_comma = None;

        for i in open + 1..close {
            if !self.is_code(i) {
                continue;
            }
            match self.bytes[i] {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth -= 1,
                b',' if depth == 0 => {
                    elements.extend(self.trimmed(segment, i));
                    last_comma = Some(i);
                    segment = i + 1;
                }
                _ => {}
            }
        }

        let tail = self.trimmed(segment, close);
        let trailing_comma = match tail {
            Some(range) => {
                elements.push(range);
                None
            }
            None if !elements.is_empty() => last_comma,
            None => None,
        };
        (elements, trailing_comma)
    }

    /// Leading whitespace of the line containing `at`.
    fn line_indent(&self, at: usize) -> &'a str {
        let line_start = self.text[..at].rfind('\n').map_or(0, |n| n + 1);
        let line = &self.text[line_start..];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    /// Where and what to insert so that `symbol` is listed in `key`.
    ///
    /// `Ok(None)` means it is already listed.
    fn array_insertion(
        &self,
        metadata: (usize, usize),
        key: &str,
        symbol: &str,
    ) -> Result<Option<(usize, String)>, String> {
        let Some(value) = self.property_value(metadata, key) else {
            return Ok(Some(self.new_property(metadata, key, symbol)));
        };

        if self.bytes.get(value) != Some(&b'[') {
            return Err("value is not an array literal".into());
        }
        let close = self
            .matching_close(value)
            .ok_or_else(|| "array is not closed".to_string())?;

        let (elements, trailing_comma) = self.array_elements(value, close);
        if elements
            .iter()
            .any(|&(s, e)| self.text[s..e].trim() == symbol)
        {
            return Ok(None);
        }

        let Some(&(last_start, last_end)) = elements.last() else {
            return Ok(Some((value + 1, symbol.to_string())));
        };

        let multiline = self.text[value..last_start].contains('\n');
        let eol = self.eol;
        let edit = match (multiline, trailing_comma) {
            (true, None) => (
                last_end,
                format!(",{eol}{}{symbol}", self.line_indent(last_start)),
            ),
            (true, Some(comma)) => (
                comma + 1,
                format!("{eol}{}{symbol},", self.line_indent(last_start)),
            ),
            (false, None) => (last_end, format!(", {symbol}")),
            (false, Some(comma)) => (comma + 1, format!(" {symbol},")),
        };
        Ok(Some(edit))
    }

    /// Insertion that adds `key: [symbol],` as the first metadata property.
    fn new_property(&self, (open, close): (usize, usize), key: &str, symbol: &str) -> (usize, String) {
        let eol = self.eol;
        match self.trimmed(open + 1, close) {
            Some((first, _)) if self.text[open..first].contains('\n') => (
                open + 1,
                format!("{eol}{}{key}: [{symbol}],", self.line_indent(first)),
            ),
            Some(_) => (open + 1, format!(" {key}: [{symbol}],")),
            None => (
                open + 1,
                format!("{eol}{}  {key}: [{symbol}],", self.line_indent(open)),
            ),
        }
    }
}

/// Local names bound by an import clause such as `A, { B as C, D }`.
fn import_symbols(clause: &str) -> Vec<String> {
    let mut symbols = Vec::new();
    let (default_part, named_part) = match clause.find('{') {
        Some(open) => {
            let close = clause[open..].find('}').map_or(clause.len(), |c| open + c);
            (&clause[..open], Some(&clause[open + 1..close]))
        }
        None => (clause, None),
    };

    for part in default_part.split(',') {
        let part = part.trim();
        let local = part.rsplit(" as ").next().unwrap_or(part).trim();
        if !local.is_empty() && local != "*" {
            symbols.push(local.to_string());
        }
    }
    if let Some(named) = named_part {
        for part in named.split(',') {
            let local = part.rsplit(" as ").next().unwrap_or(part).trim();
            if !local.is_empty() {
                symbols.push(local.to_string());
            }
        }
    }
    symbols
}
