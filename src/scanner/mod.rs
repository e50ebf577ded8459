//! Context-aware source scanner.
//!
//! The scanner walks source text in a single pass, tracking lexical context
//! (comments, quoted literals, template placeholders, parenthesized groups)
//! without building an AST, and captures calls to configured marker functions
//! together with their raw argument lists and exact line/column positions.
//!
//! Context entry is an explicit recursive frame over a [`Cursor`]: each
//! nested construct is scanned by a recursive `scan_context` call that
//! consumes its own closer and hands the cursor back to the caller. Reaching
//! end of input inside a nested context closes it implicitly; `strict` mode
//! turns that into an error instead.
//!
//! The same walker, restricted to a `,` closer, splits a captured argument
//! list into top-level arguments, so commas inside nested calls or literals
//! are never treated as separators.

pub mod patterns;
pub mod record;

use anyhow::{Result, bail};

use crate::scanner::patterns::PatternTable;

/// A position in the scanned text: 1-based line, 1-based column counted in
/// characters from the last line start, and the absolute character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// The three quote kinds. Inside any quoted literal the other quote
/// characters are inert; only the template kind re-enters full scanning
/// through `${…}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
    Template,
}

impl QuoteKind {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            '`' => Some(Self::Template),
            _ => None,
        }
    }

    pub fn quote_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Template => '`',
        }
    }

    /// Whether `${…}` placeholders are recognized inside this quote kind.
    pub fn allows_placeholders(self) -> bool {
        matches!(self, Self::Template)
    }
}

/// Lexical context of one scan frame. Each variant carries its own closing
/// condition; contexts nest by recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalContext {
    TopLevel,
    /// Closed by `*/`.
    BlockComment,
    /// Closed by the next line break.
    LineComment,
    /// Closed by the same quote character that opened it.
    Quoted(QuoteKind),
    /// `${…}` inside a template literal; closed by `}`.
    Placeholder,
    /// A parenthesized group or a closer-seeking capture; closed by the
    /// carried character (`)` or `,`).
    Arguments(char),
}

impl LexicalContext {
    /// Whether comments, quotes and `(` groups are recognized in this
    /// context. Comments and quoted literals are opaque: everything inside
    /// them is inert except their own closer (and escapes).
    fn recognizes_nesting(self) -> bool {
        matches!(
            self,
            Self::TopLevel | Self::Placeholder | Self::Arguments(_)
        )
    }

    fn describe(self) -> &'static str {
        match self {
            Self::TopLevel => "input",
            Self::BlockComment => "block comment",
            Self::LineComment => "line comment",
            Self::Quoted(_) => "quoted literal",
            Self::Placeholder => "template placeholder",
            Self::Arguments(_) => "argument list",
        }
    }
}

/// One matched marker call: the marker name, where it starts, the raw text
/// from the marker through its matching closing parenthesis, the raw
/// argument-list text between the parentheses, and the source line the call
/// starts on (kept for diagnostics).
#[derive(Debug, Clone)]
pub struct RawCallSite {
    pub name: String,
    pub position: SourcePosition,
    pub snippet: String,
    pub arguments: String,
    pub source_line: String,
}

/// Scan cursor: absolute character offset plus line accounting. Column is
/// derived from the offset of the current line start.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: usize,
    line: usize,
    line_start: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.offset - self.line_start + 1,
            offset: self.offset,
        }
    }

    /// Consume one line break. LF, CR, CR+LF and LF+CR each count as exactly
    /// one line.
    fn consume_newline(&mut self, chars: &[char]) {
        let pair = if chars[self.offset] == '\r' { '\n' } else { '\r' };
        self.offset += 1;
        self.line += 1;
        if self.offset < chars.len() && chars[self.offset] == pair {
            self.offset += 1;
        }
        self.line_start = self.offset;
    }
}

/// Single-pass marker-call scanner over a compiled pattern table.
pub struct Scanner<'a> {
    table: &'a PatternTable,
    strict: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(table: &'a PatternTable, strict: bool) -> Self {
        Self { table, strict }
    }

    /// Scan a whole text and return every captured marker call, in source
    /// order. Errors only in strict mode, on an unterminated construct.
    pub fn scan(&self, text: &str) -> Result<Vec<RawCallSite>> {
        let chars: Vec<char> = text.chars().collect();
        let mut cursor = Cursor::new();
        let mut sites = Vec::new();
        self.scan_context(
            &chars,
            &mut cursor,
            LexicalContext::TopLevel,
            true,
            &mut sites,
        )?;
        Ok(sites)
    }

    /// Split a captured argument-list text into its top-level arguments.
    ///
    /// Always yields at least one (possibly empty) trimmed argument. Nested
    /// parens, quotes and comments hide their commas, so `"a, b", f(1,2)`
    /// splits into exactly two arguments. Marker calls matched while
    /// splitting are discarded; the capturing scan already extracted them.
    pub fn split_arguments(&self, arguments: &str) -> Vec<String> {
        let chars: Vec<char> = arguments.chars().collect();
        // The text was validated by the capturing scan; re-scanning it is
        // always lenient.
        let lenient = Scanner {
            table: self.table,
            strict: false,
        };

        let mut cursor = Cursor::new();
        let mut discarded = Vec::new();
        let mut parts = Vec::new();

        loop {
            let from = cursor.offset;
            let closed = lenient
                .scan_context(
                    &chars,
                    &mut cursor,
                    LexicalContext::Arguments(','),
                    false,
                    &mut discarded,
                )
                .unwrap_or(false);

            let to = if closed { cursor.offset - 1 } else { cursor.offset };
            let part: String = chars[from..to].iter().collect();
            parts.push(part.trim().to_string());

            if cursor.offset >= chars.len() {
                break;
            }
        }

        parts
    }

    /// Scan one context until its closer or end of input.
    ///
    /// Returns `Ok(true)` when the closer was found and consumed, `Ok(false)`
    /// when the context was closed implicitly by end of input. `extract`
    /// controls call detection; it is inherited by parenthesized groups and
    /// forced on inside template placeholders.
    fn scan_context(
        &self,
        chars: &[char],
        cursor: &mut Cursor,
        context: LexicalContext,
        extract: bool,
        sites: &mut Vec<RawCallSite>,
    ) -> Result<bool> {
        while cursor.offset < chars.len() {
            let c = chars[cursor.offset];

            if c == '\r' || c == '\n' {
                cursor.consume_newline(chars);
                if matches!(context, LexicalContext::LineComment) {
                    return Ok(true);
                }
                continue;
            }

            // A backslash consumes the following character as an inert unit
            // in every context, comments included.
            if c == '\\' {
                cursor.offset += 2;
                continue;
            }

            match context {
                LexicalContext::BlockComment
                    if c == '*' && chars.get(cursor.offset + 1) == Some(&'/') =>
                {
                    cursor.offset += 2;
                    return Ok(true);
                }
                LexicalContext::Quoted(kind) if c == kind.quote_char() => {
                    cursor.offset += 1;
                    return Ok(true);
                }
                LexicalContext::Placeholder if c == '}' => {
                    cursor.offset += 1;
                    return Ok(true);
                }
                LexicalContext::Arguments(closer) if c == closer => {
                    cursor.offset += 1;
                    return Ok(true);
                }
                _ => {}
            }

            if let LexicalContext::Quoted(kind) = context
                && kind.allows_placeholders()
                && c == '$'
                && chars.get(cursor.offset + 1) == Some(&'{')
            {
                cursor.offset += 2;
                self.scan_context(chars, cursor, LexicalContext::Placeholder, true, sites)?;
                continue;
            }

            if context.recognizes_nesting() {
                if c == '/' {
                    match chars.get(cursor.offset + 1) {
                        Some('*') => {
                            cursor.offset += 2;
                            self.scan_context(
                                chars,
                                cursor,
                                LexicalContext::BlockComment,
                                false,
                                sites,
                            )?;
                            continue;
                        }
                        Some('/') => {
                            cursor.offset += 2;
                            self.scan_context(
                                chars,
                                cursor,
                                LexicalContext::LineComment,
                                false,
                                sites,
                            )?;
                            continue;
                        }
                        // A lone slash is a plain character.
                        _ => {
                            cursor.offset += 1;
                            continue;
                        }
                    }
                }

                if let Some(kind) = QuoteKind::from_char(c) {
                    cursor.offset += 1;
                    self.scan_context(chars, cursor, LexicalContext::Quoted(kind), false, sites)?;
                    continue;
                }

                // A balanced group: keeps a closer-seeking scan from stopping
                // at a nested `)` or splitting at a nested `,`.
                if c == '(' {
                    cursor.offset += 1;
                    self.scan_context(
                        chars,
                        cursor,
                        LexicalContext::Arguments(')'),
                        extract,
                        sites,
                    )?;
                    continue;
                }

                if extract && self.try_capture_call(chars, cursor, sites)? {
                    continue;
                }
            }

            cursor.offset += 1;
        }

        // End of input is a natural end for a line comment; everything else
        // left open is flagged in strict mode.
        if self.strict
            && !matches!(
                context,
                LexicalContext::TopLevel | LexicalContext::LineComment
            )
        {
            bail!(
                "Unterminated {} reached end of input (line {})",
                context.describe(),
                cursor.line
            );
        }

        Ok(false)
    }

    /// Try to capture a marker call at the cursor. On a match the cursor ends
    /// after the matching `)` (or at end of input) and a [`RawCallSite`] is
    /// recorded.
    fn try_capture_call(
        &self,
        chars: &[char],
        cursor: &mut Cursor,
        sites: &mut Vec<RawCallSite>,
    ) -> Result<bool> {
        let Some((name, after_open)) = self.match_marker(chars, *cursor) else {
            return Ok(false);
        };

        let position = cursor.position();
        let source_line = line_text(chars, cursor.line_start);
        let snippet_from = cursor.offset;

        *cursor = after_open;
        let arguments_from = cursor.offset;

        // Find the true matching parenthesis: the recursive scan skips
        // nested parens, quotes and comments. Extraction stays off, except
        // inside template placeholders within the arguments.
        let closed = self.scan_context(
            chars,
            cursor,
            LexicalContext::Arguments(')'),
            false,
            sites,
        )?;

        let arguments_to = if closed {
            cursor.offset - 1
        } else {
            cursor.offset
        };
        let snippet: String = chars[snippet_from..cursor.offset].iter().collect();
        let arguments: String = chars[arguments_from..arguments_to].iter().collect();

        sites.push(RawCallSite {
            name,
            position,
            snippet: snippet.trim().to_string(),
            arguments: arguments.trim().to_string(),
            source_line,
        });

        Ok(true)
    }

    /// Match a marker name at the cursor: the literal name, optional
    /// whitespace, then `(`. Entries are tried in table order and the first
    /// match wins. Returns the name and the cursor just past the `(`.
    fn match_marker(&self, chars: &[char], cursor: Cursor) -> Option<(String, Cursor)> {
        'entries: for (name, _) in self.table.iter() {
            let mut probe = cursor;

            for expected in name.chars() {
                if chars.get(probe.offset) == Some(&expected) {
                    probe.offset += 1;
                } else {
                    continue 'entries;
                }
            }

            loop {
                match chars.get(probe.offset) {
                    Some(' ' | '\t' | '\u{0B}') => probe.offset += 1,
                    Some('\r' | '\n') => probe.consume_newline(chars),
                    _ => break,
                }
            }

            if chars.get(probe.offset) == Some(&'(') {
                probe.offset += 1;
                return Some((name.clone(), probe));
            }
        }

        None
    }
}

/// The text of the line starting at `line_start`, up to the next line break.
fn line_text(chars: &[char], line_start: usize) -> String {
    chars[line_start..]
        .iter()
        .take_while(|&&c| c != '\n' && c != '\r')
        .collect()
}
