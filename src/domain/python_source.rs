//! Lightweight structural scanner for Python source files.
//!
//! Not a parser: it folds physical lines into logical lines (joining
//! bracketed and backslash-continued lines, dropping comments and string
//! contents) and recognizes `import`, `from … import`, top-level `class`
//! statements and the `def`s directly inside each class body.

/// How a module was imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import a.b`
    Import,
    /// `from a.b import c`
    From,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStmt {
    pub line: usize,
    pub kind: ImportKind,
    /// Dotted module name. Leading dots of relative imports are stripped.
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub line: usize,
    pub name: String,
    /// Base class names; for dotted bases only the last segment is kept.
    pub bases: Vec<String>,
    /// Names of plain `def`s directly in the class body.
    pub methods: Vec<String>,
}

impl ClassDef {
    pub fn has_base(&self, name: &str) -> bool {
        self.bases.iter().any(|b| b == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PythonModule {
    pub imports: Vec<ImportStmt>,
    pub classes: Vec<ClassDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    line: usize,
    indent: usize,
    text: String,
}

pub fn scan(source: &str) -> PythonModule {
    let lines = logical_lines(source);
    let mut module = PythonModule::default();

    let mut i = 0;
    while i < lines.len() {
        let current = &lines[i];
        for stmt in current.text.split(';') {
            collect_imports(stmt.trim(), current.line, &mut module.imports);
        }

        if current.indent == 0 {
            if let Some((name, bases, inline_body)) = parse_class_header(&current.text) {
                let mut class = ClassDef {
                    line: current.line,
                    name,
                    bases,
                    methods: Vec::new(),
                };
                if let Some(body) = inline_body {
                    for stmt in body.split(';') {
                        if let Some(m) = def_name(stmt.trim()) {
                            class.methods.push(m);
                        }
                    }
                }

                let mut body_indent = None;
                let mut j = i + 1;
                while j < lines.len() && lines[j].indent > 0 {
                    let line = &lines[j];
                    for stmt in line.text.split(';') {
                        collect_imports(stmt.trim(), line.line, &mut module.imports);
                    }
                    let indent = *body_indent.get_or_insert(line.indent);
                    if line.indent == indent {
                        if let Some(m) = def_name(&line.text) {
                            class.methods.push(m);
                        }
                    }
                    j += 1;
                }
                module.classes.push(class);
                i = j;
                continue;
            }
        }
        i += 1;
    }

    module
}

/// Statement keywords whose body may follow the `:` on the same line.
const BLOCK_KEYWORDS: [&str; 12] = [
    "if", "elif", "else", "try", "except", "finally", "with", "for", "while", "def", "class",
    "async",
];

fn collect_imports(stmt: &str, line: usize, out: &mut Vec<ImportStmt>) {
    if let Some(rest) = strip_keyword(stmt, "import") {
        for alias in rest.split(',') {
            let alias = alias.trim().trim_matches(|c| c == '(' || c == ')');
            if let Some(module) = alias.split_whitespace().next() {
                out.push(ImportStmt {
                    line,
                    kind: ImportKind::Import,
                    module: module.to_string(),
                });
            }
        }
    } else if let Some(rest) = strip_keyword(stmt, "from") {
        // `from . import x` yields an empty module name
        let (module, names) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let names = names.trim_start();
        let imports = names
            .strip_prefix("import")
            .is_some_and(|r| r.starts_with(|c: char| c.is_whitespace() || c == '('));
        if imports {
            out.push(ImportStmt {
                line,
                kind: ImportKind::From,
                module: module.trim_start_matches('.').to_string(),
            });
        }
    } else if let Some(body) = inline_block_body(stmt) {
        collect_imports(body.trim(), line, out);
    }
}

/// `"try: import x"` → `Some(" import x")`.
fn inline_block_body(stmt: &str) -> Option<&str> {
    let keyword = BLOCK_KEYWORDS.iter().find(|kw| {
        stmt.strip_prefix(**kw)
            .is_some_and(|r| r.starts_with(|c: char| c.is_whitespace() || c == ':' || c == '('))
    })?;
    let header = &stmt[keyword.len()..];
    let colon = top_level_colon(header)?;
    Some(&header[colon + 1..])
}

/// First `:` outside brackets that is not part of `:=`.
fn top_level_colon(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = s.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 && chars.peek().map(|(_, c)| *c) != Some('=') => return Some(idx),
            _ => {}
        }
    }
    None
}

/// `"import x"` → `Some("x")`; does not match `"important"`.
fn strip_keyword<'a>(stmt: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = stmt.strip_prefix(keyword)?;
    if rest.starts_with(|c: char| c.is_whitespace() || c == '.') {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn def_name(stmt: &str) -> Option<String> {
    let rest = strip_keyword(stmt, "def")?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() { None } else { Some(name) }
}

type ClassHeader = (String, Vec<String>, Option<String>);

fn parse_class_header(text: &str) -> Option<ClassHeader> {
    let rest = strip_keyword(text, "class")?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        return None;
    }
    let after_name = rest[name.len()..].trim_start();

    let (bases_src, after_bases) = if let Some(inner) = after_name.strip_prefix('(') {
        let close = matching_paren(inner)?;
        (&inner[..close], inner[close + 1..].trim_start())
    } else {
        ("", after_name)
    };

    let body = after_bases.strip_prefix(':')?.trim();
    let inline_body = if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    };

    let bases = split_top_level(bases_src)
        .into_iter()
        .filter_map(|base| {
            let base = base.trim();
            if base.is_empty() || base.contains('=') || base.starts_with('*') {
                return None;
            }
            if !base
                .split('.')
                .all(crate::domain::naming::is_identifier)
            {
                return None;
            }
            base.rsplit('.').next().map(str::to_string)
        })
        .collect();

    Some((name, bases, inline_body))
}

fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in s.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in s.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut chars = source.chars().peekable();
    let mut text = String::new();
    let mut depth = 0usize;
    let mut line = 1usize;
    let mut start_line = 1usize;

    let finish = |text: &mut String, start_line: usize, out: &mut Vec<LogicalLine>| {
        let indent = text
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            out.push(LogicalLine {
                line: start_line,
                indent,
                text: trimmed.to_string(),
            });
        }
        text.clear();
    };

    while let Some(ch) = chars.next() {
        match ch {
            '#' => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '\'' | '"' => {
                let triple = {
                    let mut ahead = chars.clone();
                    ahead.next() == Some(ch) && ahead.next() == Some(ch)
                };
                if triple {
                    chars.next();
                    chars.next();
                }
                let mut run = 0;
                loop {
                    // unterminated single-quoted string ends at the newline
                    if !triple && chars.peek() == Some(&'\n') {
                        break;
                    }
                    let Some(c) = chars.next() else { break };
                    match c {
                        '\\' => {
                            if chars.next() == Some('\n') {
                                line += 1;
                            }
                            run = 0;
                        }
                        '\n' => {
                            line += 1;
                            run = 0;
                        }
                        c if c == ch => {
                            run += 1;
                            if !triple || run == 3 {
                                break;
                            }
                        }
                        _ => run = 0,
                    }
                }
                text.push_str("\"\"");
            }
            '(' | '[' | '{' => {
                depth += 1;
                text.push(ch);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                text.push(ch);
            }
            '\\' if chars.peek() == Some(&'\n') => {
                chars.next();
                line += 1;
                text.push(' ');
            }
            '\n' => {
                line += 1;
                if depth > 0 {
                    text.push(' ');
                } else {
                    finish(&mut text, start_line, &mut out);
                    start_line = line;
                }
            }
            '\r' => {}
            _ => text.push(ch),
        }
    }
    finish(&mut text, start_line, &mut out);
    out
}
