//! Custom transform host: a restricted script language over `{text, metadata}`.
//!
//! Operator-authored transforms run in a small interpreter with exactly two
//! bindings and no other capabilities: no I/O, no host evaluation, no way to
//! reach outside the file being edited.
//!
//! Grammar:
//! ```text
//! program = stmt (SEP stmt)*
//! stmt    = "delete" "metadata" "[" STRING "]"
//!         | target "=" expr
//! target  = "text" | "metadata" "[" STRING "]"
//! expr    = term ("+" term)*
//! term    = STRING | target | FUNC "(" expr ("," expr)* ")"
//! ```
//! Statements are separated by newlines or `;`; `#` starts a comment.
//! Functions: `replace(s, from, to)` (literal), `replace_re(s, pattern, repl)`,
//! `lower(s)`, `upper(s)`, `trim(s)`.
//!
//! Example:
//! ```text
//! text = replace(text, "sample", "replacement")
//! metadata["new-property"] = "new value"
//! delete metadata["old-property"]
//! ```

use crate::engine::stringify_value;
use crate::error::{Result, WrangleError};
use crate::types::Metadata;
use regex::Regex;
use serde_yaml::Value;

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// An identifier: a binding, keyword, or function name.
    Ident(String),
    /// A quoted string literal, escapes resolved.
    Str(String),
    Assign,
    Plus,
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    /// Statement separator (newline or `;`).
    Sep,
}

fn script_err(message: impl Into<String>) -> WrangleError {
    WrangleError::Script(message.into())
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch == ' ' || ch == '\t' || ch == '\r' {
            i += 1;
            continue;
        }

        if ch == '\n' || ch == ';' {
            tokens.push(Token::Sep);
            i += 1;
            continue;
        }

        // Comment to end of line.
        if ch == '#' {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        if ch == '"' || ch == '\'' {
            let quote = ch;
            i += 1;
            let mut s = String::new();
            loop {
                if i >= len {
                    return Err(script_err("unterminated string literal"));
                }
                let c = chars[i];
                if c == quote {
                    i += 1;
                    break;
                }
                if c == '\\' {
                    i += 1;
                    if i >= len {
                        return Err(script_err("unterminated escape in string literal"));
                    }
                    s.push(match chars[i] {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                } else {
                    s.push(c);
                }
                i += 1;
            }
            tokens.push(Token::Str(s));
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let start = i;
            while i < len && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
            continue;
        }

        let token = match ch {
            '=' => Token::Assign,
            '+' => Token::Plus,
            ',' => Token::Comma,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            other => return Err(script_err(format!("unexpected character '{}'", other))),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

// ============================================================================
// AST
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Target {
    Text,
    MetadataKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Replace,
    ReplaceRe,
    Lower,
    Upper,
    Trim,
}

impl Func {
    fn resolve(name: &str) -> Option<(Func, usize)> {
        match name {
            "replace" => Some((Func::Replace, 3)),
            "replace_re" => Some((Func::ReplaceRe, 3)),
            "lower" => Some((Func::Lower, 1)),
            "upper" => Some((Func::Upper, 1)),
            "trim" => Some((Func::Trim, 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(String),
    Read(Target),
    Call { func: Func, args: Vec<Expr> },
    Concat(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Stmt {
    Assign { target: Target, expr: Expr },
    Delete { key: String },
}

// ============================================================================
// Parser
// ============================================================================

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token, context: &str) -> Result<()> {
        match self.advance() {
            Some(ref tok) if tok == expected => Ok(()),
            Some(tok) => Err(script_err(format!(
                "expected {:?} {}, got {:?}",
                expected, context, tok
            ))),
            None => Err(script_err(format!(
                "expected {:?} {}, got end of script",
                expected, context
            ))),
        }
    }

    fn parse_program(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            while self.peek() == Some(&Token::Sep) {
                self.advance();
            }
            if self.peek().is_none() {
                break;
            }
            stmts.push(self.parse_stmt()?);
            match self.peek() {
                None | Some(Token::Sep) => {}
                Some(tok) => {
                    return Err(script_err(format!(
                        "expected end of statement, got {:?}",
                        tok
                    )));
                }
            }
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        if self.peek() == Some(&Token::Ident("delete".to_string())) {
            self.advance();
            match self.parse_target()? {
                Target::MetadataKey(key) => return Ok(Stmt::Delete { key }),
                Target::Text => return Err(script_err("cannot delete 'text'")),
            }
        }

        let target = self.parse_target()?;
        self.expect(&Token::Assign, "after assignment target")?;
        let expr = self.parse_expr()?;
        Ok(Stmt::Assign { target, expr })
    }

    fn parse_target(&mut self) -> Result<Target> {
        match self.advance() {
            Some(Token::Ident(name)) if name == "text" => Ok(Target::Text),
            Some(Token::Ident(name)) if name == "metadata" => {
                self.expect(&Token::OpenBracket, "after 'metadata'")?;
                let key = match self.advance() {
                    Some(Token::Str(key)) => key,
                    Some(tok) => {
                        return Err(script_err(format!(
                            "metadata key must be a string literal, got {:?}",
                            tok
                        )));
                    }
                    None => return Err(script_err("expected metadata key, got end of script")),
                };
                self.expect(&Token::CloseBracket, "after metadata key")?;
                Ok(Target::MetadataKey(key))
            }
            Some(tok) => Err(script_err(format!(
                "expected 'text' or 'metadata[...]', got {:?}",
                tok
            ))),
            None => Err(script_err("expected a statement, got end of script")),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut terms = vec![self.parse_term()?];
        while self.peek() == Some(&Token::Plus) {
            self.advance();
            terms.push(self.parse_term()?);
        }
        if terms.len() == 1 {
            Ok(terms.into_iter().next().unwrap())
        } else {
            Ok(Expr::Concat(terms))
        }
    }

    fn parse_term(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Str(_)) => match self.advance() {
                Some(Token::Str(s)) => Ok(Expr::Literal(s)),
                _ => unreachable!(),
            },
            Some(Token::Ident(name)) if name == "text" || name == "metadata" => {
                Ok(Expr::Read(self.parse_target()?))
            }
            Some(Token::Ident(_)) => self.parse_call(),
            Some(tok) => Err(script_err(format!("unexpected token {:?}", tok))),
            None => Err(script_err("expected an expression, got end of script")),
        }
    }

    fn parse_call(&mut self) -> Result<Expr> {
        let name = match self.advance() {
            Some(Token::Ident(name)) => name,
            _ => unreachable!(),
        };
        let (func, arity) = Func::resolve(&name)
            .ok_or_else(|| script_err(format!("unknown function '{}'", name)))?;

        self.expect(&Token::OpenParen, &format!("after '{}'", name))?;
        let mut args = vec![self.parse_expr()?];
        while self.peek() == Some(&Token::Comma) {
            self.advance();
            args.push(self.parse_expr()?);
        }
        self.expect(&Token::CloseParen, "to close the argument list")?;

        if args.len() != arity {
            return Err(script_err(format!(
                "'{}' takes {} argument(s), got {}",
                name,
                arity,
                args.len()
            )));
        }
        Ok(Expr::Call { func, args })
    }
}

// ============================================================================
// Program
// ============================================================================

/// A parsed transform script, compiled once per batch.
#[derive(Debug, Clone)]
pub struct Program {
    stmts: Vec<Stmt>,
}

impl Program {
    /// Parse a script; malformed input is surfaced before any file is
    /// touched.
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = tokenize(source)?;
        let stmts = Parser::new(tokens).parse_program()?;
        Ok(Self { stmts })
    }

    /// Run the script against one file's text and metadata, returning the
    /// new pair. The inputs are never mutated.
    pub fn run(&self, text: &str, metadata: &Metadata) -> Result<(String, Metadata)> {
        let mut text = text.to_string();
        let mut metadata = metadata.clone();

        for stmt in &self.stmts {
            match stmt {
                Stmt::Assign { target, expr } => {
                    let value = eval(expr, &text, &metadata)?;
                    match target {
                        Target::Text => text = value,
                        Target::MetadataKey(key) => {
                            metadata.insert(Value::String(key.clone()), Value::String(value));
                        }
                    }
                }
                Stmt::Delete { key } => {
                    metadata.remove(key.as_str());
                }
            }
        }

        Ok((text, metadata))
    }
}

fn eval(expr: &Expr, text: &str, metadata: &Metadata) -> Result<String> {
    match expr {
        Expr::Literal(s) => Ok(s.clone()),
        Expr::Read(Target::Text) => Ok(text.to_string()),
        Expr::Read(Target::MetadataKey(key)) => Ok(metadata
            .get(key.as_str())
            .map(stringify_value)
            .unwrap_or_default()),
        Expr::Concat(terms) => {
            let mut out = String::new();
            for term in terms {
                out.push_str(&eval(term, text, metadata)?);
            }
            Ok(out)
        }
        Expr::Call { func, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, text, metadata)?);
            }
            match func {
                Func::Replace => Ok(values[0].replace(&values[1], &values[2])),
                Func::ReplaceRe => {
                    let re = Regex::new(&values[1])
                        .map_err(|e| script_err(format!("replace_re: {}", e)))?;
                    Ok(re.replace_all(&values[0], values[2].as_str()).into_owned())
                }
                Func::Lower => Ok(values[0].to_lowercase()),
                Func::Upper => Ok(values[0].to_uppercase()),
                Func::Trim => Ok(values[0].trim().to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(script: &str, text: &str) -> (String, Metadata) {
        Program::parse(script).unwrap().run(text, &Metadata::new()).unwrap()
    }

    #[test]
    fn test_text_assignment() {
        let (text, _) = run("text = \"rewritten\"", "original");
        assert_eq!(text, "rewritten");
    }

    #[test]
    fn test_replace_literal() {
        let (text, _) = run("text = replace(text, \"sample\", \"replacement\")", "a sample here");
        assert_eq!(text, "a replacement here");
    }

    #[test]
    fn test_replace_re() {
        let (text, _) = run(
            "text = replace_re(text, \"c.t\", \"dog\")",
            "cat cot cut",
        );
        assert_eq!(text, "dog dog dog");
    }

    #[test]
    fn test_metadata_set_and_delete() {
        let mut metadata = Metadata::new();
        metadata.insert(Value::String("old".into()), Value::String("x".into()));

        let program = Program::parse(
            "metadata[\"new-property\"] = \"new value\"\ndelete metadata[\"old\"]",
        )
        .unwrap();
        let (_, out) = program.run("body", &metadata).unwrap();

        assert_eq!(out.get("new-property"), Some(&Value::String("new value".into())));
        assert!(out.get("old").is_none());
        // Input mapping untouched.
        assert!(metadata.get("old").is_some());
    }

    #[test]
    fn test_read_metadata_into_text() {
        let mut metadata = Metadata::new();
        metadata.insert(Value::String("title".into()), Value::String("My Note".into()));

        let program = Program::parse("text = metadata[\"title\"] + \": \" + text").unwrap();
        let (text, _) = program.run("body", &metadata).unwrap();
        assert_eq!(text, "My Note: body");
    }

    #[test]
    fn test_missing_metadata_key_reads_empty() {
        let (text, _) = run("text = metadata[\"absent\"] + text", "body");
        assert_eq!(text, "body");
    }

    #[test]
    fn test_functions_and_comments() {
        let script = "# normalize the body\ntext = trim(upper(text))  # shout\n";
        let (text, _) = run(script, "  hello  ");
        assert_eq!(text, "HELLO");
    }

    #[test]
    fn test_semicolon_separator() {
        let (text, meta) = run("text = \"a\"; metadata[\"k\"] = \"v\"", "x");
        assert_eq!(text, "a");
        assert_eq!(meta.get("k"), Some(&Value::String("v".into())));
    }

    #[test]
    fn test_single_quoted_strings_and_escapes() {
        let (text, _) = run("text = 'line1\\nline2'", "x");
        assert_eq!(text, "line1\nline2");
    }

    #[test]
    fn test_parse_error_unknown_function() {
        let result = Program::parse("text = exec(\"rm -rf\")");
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }

    #[test]
    fn test_parse_error_arity() {
        let result = Program::parse("text = replace(text, \"a\")");
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }

    #[test]
    fn test_parse_error_delete_text() {
        let result = Program::parse("delete text");
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }

    #[test]
    fn test_parse_error_dynamic_key_rejected() {
        let result = Program::parse("metadata[text] = \"v\"");
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }

    #[test]
    fn test_runtime_error_bad_regex() {
        let program = Program::parse("text = replace_re(text, \"(oops\", \"x\")").unwrap();
        let result = program.run("body", &Metadata::new());
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }

    #[test]
    fn test_unterminated_string() {
        let result = Program::parse("text = \"oops");
        assert!(matches!(result, Err(WrangleError::Script(_))));
    }
}
