//! Environment marker evaluation for requirement strings such as
//! `importlib-metadata; python_version < "3.8"`.
//!
//! Supports `and`/`or`, parentheses, the comparison operators, `in` and
//! `not in`. Version-valued variables compare as versions when both sides
//! parse, otherwise as strings. The `extra` variable is always empty because
//! extras are never requested for transitive requirements.

use serde::{Deserialize, Serialize};

use pundler_util::errors::{PundlerError, PundlerResult};

use crate::version::{Constraint, Operator, Version};

/// The target interpreter/platform that markers are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarkerEnvironment {
    #[serde(default = "default_python_version")]
    pub python_version: String,
    #[serde(default)]
    pub python_full_version: Option<String>,
    #[serde(default = "default_sys_platform")]
    pub sys_platform: String,
    #[serde(default = "default_platform_system")]
    pub platform_system: String,
    #[serde(default = "default_os_name")]
    pub os_name: String,
    #[serde(default = "default_platform_machine")]
    pub platform_machine: String,
    #[serde(default = "default_implementation_name")]
    pub implementation_name: String,
}

impl Default for MarkerEnvironment {
    fn default() -> Self {
        Self {
            python_version: default_python_version(),
            python_full_version: None,
            sys_platform: default_sys_platform(),
            platform_system: default_platform_system(),
            os_name: default_os_name(),
            platform_machine: default_platform_machine(),
            implementation_name: default_implementation_name(),
        }
    }
}

fn default_python_version() -> String {
    "3.11".to_string()
}

fn default_sys_platform() -> String {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
    .to_string()
}

fn default_platform_system() -> String {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
    .to_string()
}

fn default_os_name() -> String {
    let name = if cfg!(windows) { "nt" } else { "posix" };
    name.to_string()
}

fn default_platform_machine() -> String {
    std::env::consts::ARCH.to_string()
}

fn default_implementation_name() -> String {
    "cpython".to_string()
}

impl MarkerEnvironment {
    fn lookup(&self, variable: &str) -> Option<String> {
        let value = match variable {
            "python_version" => self.python_version.clone(),
            "python_full_version" | "implementation_version" => self
                .python_full_version
                .clone()
                .unwrap_or_else(|| format!("{}.0", self.python_version)),
            "sys_platform" => self.sys_platform.clone(),
            "platform_system" => self.platform_system.clone(),
            "os_name" => self.os_name.clone(),
            "platform_machine" => self.platform_machine.clone(),
            "implementation_name" => self.implementation_name.clone(),
            "platform_python_implementation" => match self.implementation_name.as_str() {
                "cpython" => "CPython".to_string(),
                "pypy" => "PyPy".to_string(),
                other => other.to_string(),
            },
            "extra" | "platform_release" | "platform_version" => String::new(),
            _ => return None,
        };
        Some(value)
    }
}

/// Evaluate a marker expression against `env`.
pub fn evaluate(marker: &str, env: &MarkerEnvironment) -> PundlerResult<bool> {
    let tokens = tokenize(marker)?;
    let mut parser = Parser {
        marker,
        tokens,
        pos: 0,
        env,
    };
    let value = parser.or_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("unexpected trailing tokens"));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Ident(String),
    Op(String),
    And,
    Or,
    Not,
    In,
    LParen,
    RParen,
}

fn tokenize(marker: &str) -> PundlerResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = marker.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '"' | '\'' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&ch| ch == c)
                    .ok_or_else(|| PundlerError::parse(marker, "unterminated string in marker"))?;
                tokens.push(Token::Str(chars[i + 1..i + 1 + end].iter().collect()));
                i += end + 2;
            }
            '=' | '!' | '<' | '>' | '~' => {
                let op: String = chars[i..]
                    .iter()
                    .take_while(|ch| matches!(**ch, '=' | '!' | '<' | '>' | '~'))
                    .collect();
                i += op.chars().count();
                tokens.push(Token::Op(op));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word: String = chars[i..]
                    .iter()
                    .take_while(|ch| ch.is_ascii_alphanumeric() || **ch == '_' || **ch == '.')
                    .collect();
                i += word.chars().count();
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "in" => Token::In,
                    _ => Token::Ident(word),
                });
            }
            other => {
                return Err(PundlerError::parse(
                    marker,
                    format!("unexpected character '{other}' in marker"),
                ));
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    marker: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    env: &'a MarkerEnvironment,
}

impl Parser<'_> {
    fn error(&self, message: &str) -> PundlerError {
        PundlerError::parse(self.marker, message)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or_expr(&mut self) -> PundlerResult<bool> {
        let mut value = self.and_expr()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.and_expr()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> PundlerResult<bool> {
        let mut value = self.atom()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.atom()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn atom(&mut self) -> PundlerResult<bool> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let value = self.or_expr()?;
            if self.next() != Some(Token::RParen) {
                return Err(self.error("missing closing parenthesis"));
            }
            return Ok(value);
        }

        let (lhs, lhs_var) = self.value()?;
        let op = match self.next() {
            Some(Token::Op(op)) => op,
            Some(Token::In) => "in".to_string(),
            Some(Token::Not) if self.peek() == Some(&Token::In) => {
                self.pos += 1;
                "not in".to_string()
            }
            _ => return Err(self.error("expected a comparison operator")),
        };
        let (rhs, rhs_var) = self.value()?;
        let version_like = [lhs_var.as_deref(), rhs_var.as_deref()]
            .into_iter()
            .flatten()
            .any(|v| v.starts_with("python") || v == "implementation_version");
        compare(&lhs, &op, &rhs, version_like)
            .ok_or_else(|| self.error("invalid marker operator"))
    }

    /// Returns the resolved value and, for variables, the variable name.
    fn value(&mut self) -> PundlerResult<(String, Option<String>)> {
        match self.next() {
            Some(Token::Str(s)) => Ok((s, None)),
            Some(Token::Ident(name)) => {
                let value = self
                    .env
                    .lookup(&name)
                    .ok_or_else(|| self.error(&format!("unknown marker variable '{name}'")))?;
                Ok((value, Some(name)))
            }
            _ => Err(self.error("expected a marker value")),
        }
    }
}

fn compare(lhs: &str, op: &str, rhs: &str, version_like: bool) -> Option<bool> {
    match op {
        "in" => return Some(rhs.contains(lhs)),
        "not in" => return Some(!rhs.contains(lhs)),
        _ => {}
    }

    let operator = Operator::ALL.iter().copied().find(|o| o.as_str() == op)?;
    if version_like {
        if let Ok(left) = Version::parse(lhs) {
            let constraint = Constraint::new(operator, rhs);
            let rhs_is_version = Version::parse(rhs.trim_end_matches(".*")).is_ok();
            if operator == Operator::Arbitrary || rhs_is_version {
                return Some(constraint.matches(&left));
            }
        }
    }

    Some(match operator {
        Operator::Equal | Operator::Arbitrary => lhs == rhs,
        Operator::NotEqual => lhs != rhs,
        Operator::GreaterEqual => lhs >= rhs,
        Operator::LessEqual => lhs <= rhs,
        Operator::Greater => lhs > rhs,
        Operator::Less => lhs < rhs,
        Operator::Compatible => return None,
    })
}
