//! Expression evaluation for `var match`.
//!
//! The shell only depends on the [`Evaluator`] trait: a string goes in, a
//! string (or an error) comes out. [`ArithmeticEvaluator`] is the bundled
//! implementation and understands ordinary infix arithmetic.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Deepest nesting of parentheses, unary signs and calls the parser accepts.
pub const MAX_NESTING: usize = 256;

pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticEvaluator;

impl ArithmeticEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError> {
        let tokens = lex(expression)?;
        if tokens.is_empty() {
            return Err(EvalError::Empty);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let value = parser.expr()?;
        match parser.peek() {
            None => Ok(value.to_string()),
            Some(tok) => Err(EvalError::UnexpectedToken(tok.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    fn as_f64(self) -> f64 {
        match self {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Value::Int(i) => i == 0,
            Value::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Value),
    Ident(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(v) => write!(f, "{}", v),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Op(c) => write!(f, "{}", c),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

fn lex(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => tokens.push(Token::Num(lex_number(&mut chars)?)),
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if !(c.is_alphanumeric() || c == '_') {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                tokens.push(Token::Ident(name));
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

fn lex_number(chars: &mut Peekable<Chars<'_>>) -> Result<Value, EvalError> {
    let mut literal = String::new();
    while let Some(&c) = chars.peek() {
        if !(c.is_ascii_digit() || c == '.') {
            break;
        }
        literal.push(c);
        chars.next();
    }

    if literal.contains('.') {
        return literal
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| EvalError::UnexpectedToken(literal));
    }

    literal
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| EvalError::Overflow)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token::Op(c)) if ops.contains(c) => {
                let c = *c;
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        match self.next() {
            Some(tok) if tok == expected => Ok(()),
            Some(tok) => Err(EvalError::UnexpectedToken(tok.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Value, EvalError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<Value, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/', '%']) {
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // Every recursive path passes through here.
    fn unary(&mut self) -> Result<Value, EvalError> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::TooDeep(MAX_NESTING));
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<Value, EvalError> {
        match self.eat_op(&['+', '-']) {
            Some('-') => match self.unary()? {
                Value::Int(i) => i.checked_neg().map(Value::Int).ok_or(EvalError::Overflow),
                Value::Float(f) => Ok(Value::Float(-f)),
            },
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    // Right associative: 2 ^ 3 ^ 2 == 2 ^ 9
    fn power(&mut self) -> Result<Value, EvalError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exp = self.unary()?;
            return pow(base, exp);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Value, EvalError> {
        match self.next() {
            Some(Token::Num(v)) => Ok(v),
            Some(Token::LParen) => {
                let v = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(v)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.call_args()?;
                    call(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(tok) => Err(EvalError::UnexpectedToken(tok.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn call_args(&mut self) -> Result<Vec<Value>, EvalError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }

        loop {
            args.push(self.expr()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                Some(tok) => return Err(EvalError::UnexpectedToken(tok.to_string())),
                None => return Err(EvalError::UnexpectedEnd),
            }
        }
    }
}

fn binary(op: char, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    if matches!(op, '/' | '%') && rhs.is_zero() {
        return Err(EvalError::DivisionByZero);
    }

    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match op {
                '+' => a.checked_add(b),
                '-' => a.checked_sub(b),
                '*' => a.checked_mul(b),
                '/' => a.checked_div(b),
                '%' => a.checked_rem(b),
                _ => return Err(EvalError::UnexpectedToken(op.to_string())),
            };
            result.map(Value::Int).ok_or(EvalError::Overflow)
        }
        _ => {
            let (a, b) = (lhs.as_f64(), rhs.as_f64());
            let result = match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                '/' => a / b,
                '%' => a % b,
                _ => return Err(EvalError::UnexpectedToken(op.to_string())),
            };
            Ok(Value::Float(result))
        }
    }
}

fn pow(base: Value, exp: Value) -> Result<Value, EvalError> {
    match (base, exp) {
        (Value::Int(b), Value::Int(e)) if e >= 0 => {
            let e = u32::try_from(e).map_err(|_| EvalError::Overflow)?;
            b.checked_pow(e).map(Value::Int).ok_or(EvalError::Overflow)
        }
        _ => Ok(Value::Float(base.as_f64().powf(exp.as_f64()))),
    }
}

fn constant(name: &str) -> Result<Value, EvalError> {
    match name.to_ascii_lowercase().as_str() {
        "pi" => Ok(Value::Float(std::f64::consts::PI)),
        "e" => Ok(Value::Float(std::f64::consts::E)),
        _ => Err(EvalError::UnknownIdentifier(name.to_string())),
    }
}

fn call(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(EvalError::Arity {
                name: name.to_string(),
                expected,
                got: args.len(),
            })
        }
    };

    let rounded = |f: fn(f64) -> f64| match args[0] {
        Value::Int(i) => Value::Int(i),
        Value::Float(x) => Value::Float(f(x)),
    };

    match name.to_ascii_lowercase().as_str() {
        "abs" => {
            arity(1)?;
            match args[0] {
                Value::Int(i) => i.checked_abs().map(Value::Int).ok_or(EvalError::Overflow),
                Value::Float(x) => Ok(Value::Float(x.abs())),
            }
        }
        "sqrt" => {
            arity(1)?;
            Ok(Value::Float(args[0].as_f64().sqrt()))
        }
        "floor" => {
            arity(1)?;
            Ok(rounded(f64::floor))
        }
        "ceil" => {
            arity(1)?;
            Ok(rounded(f64::ceil))
        }
        "round" => {
            arity(1)?;
            Ok(rounded(f64::round))
        }
        "min" | "max" => {
            arity(2)?;
            let pick_first = if name.eq_ignore_ascii_case("min") {
                args[0].as_f64() <= args[1].as_f64()
            } else {
                args[0].as_f64() >= args[1].as_f64()
            };
            match (args[0], args[1]) {
                (Value::Int(_), Value::Int(_)) => {
                    Ok(if pick_first { args[0] } else { args[1] })
                }
                (a, b) => Ok(Value::Float(if pick_first { a.as_f64() } else { b.as_f64() })),
            }
        }
        "pow" => {
            arity(2)?;
            pow(args[0], args[1])
        }
        _ => Err(EvalError::UnknownIdentifier(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> Result<String, EvalError> {
        ArithmeticEvaluator::new().evaluate(expr)
    }

    #[test]
    fn test_addition() {
        assert_eq!(eval("2 + 2").unwrap(), "4");
        assert_eq!(eval("2+2").unwrap(), "4");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), "14");
        assert_eq!(eval("(2 + 3) * 4").unwrap(), "20");
        assert_eq!(eval("10 - 4 - 3").unwrap(), "3");
    }

    #[test]
    fn test_integer_division_truncates() {
        assert_eq!(eval("7 / 2").unwrap(), "3");
        assert_eq!(eval("7 % 3").unwrap(), "1");
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(eval("7.0 / 2").unwrap(), "3.5");
        assert_eq!(eval("2.5 * 2").unwrap(), "5");
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        assert_eq!(eval(&deep), Err(EvalError::TooDeep(MAX_NESTING)));

        let signs = format!("{}1", "-".repeat(5000));
        assert_eq!(eval(&signs), Err(EvalError::TooDeep(MAX_NESTING)));

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&shallow).unwrap(), "1");
        assert_eq!(eval(&format!("{}7", "-".repeat(100))).unwrap(), "7");
    }

    #[test]
    fn test_power() {
        assert_eq!(eval("2 ^ 10").unwrap(), "1024");
        assert_eq!(eval("2 ^ 3 ^ 2").unwrap(), "512");
        assert_eq!(eval("-2 ^ 2").unwrap(), "-4");
        assert_eq!(eval("2 ^ -1").unwrap(), "0.5");
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-3 + 5").unwrap(), "2");
        assert_eq!(eval("--3").unwrap(), "3");
        assert_eq!(eval("+4").unwrap(), "4");
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(eval("sqrt(16)").unwrap(), "4");
        assert_eq!(eval("max(3, 9)").unwrap(), "9");
        assert_eq!(eval("min(3, 1.5)").unwrap(), "1.5");
        assert_eq!(eval("abs(-7)").unwrap(), "7");
        assert_eq!(eval("floor(2.7) + ceil(1.2)").unwrap(), "4");
        assert_eq!(eval("pow(3, 3)").unwrap(), "27");
        assert!(eval("pi").unwrap().starts_with("3.14159"));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1.5 % 0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(eval("9223372036854775807 + 1"), Err(EvalError::Overflow));
        assert_eq!(eval("2 ^ 64"), Err(EvalError::Overflow));
    }

    #[test]
    fn test_errors() {
        assert_eq!(eval(""), Err(EvalError::Empty));
        assert_eq!(eval("   "), Err(EvalError::Empty));
        assert_eq!(eval("2 +"), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("2 $ 3"), Err(EvalError::UnexpectedChar('$')));
        assert_eq!(eval("(1 + 2"), Err(EvalError::UnexpectedEnd));
        assert_eq!(eval("1 2"), Err(EvalError::UnexpectedToken("2".into())));
        assert_eq!(
            eval("foo + 1"),
            Err(EvalError::UnknownIdentifier("foo".into()))
        );
        assert!(matches!(eval("sqrt(1, 2)"), Err(EvalError::Arity { .. })));
    }
}
