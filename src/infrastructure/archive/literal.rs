//! Grammar-limited parser for JavaScript object literals.
//!
//! Export payloads are JavaScript files. When strict JSON parsing fails, this
//! parser accepts the literal subset such files contain and nothing more:
//!
//! - objects and arrays, with trailing commas
//! - keys as quoted strings, bare identifiers or numbers
//! - single- or double-quoted strings with JavaScript escapes
//! - decimal, hexadecimal and signed numbers
//! - `true`, `false`, `null` and `undefined` (read as `null`)
//! - `//` and `/* */` comments
//!
//! Nothing is evaluated. Any other token is an error.

use serde_json::{Map, Number, Value};

/// Maximum nesting of arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// Parse failure with the byte offset where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

/// Parses a single literal value; trailing input other than whitespace,
/// comments and one `;` is rejected.
pub fn parse(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        src: input.as_bytes(),
        text: input,
        pos: 0,
        depth: 0,
    };

    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.peek() == Some(b';') {
        parser.pos += 1;
        parser.skip_trivia()?;
    }

    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(parser.error("unexpected trailing input")),
    }
}

struct Parser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.pos + ahead).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), LiteralError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => {
                                self.pos = start;
                                return Err(self.error("unterminated comment"));
                            }
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                Some(_) if self.text[self.pos..].starts_with('\u{feff}') => {
                    self.pos += '\u{feff}'.len_utf8();
                }
                Some(_) if self.text[self.pos..].starts_with('\u{a0}') => {
                    self.pos += '\u{a0}'.len_utf8();
                }
                _ => return Ok(()),
            }
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia()?;

        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.nested(Self::object),
            Some(b'[') => self.nested(Self::array),
            Some(quote @ (b'"' | b'\'')) => self.string(quote).map(Value::String),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number(),
            Some(b) if is_ident_start(b) => {
                let start = self.pos;
                let word = self.identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    _ => {
                        self.pos = start;
                        Err(self.error(format!("unsupported identifier '{word}'")))
                    }
                }
            }
            Some(_) => Err(self.error("unexpected character")),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("maximum nesting depth exceeded"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn object(&mut self) -> Result<Value, LiteralError> {
        self.expect(b'{')?;
        let mut map = Map::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key = self.key()?;
            self.skip_trivia()?;
            self.expect(b':')?;
            let value = self.value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => self.string(quote),
            Some(b) if is_ident_start(b) => Ok(self.identifier().to_string()),
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                Ok(self.text[start..self.pos].to_string())
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn array(&mut self) -> Result<Value, LiteralError> {
        self.expect(b'[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn string(&mut self, quote: u8) -> Result<String, LiteralError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();

        loop {
            let rest = &self.text[self.pos..];
            let Some(c) = rest.chars().next() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };

            match c {
                _ if c as u32 == u32::from(quote) => {
                    self.pos += 1;
                    return Ok(out);
                }
                '\\' => {
                    self.pos += 1;
                    self.escape(&mut out)?;
                }
                '\n' | '\r' => return Err(self.error("line break in string")),
                _ => {
                    out.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let Some(c) = self.text[self.pos..].chars().next() else {
            return Err(self.error("unterminated escape"));
        };
        self.pos += c.len_utf8();

        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            'u' => {
                let c = self.unicode_escape()?;
                out.push(c);
            }
            // Line continuation.
            '\n' => {}
            '\r' => {
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '0'..='9' => return Err(self.error("octal escapes are not supported")),
            other => out.push(other),
        }

        Ok(())
    }

    fn unicode_escape(&mut self) -> Result<char, LiteralError> {
        if self.peek() == Some(b'{') {
            self.pos += 1;
            let start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let code = u32::from_str_radix(&self.text[start..self.pos], 16)
                .map_err(|_| self.error("invalid unicode escape"))?;
            self.expect(b'}')?;
            return char::from_u32(code).ok_or_else(|| self.error("invalid code point"));
        }

        let high = self.hex_digits(4)?;
        if !(0xD800..0xDC00).contains(&high) {
            return Ok(char::from_u32(high).unwrap_or('\u{fffd}'));
        }

        // High surrogate: combine with a following `\uXXXX` low surrogate.
        if self.peek() == Some(b'\\') && self.peek_at(1) == Some(b'u') {
            let resume = self.pos;
            self.pos += 2;
            let low = self.hex_digits(4)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            self.pos = resume;
        }

        Ok('\u{fffd}')
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32, LiteralError> {
        let end = self.pos + count;
        let digits = self
            .text
            .get(self.pos..end)
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("invalid hex escape"))?;
        let code = u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid hex escape"))?;
        self.pos = end;
        Ok(code)
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let magnitude = u64::from_str_radix(&self.text[digits_start..self.pos], 16)
                .map_err(|_| self.error("invalid hexadecimal number"))?;
            return Ok(signed_integer(negative, magnitude)
                .unwrap_or_else(|| float_value(-(magnitude as f64)).unwrap_or(Value::Null)));
        }

        let digits_start = self.pos;
        let mut integral = true;
        self.digits();
        let has_int = self.pos > digits_start;

        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            let frac_start = self.pos;
            self.digits();
            if !has_int && self.pos == frac_start {
                self.pos = start;
                return Err(self.error("invalid number"));
            }
        } else if !has_int {
            self.pos = start;
            return Err(self.error("invalid number"));
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            self.digits();
            if self.pos == exp_start {
                return Err(self.error("invalid exponent"));
            }
        }

        if self.peek().is_some_and(is_ident_continue) {
            return Err(self.error("invalid number"));
        }

        let literal = &self.text[digits_start..self.pos];
        if integral && let Ok(magnitude) = literal.parse::<u64>() {
            if let Some(value) = signed_integer(negative, magnitude) {
                return Ok(value);
            }
        }

        let parsed: f64 = literal
            .parse()
            .map_err(|_| self.error("invalid number"))?;
        float_value(if negative { -parsed } else { parsed })
            .ok_or_else(|| self.error("number out of range"))
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }
}

fn signed_integer(negative: bool, magnitude: u64) -> Option<Value> {
    if !negative {
        return Some(Value::Number(Number::from(magnitude)));
    }
    if magnitude == 0 {
        return Some(Value::Number(Number::from(0)));
    }
    i64::try_from(magnitude)
        .ok()
        .map(|m| Value::Number(Number::from(-m)))
        .or_else(|| (magnitude == 1u64 << 63).then(|| Value::Number(Number::from(i64::MIN))))
}

fn float_value(value: f64) -> Option<Value> {
    Number::from_f64(value).map(Value::Number)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
