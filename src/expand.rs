// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parameterized string expansion
//!
//! Evaluates the `%`-directive language used by string capabilities,
//! such as cursor addressing or SGR colour sequences. Malformed
//! templates never fail; they produce the best-effort expansion of
//! whatever could be interpreted.

use std::{
    array::from_fn,
    iter::repeat_n,
    sync::{LazyLock, Mutex, PoisonError},
};

/// A caller-supplied parameter for capability expansion
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Int(i32),
    Str(Vec<u8>),
}

impl From<i32> for Param {
    fn from(value: i32) -> Param {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Param {
        Param::Str(value.as_bytes().to_vec())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Param {
        Param::Str(value.into_bytes())
    }
}

impl From<&[u8]> for Param {
    fn from(value: &[u8]) -> Param {
        Param::Str(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Param {
    fn from(value: &[u8; N]) -> Param {
        Param::Str(value.to_vec())
    }
}

impl From<Vec<u8>> for Param {
    fn from(value: Vec<u8>) -> Param {
        Param::Str(value)
    }
}

/// A value on the expansion stack
#[derive(Clone, Debug, PartialEq)]
enum Value {
    Int(i32),
    Bool(bool),
    Byte(u8),
    Str(Vec<u8>),
}

impl From<&Param> for Value {
    fn from(p: &Param) -> Value {
        match p {
            Param::Int(n) => Value::Int(*n),
            Param::Str(s) => Value::Str(s.clone()),
        }
    }
}

/// Popping expects a given kind; any other kind, or an empty stack,
/// yields that kind's zero value.
#[derive(Default)]
struct Stack(Vec<Value>);

impl Stack {
    fn push(&mut self, v: Value) {
        self.0.push(v);
    }

    fn pop(&mut self) -> Option<Value> {
        self.0.pop()
    }

    fn pop_int(&mut self) -> i32 {
        match self.0.pop() {
            Some(Value::Int(n)) => n,
            _ => 0,
        }
    }

    /// `b` is on top of the stack, `a` below it.
    fn pop_two_int(&mut self) -> (i32, i32) {
        let b = self.pop_int();
        let a = self.pop_int();
        (a, b)
    }

    /// An integer on top of the stack counts as a boolean: published
    /// entries feed flag parameters straight into `%t`.
    fn pop_bool(&mut self) -> bool {
        match self.0.pop() {
            Some(Value::Bool(b)) => b,
            Some(Value::Int(n)) => n != 0,
            _ => false,
        }
    }

    fn pop_byte(&mut self) -> u8 {
        match self.0.pop() {
            Some(Value::Byte(b)) => b,
            _ => 0,
        }
    }

    fn pop_str(&mut self) -> Vec<u8> {
        match self.0.pop() {
            Some(Value::Str(s)) => s,
            _ => Vec::new(),
        }
    }
}

/// Static variables A-Z, shared by every expansion in the process.
/// Some entries use them to carry state from one call to the next.
static STATIC_VARS: LazyLock<Mutex<[Value; 26]>> =
    LazyLock::new(|| Mutex::new(from_fn(|_| Value::Int(0))));

fn static_get(slot: usize) -> Value {
    let vars = STATIC_VARS.lock().unwrap_or_else(PoisonError::into_inner);
    vars[slot].clone()
}

fn static_set(slot: usize, value: Value) {
    let mut vars = STATIC_VARS.lock().unwrap_or_else(PoisonError::into_inner);
    vars[slot] = value;
}

/// Scanner states. `SkipThen` and `SkipElse` skim over an untaken
/// conditional branch; only `SkipThen` may end at `%e`.
#[derive(Clone, Copy)]
enum State {
    Text,
    Code,
    PushParam,
    SetVar,
    GetVar,
    CharConst,
    IntConst,
    SkipText,
    SkipThen,
    SkipElse,
}

/// Expand the capability template with the given parameters.
///
/// Up to nine parameters are used; missing ones default to integer
/// zero and excess ones are ignored. Expansion has no error channel:
/// the result of a malformed template is whatever was produced before
/// the malformation.
pub fn expand(s: &[u8], params: &[Param]) -> Vec<u8> {
    let mut ex = Expander {
        s,
        pos: 0,
        nest: 0,
        skip_else: false,
        stack: Stack::default(),
        params: from_fn(|i| params.get(i).map_or(Value::Int(0), Value::from)),
        dvars: from_fn(|_| Value::Int(0)),
        out: Vec::with_capacity(s.len()),
    };
    ex.run();
    ex.out
}

struct Expander<'a> {
    s: &'a [u8],
    pos: usize,
    /// `%?` nesting depth while skipping a branch
    nest: usize,
    /// Skipping an else-branch, which only `%;` ends
    skip_else: bool,
    stack: Stack,
    params: [Value; 9],
    /// Dynamic variables a-z, local to this expansion
    dvars: [Value; 26],
    out: Vec<u8>,
}

impl Expander<'_> {
    fn run(&mut self) {
        let mut state = State::Text;
        while let Some(next) = self.step(state) {
            state = next;
        }
    }

    /// Run one state; `None` means the template ended.
    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Text => self.scan_text(),
            State::Code => self.scan_code(),
            State::PushParam => self.push_param(),
            State::SetVar => self.set_var(),
            State::GetVar => self.get_var(),
            State::CharConst => self.char_const(),
            State::IntConst => self.int_const(),
            State::SkipText => self.skip_text(),
            State::SkipThen => self.skip_then(),
            State::SkipElse => self.skip_else(),
        }
    }

    /// The byte at the cursor.
    fn get(&self) -> Option<u8> {
        self.s.get(self.pos).copied()
    }

    fn emit_int(&mut self, n: i32, conv: u8) {
        let s = match conv {
            b'o' => format!("{n:o}"),
            b'x' => format!("{n:x}"),
            b'X' => format!("{n:X}"),
            _ => n.to_string(),
        };
        self.out.extend_from_slice(s.as_bytes());
    }

    fn scan_text(&mut self) -> Option<State> {
        let start = self.pos;
        while let Some(ch) = self.get() {
            if ch == b'%' {
                self.out.extend_from_slice(&self.s[start..self.pos]);
                self.pos += 1;
                return Some(State::Code);
            }
            self.pos += 1;
        }
        self.out.extend_from_slice(&self.s[start..]);
        None
    }

    fn scan_code(&mut self) -> Option<State> {
        let ch = self.get()?;
        match ch {
            b'%' => self.out.push(b'%'),
            b'c' => {
                let b = self.stack.pop_byte();
                self.out.push(b);
            }
            b's' => {
                let s = self.stack.pop_str();
                self.out.extend_from_slice(&s);
            }
            b'd' | b'o' | b'x' | b'X' => {
                let n = self.stack.pop_int();
                self.emit_int(n, ch);
            }
            b':' => {
                // Shields a leading `-` or `+` flag from being read
                // as an operator.
                self.pos += 1;
                return self.scan_format();
            }
            b'#' | b' ' | b'.' | b'0'..=b'9' => return self.scan_format(),
            b'p' => {
                self.pos += 1;
                return Some(State::PushParam);
            }
            b'P' => {
                self.pos += 1;
                return Some(State::SetVar);
            }
            b'g' => {
                self.pos += 1;
                return Some(State::GetVar);
            }
            b'\'' => {
                self.pos += 1;
                return Some(State::CharConst);
            }
            b'{' => {
                self.pos += 1;
                return Some(State::IntConst);
            }
            b'l' => {
                let n = self.stack.pop_str().len();
                self.stack.push(Value::Int(n as i32));
            }
            b'+' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a.wrapping_add(b)));
            }
            b'-' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a.wrapping_sub(b)));
            }
            b'*' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a.wrapping_mul(b)));
            }
            b'/' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack
                    .push(Value::Int(if b != 0 { a.wrapping_div(b) } else { 0 }));
            }
            b'm' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack
                    .push(Value::Int(if b != 0 { a.wrapping_rem(b) } else { 0 }));
            }
            b'&' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a & b));
            }
            b'|' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a | b));
            }
            b'^' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Int(a ^ b));
            }
            b'~' => {
                let a = self.stack.pop_int();
                self.stack.push(Value::Int(!a));
            }
            b'!' => {
                let negated = match self.stack.pop() {
                    Some(Value::Bool(b)) => !b,
                    Some(Value::Int(n)) => n == 0,
                    _ => true,
                };
                self.stack.push(Value::Bool(negated));
            }
            b'=' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Bool(a == b));
            }
            b'>' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Bool(a > b));
            }
            b'<' => {
                let (a, b) = self.stack.pop_two_int();
                self.stack.push(Value::Bool(a < b));
            }
            b'A' => {
                let b = self.stack.pop_bool();
                let a = self.stack.pop_bool();
                self.stack.push(Value::Bool(a && b));
            }
            b'O' => {
                let b = self.stack.pop_bool();
                let a = self.stack.pop_bool();
                self.stack.push(Value::Bool(a || b));
            }
            b'i' => {
                // 1-based cursor addressing.
                for p in &mut self.params[..2] {
                    if let Value::Int(n) = p {
                        *n = n.wrapping_add(1);
                    }
                }
            }
            b'?' | b';' => {}
            b't' => {
                self.pos += 1;
                if self.stack.pop_bool() {
                    return Some(State::Text);
                }
                self.skip_else = false;
                return Some(State::SkipText);
            }
            b'e' => {
                self.pos += 1;
                self.skip_else = true;
                return Some(State::SkipText);
            }
            // Undefined directive bytes are ignored.
            _ => {}
        }
        self.pos += 1;
        Some(State::Text)
    }

    /// Parse `[-+# 0]*[0-9]*(\.[0-9]*)?` and the conversion letter at
    /// the cursor, then format the popped value.
    fn scan_format(&mut self) -> Option<State> {
        let mut flags = Flags::default();
        let mut in_precision = false;
        loop {
            let ch = self.get()?;
            self.pos += 1;
            match ch {
                b'd' | b'o' | b'x' | b'X' => {
                    let n = self.stack.pop_int();
                    let formatted = format_int(n, ch, flags);
                    self.out.extend_from_slice(&formatted);
                    return Some(State::Text);
                }
                b's' => {
                    let s = self.stack.pop_str();
                    let formatted = format_str(s, flags);
                    self.out.extend_from_slice(&formatted);
                    return Some(State::Text);
                }
                b'c' => {
                    let b = self.stack.pop_byte();
                    let formatted = pad(vec![b], flags, false);
                    self.out.extend_from_slice(&formatted);
                    return Some(State::Text);
                }
                b'-' => flags.left = true,
                b'+' => flags.sign = true,
                b'#' => flags.alternate = true,
                b' ' => flags.space = true,
                b'.' => {
                    flags.precision = Some(flags.precision.unwrap_or(0));
                    in_precision = true;
                }
                b'0'..=b'9' => {
                    let digit = usize::from(ch - b'0');
                    if in_precision {
                        let p = flags.precision.unwrap_or(0);
                        flags.precision = Some(p.saturating_mul(10).saturating_add(digit));
                    } else if digit == 0 && flags.width == 0 && !flags.zero {
                        flags.zero = true;
                    } else {
                        flags.width = flags.width.saturating_mul(10).saturating_add(digit);
                    }
                }
                // Malformed format; drop it and resume the text scan.
                _ => return Some(State::Text),
            }
        }
    }

    fn push_param(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.pos += 1;
        match ch {
            b'1'..=b'9' => {
                let v = self.params[usize::from(ch - b'1')].clone();
                self.stack.push(v);
            }
            _ => self.stack.push(Value::Int(0)),
        }
        Some(State::Text)
    }

    fn set_var(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.pos += 1;
        match ch {
            b'A'..=b'Z' => {
                let v = self.stack.pop().unwrap_or(Value::Int(0));
                static_set(usize::from(ch - b'A'), v);
            }
            b'a'..=b'z' => {
                let v = self.stack.pop().unwrap_or(Value::Int(0));
                self.dvars[usize::from(ch - b'a')] = v;
            }
            _ => {}
        }
        Some(State::Text)
    }

    fn get_var(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.pos += 1;
        match ch {
            b'A'..=b'Z' => {
                let v = static_get(usize::from(ch - b'A'));
                self.stack.push(v);
            }
            b'a'..=b'z' => {
                let v = self.dvars[usize::from(ch - b'a')].clone();
                self.stack.push(v);
            }
            _ => {}
        }
        Some(State::Text)
    }

    fn char_const(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.stack.push(Value::Byte(ch));
        // The closing quote is part of the directive.
        self.pos = (self.pos + 2).min(self.s.len());
        Some(State::Text)
    }

    fn int_const(&mut self) -> Option<State> {
        let mut n: i32 = 0;
        loop {
            let ch = self.get()?;
            self.pos += 1;
            if ch.is_ascii_digit() {
                n = n.wrapping_mul(10).wrapping_add(i32::from(ch - b'0'));
            } else {
                // `}` or any other byte ends the constant.
                self.stack.push(Value::Int(n));
                return Some(State::Text);
            }
        }
    }

    fn skip_text(&mut self) -> Option<State> {
        loop {
            let ch = self.get()?;
            self.pos += 1;
            if ch == b'%' {
                break;
            }
        }
        if self.skip_else {
            Some(State::SkipElse)
        } else {
            Some(State::SkipThen)
        }
    }

    fn skip_then(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.pos += 1;
        match ch {
            b';' => {
                if self.nest == 0 {
                    return Some(State::Text);
                }
                self.nest -= 1;
            }
            b'?' => self.nest += 1,
            b'e' => {
                if self.nest == 0 {
                    return Some(State::Text);
                }
            }
            _ => {}
        }
        Some(State::SkipText)
    }

    fn skip_else(&mut self) -> Option<State> {
        let ch = self.get()?;
        self.pos += 1;
        match ch {
            b';' => {
                if self.nest == 0 {
                    return Some(State::Text);
                }
                self.nest -= 1;
            }
            b'?' => self.nest += 1,
            _ => {}
        }
        Some(State::SkipText)
    }
}

#[derive(Clone, Copy, Default)]
struct Flags {
    width: usize,
    precision: Option<usize>,
    alternate: bool,
    left: bool,
    sign: bool,
    space: bool,
    zero: bool,
}

fn format_int(d: i32, conv: u8, flags: Flags) -> Vec<u8> {
    let body = match conv {
        b'o' => match flags.precision {
            Some(precision) => {
                if flags.alternate {
                    // The leading octal zero counts against precision.
                    format!("0{d:0prec$o}", prec = precision.saturating_sub(1))
                } else {
                    format!("{d:0prec$o}", prec = precision)
                }
            }
            None if flags.alternate => format!("0{d:o}"),
            None => format!("{d:o}"),
        },
        b'x' => match flags.precision {
            Some(precision) => {
                if flags.alternate && d != 0 {
                    format!("0x{d:0prec$x}", prec = precision)
                } else {
                    format!("{d:0prec$x}", prec = precision)
                }
            }
            None if flags.alternate && d != 0 => format!("0x{d:x}"),
            None => format!("{d:x}"),
        },
        b'X' => match flags.precision {
            Some(precision) => {
                if flags.alternate && d != 0 {
                    format!("0X{d:0prec$X}", prec = precision)
                } else {
                    format!("{d:0prec$X}", prec = precision)
                }
            }
            None if flags.alternate && d != 0 => format!("0X{d:X}"),
            None => format!("{d:X}"),
        },
        _ => match flags.precision {
            Some(precision) => {
                if flags.sign {
                    format!("{d:+0prec$}", prec = precision + 1)
                } else if d < 0 {
                    format!("{d:0prec$}", prec = precision + 1)
                } else if flags.space {
                    format!(" {d:0prec$}", prec = precision)
                } else {
                    format!("{d:0prec$}", prec = precision)
                }
            }
            None => {
                if flags.sign {
                    format!("{d:+}")
                } else if flags.space && d >= 0 {
                    format!(" {d}")
                } else {
                    format!("{d}")
                }
            }
        },
    };
    pad(body.into_bytes(), flags, true)
}

fn format_str(mut s: Vec<u8>, flags: Flags) -> Vec<u8> {
    if let Some(precision) = flags.precision
        && precision < s.len()
    {
        s.truncate(precision);
    }
    pad(s, flags, false)
}

fn pad(mut s: Vec<u8>, flags: Flags, numeric: bool) -> Vec<u8> {
    if flags.width <= s.len() {
        return s;
    }
    let n = flags.width - s.len();
    if flags.left {
        s.extend(repeat_n(b' ', n));
    } else if numeric && flags.zero && flags.precision.is_none() {
        // Zero padding goes after the sign.
        let at = usize::from(matches!(s.first(), Some(b'-' | b'+' | b' ')));
        s.splice(at..at, repeat_n(b'0', n));
    } else {
        let mut padded = Vec::with_capacity(flags.width);
        padded.extend(repeat_n(b' ', n));
        padded.append(&mut s);
        s = padded;
    }
    s
}

#[cfg(test)]
mod test {
    use super::*;

    /// Compare the expansion of `cap` to the expected string.
    fn assert_expand(cap: &[u8], params: &[Param], expected: &str) {
        let actual = expand(cap, params);
        assert_eq!(
            str::from_utf8(&actual).unwrap(),
            expected,
            "template {:?}",
            String::from_utf8_lossy(cap)
        );
    }

    #[test]
    fn literal_text() {
        assert_expand(b"\x1b[0m plain text", &[], "\x1b[0m plain text");
    }

    #[test]
    fn parameter_decimal() {
        assert_expand(b"%p1%d", &[Param::from(42)], "42");
    }

    #[test]
    fn addition() {
        assert_expand(b"%p1%p2%+%d", &[Param::from(3), Param::from(4)], "7");
    }

    #[test]
    fn division() {
        assert_expand(b"%p1%{10}%/%d", &[Param::from(55)], "5");
    }

    #[test]
    fn division_by_zero() {
        assert_expand(b"%p1%{0}%/%d", &[Param::from(55)], "0");
        assert_expand(b"%p1%{0}%m%d", &[Param::from(55)], "0");
    }

    #[test]
    fn numeric_binary_operations() {
        let tests = [
            (12, "+", 29, "41"),
            (35, "-", 7, "28"),
            (3, "*", 16, "48"),
            (70, "/", 3, "23"),
            (101, "m", 7, "3"),
            (3, "|", 5, "7"),
            (15, "&", 35, "3"),
            (15, "^", 35, "44"),
            (5, "=", 7, "0"),
            (15, "=", 15, "1"),
            (17, "<", 8, "0"),
            (17, "<", 50, "1"),
            (17, ">", 8, "1"),
            (17, ">", 50, "0"),
        ];
        for (a, op, b, expected) in tests {
            let cap = format!("%p1%p2%{op}%d");
            assert_expand(cap.as_bytes(), &[Param::from(a), Param::from(b)], expected);
        }
    }

    #[test]
    fn logical_and_or() {
        let and: &[u8] = b"%?%p1%p2%A%tY%eN%;";
        assert_expand(and, &[Param::from(1), Param::from(1)], "Y");
        assert_expand(and, &[Param::from(1), Param::from(0)], "N");
        let or: &[u8] = b"%?%p1%p2%O%tY%eN%;";
        assert_expand(or, &[Param::from(0), Param::from(1)], "Y");
        assert_expand(or, &[Param::from(0), Param::from(0)], "N");
    }

    #[test]
    fn negation() {
        assert_expand(b"%p1%!%?%t1%e0%;", &[Param::from(0)], "1");
        assert_expand(b"%p1%!%?%t1%e0%;", &[Param::from(15)], "0");
        assert_expand(b"%p1%~%d", &[Param::from(15)], "-16");
    }

    #[test]
    fn comparison_branch() {
        let cap: &[u8] = b"%p1%p2%>%t yes %e no %;";
        assert_expand(cap, &[Param::from(5), Param::from(3)], " yes ");
        assert_expand(cap, &[Param::from(3), Param::from(5)], " no ");
    }

    #[test]
    fn conditional_branches() {
        let cap: &[u8] = b"%?%p1%t%p1%dA%e%p1%dB%;";
        assert_expand(cap, &[Param::from(0)], "0B");
        assert_expand(cap, &[Param::from(1)], "1A");
    }

    #[test]
    fn conditional_without_else() {
        let cap: &[u8] = b"%?%p1%tset%;.";
        assert_expand(cap, &[Param::from(1)], "set.");
        assert_expand(cap, &[Param::from(0)], ".");
    }

    #[test]
    fn conditional_nested() {
        let cap: &[u8] = b"%?%p1%t+%?%p2%t+%e-%;%e-%?%p2%t+%e-%;%;";
        assert_expand(cap, &[Param::from(0), Param::from(0)], "--");
        assert_expand(cap, &[Param::from(0), Param::from(1)], "-+");
        assert_expand(cap, &[Param::from(1), Param::from(0)], "+-");
        assert_expand(cap, &[Param::from(1), Param::from(1)], "++");
    }

    #[test]
    fn unbalanced_conditional_terminates() {
        assert_expand(b"%?%p1%t never shown", &[Param::from(0)], "");
    }

    #[test]
    fn increment() {
        assert_expand(b"%i%p1%d,%p2%d", &[Param::from(0), Param::from(0)], "1,1");
        // Each %i increments again; parameters past the second are
        // untouched.
        assert_expand(
            b"%i%i%p1%d,%p3%d",
            &[Param::from(3), Param::from(0), Param::from(9)],
            "5,9",
        );
    }

    #[test]
    fn increment_skips_string_parameters() {
        assert_expand(b"%i%p2%s", &[Param::from(0), Param::from("row")], "row");
    }

    #[test]
    fn missing_parameters_default_to_zero() {
        assert_expand(b"%p1%d,%p9%d", &[], "0,0");
        assert_expand(b"%p0%d", &[Param::from(9)], "0");
    }

    #[test]
    fn percent_escape() {
        assert_expand(b"%p1%d%%", &[Param::from(5)], "5%");
        assert_expand(b"100%% done", &[], "100% done");
    }

    #[test]
    fn string_output_and_length() {
        assert_expand(b"%p1%s", &[Param::from("Hello")], "Hello");
        assert_expand(b"%p1%l%d", &[Param::from("Hello, World!")], "13");
        assert_expand(b"%l%d", &[], "0");
    }

    #[test]
    fn char_constant() {
        assert_expand(b"%'x'%cZ", &[], "xZ");
        // The constant is a byte, not an integer.
        assert_expand(b"%'A'%d", &[], "0");
    }

    #[test]
    fn char_output_is_typed() {
        let out = expand(b"%p1%c", &[Param::from(65)]);
        assert_eq!(out, vec![0]);
    }

    #[test]
    fn int_constant() {
        assert_expand(b"%{456}%d %{0}%d", &[], "456 0");
    }

    #[test]
    fn bases() {
        assert_expand(b"%p1%o %p1%x %p1%X", &[Param::from(255)], "377 ff FF");
    }

    #[test]
    fn static_variable_persists_across_calls() {
        assert_expand(b"%p1%PQ", &[Param::from(42)], "");
        assert_expand(b"%gQ%d", &[], "42");
    }

    #[test]
    fn dynamic_variable_local_to_call() {
        assert_expand(b"%p1%Pq%gq%d", &[Param::from(7)], "7");
        assert_expand(b"%gq%d", &[], "0");
    }

    #[test]
    fn variable_banks_are_distinct() {
        assert_expand(
            b"%p1%PB%p2%Pb%gB%d%gb%d",
            &[Param::from(1), Param::from(2)],
            "12",
        );
        assert_expand(b"%gB%d%gb%d", &[], "10");
    }

    #[test]
    fn string_variable() {
        assert_expand(b"%p1%Pw%gw%s:%gw%l%d", &[Param::from("abc")], "abc:3");
    }

    #[test]
    fn undefined_directive_ignored() {
        assert_expand(b"a%qb", &[], "ab");
        assert_expand(b"%p1%d%Z!", &[Param::from(42)], "42!");
    }

    #[test]
    fn truncated_directive() {
        assert_expand(b"abc%", &[], "abc");
        assert_expand(b"abc%p", &[], "abc");
        assert_expand(b"abc%{12", &[], "abc");
    }

    #[test]
    fn format_decimal() {
        let tests = [
            (42, "%d", "42"),
            (-42, "%d", "-42"),
            (42, "%:+d", "+42"),
            (-42, "%:+d", "-42"),
            (42, "% d", " 42"),
            (-42, "% d", "-42"),
            (42, "%.5d", "00042"),
            (-42, "%.5d", "-00042"),
            (42, "%:+.5d", "+00042"),
            (42, "% .5d", " 00042"),
            (42, "%5d", "   42"),
            (42, "%:-5d", "42   "),
            (42, "%05d", "00042"),
            (-42, "%05d", "-0042"),
        ];
        for (n, fmt, expected) in tests {
            let cap = format!("%p1{fmt}");
            assert_expand(cap.as_bytes(), &[Param::from(n)], expected);
        }
    }

    #[test]
    fn format_octal() {
        let tests = [
            (42, "%o", "52"),
            (42, "%#o", "052"),
            (42, "%.5o", "00052"),
            (42, "%#.5o", "00052"),
        ];
        for (n, fmt, expected) in tests {
            let cap = format!("%p1{fmt}");
            assert_expand(cap.as_bytes(), &[Param::from(n)], expected);
        }
    }

    #[test]
    fn format_hexadecimal() {
        let tests = [
            (63, "%x", "3f"),
            (63, "%#x", "0x3f"),
            (0, "%#x", "0"),
            (63, "%6x", "    3f"),
            (63, "%:-6x", "3f    "),
            (63, "%.5x", "0003f"),
            (63, "%#.5x", "0x0003f"),
            (63, "%X", "3F"),
            (63, "%#X", "0X3F"),
            (63, "%#.5X", "0X0003F"),
            (63, "%:-+ #10.5x", "0x0003f   "),
        ];
        for (n, fmt, expected) in tests {
            let cap = format!("%p1{fmt}");
            assert_expand(cap.as_bytes(), &[Param::from(n)], expected);
        }
    }

    #[test]
    fn format_string() {
        let tests = [
            ("One", "%s", "One"),
            ("One", "%5s", "  One"),
            ("One", "%5.2s", "   On"),
            ("One", "%:-5.4s", "One  "),
        ];
        for (s, fmt, expected) in tests {
            let cap = format!("%p1{fmt}");
            assert_expand(cap.as_bytes(), &[Param::from(s)], expected);
        }
    }

    #[test]
    fn format_char() {
        assert_expand(b"%'x'%3c", &[], "  x");
    }

    #[test]
    fn cursor_address_template() {
        assert_expand(
            b"\x1b[%i%p1%d;%p2%dH",
            &[Param::from(3), Param::from(7)],
            "\x1b[4;8H",
        );
    }

    #[test]
    fn sgr_color_template() {
        // The standard setaf template of 256-colour terminals.
        let cap: &[u8] = b"\x1b[%?%p1%{8}%<%t3%p1%d%e%p1%{16}%<%t9%p1%{8}%-%d%e38;5;%p1%d%;m";
        assert_expand(cap, &[Param::from(2)], "\x1b[32m");
        assert_expand(cap, &[Param::from(12)], "\x1b[94m");
        assert_expand(cap, &[Param::from(123)], "\x1b[38;5;123m");
    }
}
