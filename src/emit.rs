// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers for emitting capability sequences
//!
//! Convenience methods on [`Terminfo`] that combine the decoded
//! tables with the expansion engine: cursor addressing, colour
//! selection, and writing with `$<delay>` padding markers expanded.

use std::io::{self, Write};

use crate::{
    caps,
    decode::Terminfo,
    expand::{Param, expand},
};

impl Terminfo {
    /// Expand the string capability at index `i` with the given
    /// parameters. An out-of-range index expands to nothing.
    pub fn parm(&self, i: usize, params: &[Param]) -> Vec<u8> {
        match self.strings.get(i) {
            Some(s) => expand(s, params),
            None => Vec::new(),
        }
    }

    /// The sequence addressing the cursor at `row`, `col`, with the
    /// origin in the upper left corner of the screen.
    pub fn goto(&self, row: i32, col: i32) -> Vec<u8> {
        self.parm(
            caps::CURSOR_ADDRESS,
            &[Param::Int(row), Param::Int(col)],
        )
    }

    /// The sequence selecting the given foreground and background
    /// colours. Components outside the terminal's colour range are
    /// skipped; pass a negative component to leave it unchanged.
    pub fn color(&self, mut fg: i32, mut bg: i32) -> Vec<u8> {
        let max_colors = i32::from(self.number(caps::MAX_COLORS));
        // An 8-entry palette aliases the bright colours.
        if max_colors == 8 {
            if (8..16).contains(&fg) {
                fg -= 8;
            }
            if (8..16).contains(&bg) {
                bg -= 8;
            }
        }
        let mut out = Vec::new();
        if fg >= 0 && fg < max_colors {
            out.extend(self.parm(caps::SET_A_FOREGROUND, &[Param::Int(fg)]));
        }
        if bg >= 0 && bg < max_colors {
            out.extend(self.parm(caps::SET_A_BACKGROUND, &[Param::Int(bg)]));
        }
        out
    }

    /// Write `s`, expanding `$<delay>` padding markers into pad
    /// characters suitable for the given baud rate. A delay marked
    /// with `*` is multiplied by `lines`; one marked with `/` is
    /// emitted even when the terminal needs no padding.
    pub fn puts(&self, w: &mut impl Write, s: &[u8], lines: i32, baud: i32) -> io::Result<()> {
        let mut s = s;
        loop {
            let Some(start) = find(s, b"$<") else {
                return w.write_all(s);
            };
            w.write_all(&s[..start])?;
            s = &s[start + 2..];
            let Some(end) = s.iter().position(|&b| b == b'>') else {
                // Unterminated marker; emit it unchanged.
                w.write_all(b"$<")?;
                return w.write_all(s);
            };
            let delay = &s[..end];
            s = &s[end + 1..];

            let mut ms: i32 = 0;
            let mut unit: i32 = 1000;
            let mut dot = false;
            let mut mandatory = false;
            let mut starred = false;
            for &ch in delay {
                match ch {
                    b'0'..=b'9' => {
                        ms = ms.wrapping_mul(10).wrapping_add(i32::from(ch - b'0'));
                        if dot {
                            unit = unit.wrapping_mul(10);
                        }
                    }
                    b'.' if !dot => dot = true,
                    b'*' if !starred => {
                        ms = ms.wrapping_mul(lines);
                        starred = true;
                    }
                    b'/' => mandatory = true,
                    _ => break,
                }
            }
            if mandatory
                || (!self.flag(caps::XON_XOFF)
                    && baud > i32::from(self.number(caps::PADDING_BAUD_RATE)))
            {
                let pad = self.string(caps::PAD_CHAR);
                let n = ((baud / 8) / unit).wrapping_mul(ms);
                for _ in 0..n.max(0) {
                    w.write_all(pad)?;
                }
            }
        }
    }

    fn flag(&self, i: usize) -> bool {
        self.bools.get(i).copied().unwrap_or(false)
    }

    fn number(&self, i: usize) -> i16 {
        self.numbers.get(i).copied().unwrap_or(-1)
    }

    fn string(&self, i: usize) -> &[u8] {
        self.strings.get(i).map_or(&[], Vec::as_slice)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
