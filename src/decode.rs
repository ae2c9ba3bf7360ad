// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding compiled terminfo entries
//!
//! Handles the 16-bit standard layout and the extended block of
//! user-defined capabilities that may follow it.

use std::collections::HashMap;

use crate::caps;

/// Absent capability sentinel in numeric and offset sections. The
/// cancelled sentinel (-2) is treated the same way.
const ABSENT: i16 = -1;

/// Magic number of 16-bit terminfo entries, stored little-endian.
const MAGIC: i16 = 0x011a;

/// Magic, five-short header, and the shortest possible names section
/// (one byte plus its NUL).
const MIN_ENTRY: usize = 14;

/// Errors reported when decoding a terminfo entry
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The buffer is shorter than the header and section sizes require
    #[error("entry too small")]
    SmallFile,
    /// Bad magic, negative header field, or section counts that are
    /// oversized or inconsistent
    #[error("bad header")]
    BadHeader,
    /// A string offset does not reach a NUL inside its table
    #[error("bad string")]
    BadString,
}

/// A decoded terminal description.
///
/// Standard capabilities are indexed by the constants in [`caps`]:
/// `numbers` holds -1 for absent entries and `strings` holds an empty
/// value. Extended capabilities are keyed by name. Fields may be
/// modified after decoding, e.g. to override the pad character.
#[derive(Clone, Debug, PartialEq)]
pub struct Terminfo {
    pub names: Vec<String>,
    pub bools: Vec<bool>,
    pub numbers: Vec<i16>,
    pub strings: Vec<Vec<u8>>,
    pub ext_bools: HashMap<String, bool>,
    pub ext_numbers: HashMap<String, i16>,
    pub ext_strings: HashMap<String, Vec<u8>>,
}

impl Terminfo {
    fn empty() -> Self {
        Self {
            names: Vec::new(),
            bools: vec![false; caps::BOOL_COUNT],
            numbers: vec![ABSENT; caps::NUMBER_COUNT],
            strings: vec![Vec::new(); caps::STRING_COUNT],
            ext_bools: HashMap::new(),
            ext_numbers: HashMap::new(),
            ext_strings: HashMap::new(),
        }
    }

    /// Decode one compiled terminfo entry. See [`decode`].
    pub fn decode(buf: &[u8]) -> Result<Self, Error> {
        decode(buf)
    }
}

/// Decode one compiled terminfo entry from the supplied buffer.
///
/// The returned record owns all of its storage; the buffer may be
/// dropped immediately.
pub fn decode(buf: &[u8]) -> Result<Terminfo, Error> {
    let mut d = Decoder {
        buf,
        pos: 0,
        ti: Terminfo::empty(),
    };
    d.standard()?;
    d.even_boundary();
    if d.remaining() > 0 {
        d.extended()?;
    }
    Ok(d.ti)
}

struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    ti: Terminfo,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::SmallFile);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn short(&mut self) -> Result<i16, Error> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    /// Read five section sizes; any negative value is ill-formed.
    fn header(&mut self) -> Result<[usize; 5], Error> {
        let mut h = [0usize; 5];
        for slot in &mut h {
            let n = self.short()?;
            if n < 0 {
                return Err(Error::BadHeader);
            }
            *slot = n as usize;
        }
        Ok(h)
    }

    /// Skip the pad byte inserted to keep shorts word-aligned.
    fn even_boundary(&mut self) {
        if self.pos % 2 == 1 && self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    fn standard(&mut self) -> Result<(), Error> {
        if self.buf.len() < MIN_ENTRY {
            return Err(Error::SmallFile);
        }
        if self.short()? != MAGIC {
            return Err(Error::BadHeader);
        }
        let [len_names, len_bools, len_numbers, len_strings, len_table] = self.header()?;
        let len = len_names
            + len_bools
            + (len_names + len_bools) % 2
            + 2 * len_numbers
            + 2 * len_strings
            + len_table;
        if self.remaining() < len {
            return Err(Error::SmallFile);
        }
        if len_bools > caps::BOOL_COUNT
            || len_numbers > caps::NUMBER_COUNT
            || len_strings > caps::STRING_COUNT
        {
            return Err(Error::BadHeader);
        }

        let mut names = self.take(len_names)?;
        // The section is NUL-terminated; the NUL is not part of the
        // last alias.
        if let [head @ .., 0] = names {
            names = head;
        }
        self.ti.names = names
            .split(|&b| b == b'|')
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();

        for (i, &b) in self.take(len_bools)?.iter().enumerate() {
            self.ti.bools[i] = b == 1;
        }
        self.even_boundary();

        let numbers = self.take(2 * len_numbers)?;
        for i in 0..len_numbers {
            let n = short_at(numbers, 2 * i);
            if n > ABSENT {
                self.ti.numbers[i] = n;
            }
        }

        let offsets = self.take(2 * len_strings)?;
        let table = self.take(len_table)?;
        for i in 0..len_strings {
            let off = short_at(offsets, 2 * i);
            if off > ABSENT {
                self.ti.strings[i] = table_string(table, off as usize)?.to_vec();
            }
        }
        Ok(())
    }

    fn extended(&mut self) -> Result<(), Error> {
        let [len_bools, len_numbers, len_strings, len_offsets, len_table] = self.header()?;
        if len_offsets != len_bools + len_numbers + 2 * len_strings {
            return Err(Error::BadHeader);
        }
        let len = len_bools + len_bools % 2 + 2 * len_numbers + 2 * len_offsets + len_table;
        if self.remaining() < len {
            return Err(Error::SmallFile);
        }

        let bool_values = self.take(len_bools)?;
        self.even_boundary();
        let number_values = self.take(2 * len_numbers)?;
        let offsets = self.take(2 * len_offsets)?;
        let table = self.take(len_table)?;

        let (value_offsets, name_offsets) = offsets.split_at(2 * len_strings);

        // The combined table holds the capability values first and the
        // capability names after them. The offsets do not record the
        // boundary; it is the NUL that ends the string at the last
        // non-negative value offset.
        let mut split = len_strings;
        let mut last = None;
        while split > 0 {
            split -= 1;
            let off = short_at(value_offsets, 2 * split);
            if off > ABSENT {
                last = Some((split, off as usize));
                break;
            }
        }
        let (value_table, name_table) = match last {
            Some((_, off)) => {
                let end = off + table_string(table, off)?.len() + 1;
                (&table[..end], &table[end..])
            }
            None => (&table[..0], table),
        };

        let name = |slot: usize| -> Result<String, Error> {
            let off = short_at(name_offsets, 2 * slot);
            if off < 0 {
                return Err(Error::BadString);
            }
            let raw = table_string(name_table, off as usize)?;
            Ok(String::from_utf8_lossy(raw).into_owned())
        };

        for (i, &b) in bool_values.iter().enumerate() {
            let key = name(i)?;
            if b == 1 {
                self.ti.ext_bools.insert(key, true);
            }
        }
        for i in 0..len_numbers {
            let key = name(len_bools + i)?;
            let n = short_at(number_values, 2 * i);
            if n > ABSENT {
                self.ti.ext_numbers.insert(key, n);
            }
        }
        // The string whose value ends at the table boundary is emitted
        // after the loop; stopping the loop short of it keeps every
        // other value strictly inside `value_table`.
        for i in 0..split {
            let key = name(len_bools + len_numbers + i)?;
            let off = short_at(value_offsets, 2 * i);
            if off > ABSENT {
                let value = table_string(value_table, off as usize)?.to_vec();
                self.ti.ext_strings.insert(key, value);
            }
        }
        if let Some((slot, off)) = last {
            let key = name(len_bools + len_numbers + slot)?;
            let value = table_string(value_table, off)?.to_vec();
            self.ti.ext_strings.insert(key, value);
        }
        Ok(())
    }
}

/// Little-endian short at `at`; callers stay within the slices they cut.
fn short_at(buf: &[u8], at: usize) -> i16 {
    i16::from_le_bytes([buf[at], buf[at + 1]])
}

/// The byte string starting at `off`, up to but not including its NUL.
fn table_string(table: &[u8], off: usize) -> Result<&[u8], Error> {
    let tail = table.get(off..).ok_or(Error::BadString)?;
    let end = tail.iter().position(|&b| b == 0).ok_or(Error::BadString)?;
    Ok(&tail[..end])
}
