// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Capability counts and well-known capability indices
//!
//! Standard capabilities are identified by their position in the
//! boolean, numeric, and string sections of a compiled entry. The
//! constants below cover the table sizes and the indices used by the
//! helpers in this crate; the ordering is the standard terminfo one.

/// Number of known boolean capabilities.
pub const BOOL_COUNT: usize = 44;

/// Number of known numeric capabilities.
pub const NUMBER_COUNT: usize = 39;

/// Number of known string capabilities.
pub const STRING_COUNT: usize = 414;

// Boolean capabilities.
pub const AUTO_RIGHT_MARGIN: usize = 1; // am
pub const XON_XOFF: usize = 20; // xon

// Numeric capabilities.
pub const COLUMNS: usize = 0; // cols
pub const LINES: usize = 2; // lines
pub const PADDING_BAUD_RATE: usize = 5; // pb
pub const MAX_COLORS: usize = 13; // colors
pub const MAX_PAIRS: usize = 14; // pairs

// String capabilities.
pub const BELL: usize = 1; // bel
pub const CARRIAGE_RETURN: usize = 2; // cr
pub const CLEAR_SCREEN: usize = 5; // clear
pub const CLR_EOL: usize = 6; // el
pub const CLR_EOS: usize = 7; // ed
pub const CURSOR_ADDRESS: usize = 10; // cup
pub const CURSOR_DOWN: usize = 11; // cud1
pub const CURSOR_HOME: usize = 12; // home
pub const CURSOR_INVISIBLE: usize = 13; // civis
pub const CURSOR_NORMAL: usize = 16; // cnorm
pub const CURSOR_UP: usize = 19; // cuu1
pub const ENTER_CA_MODE: usize = 28; // smcup
pub const EXIT_ATTRIBUTE_MODE: usize = 39; // sgr0
pub const EXIT_CA_MODE: usize = 40; // rmcup
pub const FLASH_SCREEN: usize = 45; // flash
pub const PAD_CHAR: usize = 104; // pad
pub const ORIG_PAIR: usize = 297; // op
pub const SET_A_FOREGROUND: usize = 359; // setaf
pub const SET_A_BACKGROUND: usize = 360; // setab
