// This file is part of umaskexec, a file mode creation mask launcher.
// Copyright (C) 2026 umaskexec developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Formatting the file mode creation mask for printing

use crate::system::Mode;

/// Formats the file mode creation mask in octal notation.
///
/// The result is exactly three octal digits, zero-padded, most significant
/// group first.
#[must_use]
pub fn format_octal(mask: Mode) -> String {
    format!("{:03o}", mask.0)
}

/// Formats the file mode creation mask in symbolic notation.
///
/// The result always contains all three targets in the fixed order `u`, `g`,
/// `o`, comma-separated. A permission letter is present when the
/// corresponding bit is clear in the mask, that is, when the mask does not
/// deny the permission. A target with every permission denied renders as an
/// empty segment, as in `u=,g=rw,o=rx`.
#[must_use]
pub fn format_symbolic(mask: Mode) -> String {
    let mask = mask.0;
    let mut result = String::with_capacity(17);
    result.push_str("u=");
    if mask & 0o400 == 0 {
        result.push('r');
    }
    if mask & 0o200 == 0 {
        result.push('w');
    }
    if mask & 0o100 == 0 {
        result.push('x');
    }
    result.push_str(",g=");
    if mask & 0o40 == 0 {
        result.push('r');
    }
    if mask & 0o20 == 0 {
        result.push('w');
    }
    if mask & 0o10 == 0 {
        result.push('x');
    }
    result.push_str(",o=");
    if mask & 0o4 == 0 {
        result.push('r');
    }
    if mask & 0o2 == 0 {
        result.push('w');
    }
    if mask & 0o1 == 0 {
        result.push('x');
    }
    result
}


#[cfg(test)]
mod symbolic_tests {
    use super::*;

    #[test]
    fn nothing_denied() {
        assert_eq!(format_symbolic(Mode(0)), "u=rwx,g=rwx,o=rwx");
    }

    #[test]
    fn everything_denied() {
        assert_eq!(format_symbolic(Mode(0o777)), "u=,g=,o=");
    }

    #[test]
    fn combination() {
        assert_eq!(format_symbolic(Mode(0o022)), "u=rwx,g=rx,o=rx");
        assert_eq!(format_symbolic(Mode(0o124)), "u=rw,g=rx,o=wx");
        assert_eq!(format_symbolic(Mode(0o540)), "u=w,g=wx,o=rwx");
    }
}
