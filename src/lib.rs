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

//! Show or set the file mode creation mask and execute a command
//!
//! **`umaskexec`** sets the file mode creation mask of the current process
//! and then replaces itself with the given command. If no command is given,
//! it shows the mask that would be used. If no mask is given either, it
//! shows the current mask.
//!
//! # Synopsis
//!
//! ```sh
//! umaskexec [--symbolic | --] [<mask> [<command> [<argument>]...]]
//! umaskexec (--help | --version) [<ignored>]...
//! ```
//!
//! # Options
//!
//! The **`-S`** (**`--symbolic`**) option causes the mask to be shown in
//! symbolic notation instead of octal. A lone **`--`** marks the end of
//! options so that the next argument is taken as a mask even if it starts
//! with a hyphen. **`-h`** (**`--help`**) and **`-V`** (**`--version`**)
//! print the help and version texts; any further arguments are accepted
//! and discarded.
//!
//! # Operands
//!
//! *mask* is an octal integer or a symbolic notation that represents the
//! file mode creation mask. The octal number is the bitwise OR of the file
//! mode bits to be turned off when creating a file. The symbolic notation
//! specifies the file mode bits to be kept on when creating a file, and is
//! applied on top of the current mask. It consists of one or more clauses
//! separated by commas. Each clause is a (possibly empty) sequence of who
//! symbols followed by one or more actions. The who symbols are:
//!
//! - **`u`** for the user bits,
//! - **`g`** for the group bits,
//! - **`o`** for the other bits, and
//! - **`a`** for all bits.
//!
//! An empty sequence of who symbols is equivalent to `a`. An action is an
//! operator optionally followed by permission symbols. The operators are:
//!
//! - **`+`** to add the permissions,
//! - **`-`** to remove the permissions, and
//! - **`=`** to set the permissions exactly.
//!
//! The permission symbols are **`r`** for read, **`w`** for write, and
//! **`x`** for execute.
//!
//! *command* and any following arguments form the command the process is
//! replaced with, located using the standard `PATH` search. The command
//! receives all of the arguments verbatim, the command name itself first.
//!
//! # Standard output
//!
//! When no command is given, the mask in effect is printed in octal
//! notation (exactly three digits) or in symbolic notation
//! (`u=…,g=…,o=…`, a letter present for each permission the mask does not
//! deny), followed by a newline.
//!
//! # Errors
//!
//! It is an error if an unrecognized option is given, if the mask operand
//! matches neither notation, if writing to the standard output fails, or
//! if the process image cannot be replaced. A rejected mask operand leaves
//! the process mask exactly as it was.
//!
//! # Exit status
//!
//! Zero on success; one on any error. When a command is given and the
//! replacement succeeds, the exit status is that of the command.
//!
//! # Portability
//!
//! The symbolic notation covers the nine permission bits only. The special
//! bits (set-user-ID, set-group-ID, sticky) and the `X`, `s`, `u`, `g`,
//! and `o` permission symbols accepted by some `umask` built-ins are not
//! supported.

use std::ffi::CString;
use std::io::Write;
use thiserror::Error;

pub mod mask;
pub mod syntax;
pub mod system;

use self::mask::format::{format_octal, format_symbolic};
use self::syntax::{BadOptionError, Invocation};
use self::system::{read_umask, Errno, Mode, System};

/// Help text printed for the `--help` option
pub const HELP: &str = "\
Execute a command with the given file mode creation mask.
If no mask is given, show the current mask.
If no command is given, show what mask would be used.

Usage:
    umaskexec [--symbolic | --] [<mask> [<command> [<argument>]...]]
    umaskexec (--help | --version) [<ignored>]...

Options:
    -h --help      show this help text
    -V --version   show version information
    -S --symbolic  show the mask symbolically instead of in octal
";

/// Version text printed for the `--version` option
pub const VERSION: &str = concat!("umaskexec ", env!("CARGO_PKG_VERSION"), "\n");

/// Error that terminates the program
///
/// Every variant formats to the text that follows the `argv[0]` prefix on
/// the standard error, and every variant makes the program exit with a
/// non-zero status.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// An unrecognized option was given.
    #[error(transparent)]
    BadOption(#[from] BadOptionError),

    /// The mask operand matches neither the octal nor the symbolic notation.
    #[error("bad umask: {0}")]
    BadUmask(String),

    /// Writing to the standard output failed.
    #[error("error writing output: {}", .0.desc())]
    Output(Errno),

    /// Replacing the process image failed.
    #[error("error executing command: {command}: {}", .errno.desc())]
    Exec {
        /// The command that could not be executed
        command: String,
        /// Raw error value returned by the underlying system call
        errno: Errno,
    },
}

/// Runs the utility.
///
/// `args` are the command-line arguments, excluding the program name.
/// Status and mask output goes to `output`, which is flushed and checked
/// before success is reported.
///
/// When a mask and a command are given and the process replacement
/// succeeds, this function does not return. In every other case it returns
/// `Ok(())` for exit status zero or an [`Error`] describing the failure.
pub fn run<S, I, W>(system: &mut S, args: I, output: &mut W) -> Result<(), Error>
where
    S: System,
    I: IntoIterator<Item = String>,
    W: Write,
{
    match syntax::parse(args)? {
        Invocation::Help => print(output, HELP),
        Invocation::Version => print(output, VERSION),

        Invocation::Show { symbolic } => {
            let current = read_umask(system);
            print_mask(output, current, symbolic)
        }

        Invocation::Set {
            mask: operand,
            symbolic,
            command,
        } => {
            // A rejected operand must not alter the mask, so decode fully
            // before committing anything.
            let Ok(decoded) = mask::parse(&operand) else {
                return Err(Error::BadUmask(operand));
            };
            let new_mask = decoded.apply(read_umask(system));
            system.umask(new_mask);

            if command.is_empty() {
                print_mask(output, new_mask, symbolic)
            } else {
                execute(system, command)
            }
        }
    }
}

/// Replaces the current process image with the given command.
///
/// `command` must not be empty. This function returns only on failure.
fn execute<S: System>(system: &mut S, command: Vec<String>) -> Result<(), Error> {
    let name = command[0].clone();
    let args: Vec<CString> = match command.into_iter().map(CString::new).collect() {
        Ok(args) => args,
        // A command string containing a NUL byte cannot reach the system.
        Err(_) => {
            return Err(Error::Exec {
                command: name,
                errno: Errno::EILSEQ,
            })
        }
    };

    let errno = match system.execvp(&args[0], &args) {
        Ok(infallible) => match infallible {},
        Err(errno) => errno,
    };
    Err(Error::Exec {
        command: name,
        errno,
    })
}

fn print<W: Write>(output: &mut W, text: &str) -> Result<(), Error> {
    output
        .write_all(text.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|error| Error::Output(Errno::from_raw(error.raw_os_error().unwrap_or(0))))
}

fn print_mask<W: Write>(output: &mut W, mask: Mode, symbolic: bool) -> Result<(), Error> {
    let mut text = if symbolic {
        format_symbolic(mask)
    } else {
        format_octal(mask)
    };
    text.push('\n');
    print(output, &text)
}
