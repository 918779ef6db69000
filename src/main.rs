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

//! Command-line entry point
//!
//! This binary is a thin shim: it collects the arguments, hands them to
//! [`umaskexec::run`], and converts the result to an exit status. Error
//! messages are prefixed with the name the program was invoked as.

use std::io::Write;
use std::process::ExitCode;
use umaskexec::system::RealSystem;

fn main() -> ExitCode {
    let mut args = std::env::args();
    // Some systems allow execution without even the zeroth argument.
    let arg0 = args.next().unwrap_or_default();

    // SAFETY: this is the only system accessor in this single-threaded
    // program.
    let mut system = unsafe { RealSystem::new() };

    match umaskexec::run(&mut system, args, &mut std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            // Nothing left to do if the standard error is gone too.
            let _ = writeln!(std::io::stderr(), "{arg0}: {error}");
            ExitCode::FAILURE
        }
    }
}
