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

//! [`System`] and its implementors
//!
//! The `System` trait covers the two system interfaces this program needs:
//! the file mode creation mask and process image replacement. [`RealSystem`]
//! calls into the operating system; [`VirtualSystem`] simulates both
//! interfaces in memory so the rest of the program can be tested without
//! touching process-global state.

use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::fmt::Debug;

#[doc(no_inline)]
pub use nix::errno::Errno;

#[cfg(unix)]
type RawModeDef = nix::libc::mode_t;
#[cfg(not(unix))]
type RawModeDef = u32;

/// Raw file permission bits type
///
/// This is a type alias for the raw file permission bits type `mode_t`
/// declared in the [`libc`](nix::libc) crate. On non-Unix platforms, this
/// type is hard-coded to `u32`.
///
/// Permission bits are usually wrapped in the [`Mode`] type for better type
/// safety, so this type is not used directly in most cases.
pub type RawMode = RawModeDef;

/// File mode creation mask
///
/// This type implements the new type pattern for the raw permission bits
/// type [`RawMode`]. The wrapped value is a bitwise OR of the permission
/// bits to be turned off when creating a file, always within `0..=0o777`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Mode(pub RawMode);

impl Debug for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mode({:#o})", self.0)
    }
}

/// API to the system-managed parts of the environment
///
/// The methods of this trait are thin wrappers around the corresponding
/// system calls.
pub trait System: Debug {
    /// Sets the file mode creation mask and returns the previous mask.
    ///
    /// This is a thin wrapper around the `umask` system call, which replaces
    /// the mask and returns the old one in a single operation. The system
    /// provides no way to examine the mask without replacing it; use
    /// [`read_umask`] to query it non-destructively.
    fn umask(&mut self, new_mask: Mode) -> Mode;

    /// Replaces the current process image with an external utility.
    ///
    /// This is a thin wrapper around the `execvp` system call, which locates
    /// the utility using the standard `PATH` search. On success, the current
    /// program ceases to exist, so this function can only return an error.
    fn execvp(&mut self, command: &CStr, args: &[CString]) -> nix::Result<Infallible>;
}

/// Returns the current file mode creation mask.
///
/// The mask can only be queried by replacing it, so this function briefly
/// clears the mask and immediately restores the previous value. The net
/// effect on the system is nil.
pub fn read_umask<S: System + ?Sized>(system: &mut S) -> Mode {
    let mask = system.umask(Mode(0));
    system.umask(mask);
    mask
}

/// Implementation of [`System`] that actually interacts with the system
///
/// `RealSystem` is an empty `struct` because the underlying operating system
/// holds the state.
#[derive(Debug)]
pub struct RealSystem(());

impl RealSystem {
    /// Returns an instance of `RealSystem`.
    ///
    /// # Safety
    ///
    /// This function is marked `unsafe` because the file mode creation mask
    /// is process-global state. The caller must make sure no other part of
    /// the program depends on the mask while a `RealSystem` is in use.
    pub unsafe fn new() -> Self {
        RealSystem(())
    }
}

impl System for RealSystem {
    fn umask(&mut self, new_mask: Mode) -> Mode {
        let new_mask = nix::sys::stat::Mode::from_bits_truncate(new_mask.0);
        Mode(nix::sys::stat::umask(new_mask).bits())
    }

    fn execvp(&mut self, command: &CStr, args: &[CString]) -> nix::Result<Infallible> {
        loop {
            // TODO Use Result::into_err
            let result = nix::unistd::execvp(command, args);
            if result != Err(Errno::EINTR) {
                return result;
            }
        }
    }
}

/// Implementation of [`System`] that simulates the system in memory
///
/// This implementor is for testing the driver logic. The mask lives in an
/// ordinary field, and `execvp` only records its arguments and fails with
/// [`exec_error`](Self::exec_error).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VirtualSystem {
    /// Current file mode creation mask
    pub umask: Mode,
    /// Error that [`System::execvp`] returns
    pub exec_error: Errno,
    /// Arguments to the last [`System::execvp`] call
    pub last_exec: Option<(CString, Vec<CString>)>,
}

impl VirtualSystem {
    /// Creates a virtual system with the given mask.
    #[must_use]
    pub fn new(umask: Mode) -> Self {
        VirtualSystem {
            umask,
            exec_error: Errno::ENOSYS,
            last_exec: None,
        }
    }
}

impl System for VirtualSystem {
    fn umask(&mut self, new_mask: Mode) -> Mode {
        std::mem::replace(&mut self.umask, new_mask)
    }

    fn execvp(&mut self, command: &CStr, args: &[CString]) -> nix::Result<Infallible> {
        self.last_exec = Some((command.to_owned(), args.to_owned()));
        Err(self.exec_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_umask_returns_previous_mask() {
        let mut system = VirtualSystem::new(Mode(0o022));
        assert_eq!(system.umask(Mode(0o077)), Mode(0o022));
        assert_eq!(system.umask(Mode(0)), Mode(0o077));
    }

    #[test]
    fn read_umask_restores_mask() {
        let mut system = VirtualSystem::new(Mode(0o027));
        assert_eq!(read_umask(&mut system), Mode(0o027));
        assert_eq!(system.umask, Mode(0o027));
    }

    #[test]
    fn virtual_execvp_records_arguments() {
        let mut system = VirtualSystem::new(Mode(0));
        let command = CString::new("true").unwrap();
        let args = [CString::new("true").unwrap(), CString::new("-x").unwrap()];
        let result = system.execvp(&command, &args);
        assert_eq!(result, Err(Errno::ENOSYS));
        assert_eq!(system.last_exec, Some((command, args.to_vec())));
    }
}
