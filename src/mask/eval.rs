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

//! Computation of the new file mode creation mask
//!
//! This module contains the function that applies parsed symbolic clauses
//! to the current mask, producing the mask to be committed.

use super::symbol::{Clause, Operator};
use crate::system::RawMode;

/// Computes a mask to be set.
///
/// This function applies the given clauses, in order, to the current mask
/// and returns the result. The current mask and the result are both given
/// as negative bits of the file mode creation mask, that is, as the
/// permission bits the mask leaves granted. In this representation the `-`
/// operator, which sets bits in the real mask, clears bits, and `+` and `=`
/// set them, so each operator is a single bitwise step.
#[must_use]
pub fn new_mask(current: RawMode, clauses: &[Clause]) -> RawMode {
    let mut result = current;
    for clause in clauses {
        let who = clause.who.mask;
        for action in &clause.actions {
            let permission = action.permission;
            result = match action.operator {
                Operator::Add => (permission & who) | result,
                Operator::Remove => !(permission & who) & result,
                Operator::Set => (permission & who) | (result & !who),
            };
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::symbol::{Action, Who};

    fn clause(who: RawMode, actions: &[(Operator, RawMode)]) -> Clause {
        Clause {
            who: Who { mask: who },
            actions: actions
                .iter()
                .map(|&(operator, permission)| Action {
                    operator,
                    permission,
                })
                .collect(),
        }
    }

    #[test]
    fn new_mask_without_clauses() {
        assert_eq!(new_mask(0o766, &[]), 0o766);
    }

    #[test]
    fn new_mask_all_set() {
        let clauses = [clause(0o777, &[(Operator::Set, 0o635)])];
        assert_eq!(new_mask(0o766, &clauses), 0o635);
    }

    #[test]
    fn new_mask_user_set() {
        let clauses = [clause(0o700, &[(Operator::Set, 0o635)])];
        assert_eq!(new_mask(0o766, &clauses), 0o666);
    }

    #[test]
    fn new_mask_group_set() {
        let clauses = [clause(0o070, &[(Operator::Set, 0o635)])];
        assert_eq!(new_mask(0o766, &clauses), 0o736);
    }

    #[test]
    fn new_mask_other_set() {
        let clauses = [clause(0o007, &[(Operator::Set, 0o635)])];
        assert_eq!(new_mask(0o766, &clauses), 0o765);
    }

    #[test]
    fn new_mask_add() {
        let clauses = [clause(0o770, &[(Operator::Add, 0o635)])];
        assert_eq!(new_mask(0o653, &clauses), 0o673);
    }

    #[test]
    fn new_mask_remove() {
        let clauses = [clause(0o770, &[(Operator::Remove, 0o635)])];
        assert_eq!(new_mask(0o753, &clauses), 0o143);
    }

    #[test]
    fn new_mask_with_multiple_actions() {
        // "ug=rwx-w" grants everything to user and group, then takes back
        // the write permission.
        let clauses = [clause(
            0o770,
            &[(Operator::Set, 0o777), (Operator::Remove, 0o222)],
        )];
        assert_eq!(new_mask(0o007, &clauses), 0o557);
    }

    #[test]
    fn new_mask_with_multiple_clauses() {
        let clauses = [
            clause(0o700, &[(Operator::Set, 0o635)]),
            clause(0o007, &[(Operator::Add, 0o111)]),
        ];
        assert_eq!(new_mask(0o766, &clauses), 0o667);
    }

    #[test]
    fn later_clauses_override_earlier_ones() {
        // "a=,u+w" denies everything, then grants user write.
        let clauses = [
            clause(0o777, &[(Operator::Set, 0)]),
            clause(0o700, &[(Operator::Add, 0o222)]),
        ];
        assert_eq!(new_mask(0o777, &clauses), 0o200);
    }
}
