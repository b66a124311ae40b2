//! Locating the candidate implementation of a reference method.

use crate::member::{Member, MemberTable};
use crate::signature::{params_compatible, Signature};

/// Find the candidate member that best matches `reference`.
///
/// Only members named exactly like the reference are considered. Among
/// those, the first whose parameters are compatible with the reference
/// wins; otherwise the first same-named member is returned so the header
/// check can report what is wrong with it. Returns `None` if no member
/// carries the reference's name.
pub fn resolve<'a>(table: &'a MemberTable, reference: &Signature) -> Option<&'a Member> {
    let mut first_named = None;
    for member in table.named(reference.name()) {
        if params_compatible(reference.params(), member.signature().params()) {
            return Some(member);
        }
        first_named.get_or_insert(member);
    }
    first_named
}
