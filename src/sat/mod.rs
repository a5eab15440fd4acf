//! The SAT adapter: a small IPASIR-like trait with two back-ends.

#[cfg(feature = "embedded")]
pub mod embedded;
pub mod process;

use crate::error::SatError;

pub const SAT: i32 = 10;
pub const UNSAT: i32 = 20;

/// Outcome of a [`SatBackend::solve`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Sat,
    Unsat,
}

impl Outcome {
    pub fn code(self) -> i32 {
        match self {
            Outcome::Sat => SAT,
            Outcome::Unsat => UNSAT,
        }
    }

    pub fn is_sat(self) -> bool {
        matches!(self, Outcome::Sat)
    }
}

/// A minimal incremental SAT solver contract: `init`, `add`/`add_clause`,
/// `assume`, `solve`, `value`. Modeled after IPASIR; implementations are
/// free to be genuinely incremental or to buffer and rebuild.
pub trait SatBackend {
    /// Starts a fresh problem over variables `1..=n_vars`.
    fn init(&mut self, n_vars: usize);

    /// Appends a literal to the clause currently being built; `0` closes it.
    fn add(&mut self, lit: i32);

    /// Appends a whole clause at once.
    fn add_clause(&mut self, lits: &[i32]) {
        for &l in lits {
            self.add(l);
        }
        self.add(0);
    }

    /// Assumes `lit` for the next `solve()` call only.
    fn assume(&mut self, lit: i32);

    /// Solves, consuming and clearing pending assumptions.
    fn solve(&mut self) -> Result<Outcome, SatError>;

    /// Valid only immediately after a `solve()` that returned `Outcome::Sat`.
    fn value(&self, var: i32) -> bool;
}

/// Allocates two (or more) disjoint variable ranges out of one running
/// counter, so encodings needing several copies of the `in`/`out` variables
/// (e.g. the cross-attack encoding) don't hand-manage offsets.
#[derive(Clone, Debug, Default)]
pub struct VarMap {
    next: i32,
}

impl VarMap {
    pub fn new() -> Self {
        VarMap { next: 1 }
    }

    /// Reserves `count` fresh variables and returns the id of the first one.
    pub fn reserve(&mut self, count: usize) -> i32 {
        let base = self.next;
        self.next += count as i32;
        base
    }

    pub fn total(&self) -> usize {
        (self.next - 1).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_map_allocates_disjoint_ranges() {
        let mut vm = VarMap::new();
        let a = vm.reserve(5);
        let b = vm.reserve(3);
        assert_eq!(a, 1);
        assert_eq!(b, 6);
        assert_eq!(vm.total(), 8);
    }
}
