//! `CE-*`: count (rather than enumerate) extensions. The only tasks in this
//! engine that loop over *all* solutions of an encoding instead of stopping
//! at the first or the best one.

use crate::encodings::{add_adm_clauses, add_com_clauses, add_grounded_facts, add_stb_clauses, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};
use crate::tasks::se_pr;

/// `CE-CO`: count complete extensions by repeatedly solving the COM
/// encoding and blocking the exact `in` vector just found.
pub fn count_co(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> usize {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_com_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);

    let mut count = 0usize;
    loop {
        match sat.solve().expect("SAT backend failure in CE-CO") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                count += 1;
                let block: Vec<i32> = (0..n)
                    .map(|i| if sat.value(vars.in_[i]) { -vars.in_[i] } else { vars.in_[i] })
                    .collect();
                sat.add_clause(&block);
            }
        }
    }
    count
}

/// `CE-ST`: count stable extensions the same way, over the `in`-only STB
/// encoding (a blocking clause there already means "some previously-OUT
/// argument is now IN", since there is no separate `out` copy).
pub fn count_st(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> usize {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_stb_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);

    let mut count = 0usize;
    loop {
        match sat.solve().expect("SAT backend failure in CE-ST") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                count += 1;
                let block: Vec<i32> = (0..n)
                    .filter(|&i| !sat.value(vars.in_[i]))
                    .map(|i| vars.in_[i])
                    .collect();
                sat.add_clause(&block);
            }
        }
    }
    count
}

/// `CE-PR`: count preferred extensions. Each round finds an admissible
/// candidate containing at least one `IN` argument, grows it to a maximal
/// (preferred) extension with a disposable `growth` backend, then blocks
/// every superset of that extension before the next round. The empty set
/// is the unique preferred extension of an AF with no non-empty one, so a
/// zero count is reported as 1.
pub fn count_pr(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend, growth: &mut dyn SatBackend) -> usize {
    let n = af.len();
    if n == 0 {
        return 1;
    }

    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_adm_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);
    let all_in: Vec<i32> = (0..n).map(|i| vars.in_[i]).collect();
    sat.add_clause(&all_in);

    let mut count = 0usize;
    loop {
        match sat.solve().expect("SAT backend failure in CE-PR") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                let seed: Vec<usize> = (0..n).filter(|&i| sat.value(vars.in_[i])).collect();
                let extension = se_pr::solve(af, grounded, growth, &seed);
                count += 1;
                // Forbid this extension and every superset of it: require at
                // least one of its members to be OUT next time.
                let block: Vec<i32> = extension.iter().map(|&i| -vars.in_[i]).collect();
                sat.add_clause(&block);
            }
        }
    }

    if count == 0 {
        1
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    #[test]
    fn two_cycle_has_two_complete_extensions() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        // complete extensions of a two-cycle: grounded (empty) + both
        // singleton stable/preferred extensions = 3 complete extensions.
        assert_eq!(count_co(&af, &g, &mut sat), 3);
    }

    #[test]
    fn defended_af_has_one_complete_extension() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (2, 1)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        assert_eq!(count_co(&af, &g, &mut sat), 1);
    }

    #[test]
    fn self_loop_has_zero_stable_extensions() {
        let af = Af::new(vec!["a".into()], vec![(0, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        assert_eq!(count_st(&af, &g, &mut sat), 0);
    }

    #[test]
    fn two_cycle_has_two_stable_extensions() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        assert_eq!(count_st(&af, &g, &mut sat), 2);
    }

    #[test]
    fn triangle_has_exactly_one_preferred_extension() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (1, 2), (2, 0)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let mut growth = EmbeddedBackend::new();
        assert_eq!(count_pr(&af, &g, &mut sat, &mut growth), 1);
    }

    #[test]
    fn even_cycle_has_four_preferred_extensions() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            vec![(0, 1), (1, 0), (2, 3), (3, 2)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let mut growth = EmbeddedBackend::new();
        assert_eq!(count_pr(&af, &g, &mut sat, &mut growth), 4);
    }
}
