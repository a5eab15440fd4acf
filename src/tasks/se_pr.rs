//! SE-PR: compute one preferred extension, optionally seeded with an
//! admissible set that must be absorbed into it (used by `DS-PR`/`EA-PR`).

use crate::encodings::{add_adm_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};

/// Grows `seed` (or the grounded extension, if `seed` is empty) into a
/// preferred extension by repeatedly asking for an admissible model with at
/// least one currently-outside argument `IN`, then permanently fixing every
/// argument absorbed that way with a unit clause. Arguments that come back
/// `OUT` in a given round are never blocked — a later round, with more
/// arguments fixed `IN`, may still admit them — so the loop only stops when
/// no admissible superset of the current set exists.
pub fn solve(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend, seed: &[usize]) -> Vec<usize> {
    let n = af.len();
    if n == 0 {
        return Vec::new();
    }

    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_adm_clauses(sat, af, &vars);
    let all_grounded = add_grounded_facts(sat, af, &vars, grounded);

    let mut s: Vec<bool> = (0..n).map(|i| grounded.g_in.get(i)).collect();
    for &i in seed {
        s[i] = true;
    }

    if all_grounded && seed.is_empty() {
        return (0..n).filter(|&i| s[i]).collect();
    }

    for &i in seed {
        sat.add_clause(&[vars.in_[i]]);
    }

    loop {
        let growth: Vec<i32> = (0..n).filter(|&i| !s[i]).map(|i| vars.in_[i]).collect();
        if growth.is_empty() {
            break;
        }
        sat.add_clause(&growth);
        match sat.solve().expect("SAT backend failure in SE-PR") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                for i in 0..n {
                    if !s[i] && sat.value(vars.in_[i]) {
                        s[i] = true;
                        sat.add_clause(&[vars.in_[i]]);
                    }
                }
            }
        }
    }

    (0..n).filter(|&i| s[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    #[test]
    fn two_cycle_returns_one_singleton_preferred() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = solve(&af, &g, &mut sat, &[]);
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn defended_af_returns_grounded_as_preferred() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (2, 1)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let mut ext = solve(&af, &g, &mut sat, &[]);
        ext.sort();
        assert_eq!(ext, vec![0, 2]);
    }

    #[test]
    fn seed_is_absorbed_into_result() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            vec![(0, 1), (2, 3), (3, 2)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = solve(&af, &g, &mut sat, &[0]);
        assert!(ext.contains(&0));
    }

    #[test]
    fn seeded_growth_reaches_maximality_across_disjoint_cycles() {
        // Three disjoint two-cycles: 0<->1, 2<->3, 4<->5. Seeding with {0}
        // must not stop at the first admissible model that also happens to
        // pick up one more cycle (e.g. {0,2}); it must grow to one argument
        // per cycle, since {0,2,4} is a strictly larger admissible set.
        let af = Af::new(
            vec!["0".into(), "1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
            vec![(0, 1), (1, 0), (2, 3), (3, 2), (4, 5), (5, 4)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = solve(&af, &g, &mut sat, &[0]);
        assert_eq!(ext.len(), 3);
        assert!(ext.contains(&0));
    }
}
