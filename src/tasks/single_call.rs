//! The tracks answerable with exactly one SAT call (§4.5 of the design): the
//! credulous admissible-family tracks (`DC-CO`/`DC-PR` via ADM, `DC-ST` via
//! STB) and the single-extension/skeptical stable tracks (`SE-ST`, `DS-ST`).

use crate::encodings::{add_adm_clauses, add_grounded_facts, add_stb_clauses, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};
use crate::tasks::se_pr;

/// `DC-CO`/`DC-PR`: is there an admissible set containing `query`? On YES,
/// grows that set into a preferred extension (always a valid complete-
/// extension witness too, since preferred extensions are complete) using a
/// second, disposable backend.
pub fn dc_co_pr(
    af: &Af,
    grounded: &Grounded,
    sat: &mut dyn SatBackend,
    growth: &mut dyn SatBackend,
    query: usize,
) -> (bool, Vec<usize>) {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_adm_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);
    sat.assume(vars.in_[query]);

    match sat.solve().expect("SAT backend failure in DC-CO/DC-PR") {
        Outcome::Unsat => (false, Vec::new()),
        Outcome::Sat => {
            let seed: Vec<usize> = (0..n).filter(|&i| sat.value(vars.in_[i])).collect();
            (true, se_pr::solve(af, grounded, growth, &seed))
        }
    }
}

/// `DC-ST`: is there a stable extension containing `query`?
pub fn dc_st(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend, query: usize) -> (bool, Vec<usize>) {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_stb_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);
    sat.assume(vars.in_[query]);

    match sat.solve().expect("SAT backend failure in DC-ST") {
        Outcome::Unsat => (false, Vec::new()),
        Outcome::Sat => {
            let ext: Vec<usize> = (0..n).filter(|&i| sat.value(vars.in_[i])).collect();
            (true, ext)
        }
    }
}

/// `SE-ST`: one stable extension, or `None` if none exists.
pub fn se_st(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> Option<Vec<usize>> {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_stb_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);

    match sat.solve().expect("SAT backend failure in SE-ST") {
        Outcome::Unsat => None,
        Outcome::Sat => Some((0..n).filter(|&i| sat.value(vars.in_[i])).collect()),
    }
}

/// `DS-ST`: is `query` in every stable extension? Returns `(accepted,
/// witness)`. When no stable extension exists the acceptance is vacuously
/// true and no witness is produced (there is nothing to show).
pub fn ds_st(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend, query: usize) -> (bool, Option<Vec<usize>>) {
    let n = af.len();
    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    sat.init(vm.total());
    add_stb_clauses(sat, af, &vars);
    add_grounded_facts(sat, af, &vars, grounded);

    match sat.solve().expect("SAT backend failure in DS-ST (existence check)") {
        Outcome::Unsat => return (true, None),
        Outcome::Sat => {}
    }

    sat.assume(-vars.in_[query]);
    match sat.solve().expect("SAT backend failure in DS-ST (refutation)") {
        Outcome::Unsat => {
            // Every stable extension contains query; exhibit one.
            let mut vm2 = VarMap::new();
            let vars2 = Vars::alloc(&mut vm2, n);
            sat.init(vm2.total());
            add_stb_clauses(sat, af, &vars2);
            add_grounded_facts(sat, af, &vars2, grounded);
            sat.assume(vars2.in_[query]);
            match sat.solve().expect("SAT backend failure in DS-ST (witness)") {
                Outcome::Sat => {
                    let ext: Vec<usize> = (0..n).filter(|&i| sat.value(vars2.in_[i])).collect();
                    (true, Some(ext))
                }
                Outcome::Unsat => (true, None),
            }
        }
        Outcome::Sat => {
            let ext: Vec<usize> = (0..n).filter(|&i| sat.value(vars.in_[i])).collect();
            (false, Some(ext))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    fn two_cycle() -> Af {
        Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)])
    }

    #[test]
    fn dc_co_pr_accepts_either_side_of_a_two_cycle() {
        let af = two_cycle();
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let mut growth = EmbeddedBackend::new();
        let (yes, ext) = dc_co_pr(&af, &g, &mut sat, &mut growth, 0);
        assert!(yes);
        assert!(ext.contains(&0));
    }

    #[test]
    fn dc_st_self_loop_is_rejected() {
        let af = Af::new(vec!["a".into()], vec![(0, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let (yes, _) = dc_st(&af, &g, &mut sat, 0);
        assert!(!yes);
    }

    #[test]
    fn se_st_two_cycle_has_a_witness() {
        let af = two_cycle();
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = se_st(&af, &g, &mut sat).unwrap();
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn se_st_self_loop_has_no_witness() {
        let af = Af::new(vec!["a".into()], vec![(0, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        assert!(se_st(&af, &g, &mut sat).is_none());
    }

    #[test]
    fn ds_st_self_loop_is_vacuously_accepted() {
        let af = Af::new(vec!["a".into()], vec![(0, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let (accepted, witness) = ds_st(&af, &g, &mut sat, 0);
        assert!(accepted);
        assert!(witness.is_none());
    }

    #[test]
    fn ds_st_two_cycle_is_rejected() {
        let af = two_cycle();
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let (accepted, witness) = ds_st(&af, &g, &mut sat, 0);
        assert!(!accepted);
        assert!(witness.is_some());
    }
}
