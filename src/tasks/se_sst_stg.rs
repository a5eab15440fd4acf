//! SE-SST / SE-STG: grow the decided (`IN` ∪ `OUT`) set to a ⊆-maximal one,
//! over the admissible encoding (semi-stable) or the conflict-free encoding
//! (stage).

use crate::encodings::{add_adm_clauses, add_cf_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::labeling::{Label, Labeling};
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};

/// Grows the grounded labeling into one with a ⊆-maximal decided set.
pub fn maximize_decided(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend, use_adm: bool) -> Labeling {
    let n = af.len();
    let mut labeling = Labeling::new(n, false);
    for i in grounded.g_in.iter() {
        labeling.set_in(i);
    }
    for i in grounded.g_out.iter() {
        labeling.set_out(i);
    }

    loop {
        let mut vm = VarMap::new();
        let vars = Vars::alloc(&mut vm, n);
        sat.init(vm.total());
        if use_adm {
            add_adm_clauses(sat, af, &vars);
        } else {
            add_cf_clauses(sat, af, &vars);
        }
        add_grounded_facts(sat, af, &vars, grounded);

        for i in 0..n {
            match labeling.label_of(i) {
                Label::In => sat.add_clause(&[vars.in_[i]]),
                Label::Out => sat.add_clause(&[vars.out[i]]),
                Label::Undec => {}
            }
        }

        let undecided: Vec<i32> = (0..n)
            .filter(|&i| labeling.label_of(i) == Label::Undec)
            .flat_map(|i| vec![vars.in_[i], vars.out[i]])
            .collect();
        if undecided.is_empty() {
            break;
        }
        sat.add_clause(&undecided);

        match sat.solve().expect("SAT backend failure while maximizing decided set") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                let mut changed = false;
                for i in 0..n {
                    if labeling.label_of(i) != Label::Undec {
                        continue;
                    }
                    if sat.value(vars.in_[i]) {
                        labeling.set_in(i);
                        changed = true;
                    } else if sat.value(vars.out[i]) {
                        labeling.set_out(i);
                        changed = true;
                    }
                }
                if !changed {
                    break;
                }
            }
        }
    }

    labeling
}

pub fn solve_se_sst(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> Vec<usize> {
    maximize_decided(af, grounded, sat, true).in_ids()
}

pub fn solve_se_stg(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> Vec<usize> {
    maximize_decided(af, grounded, sat, false).in_ids()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    #[test]
    fn two_cycle_semi_stable_is_singleton() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = solve_se_sst(&af, &g, &mut sat);
        assert_eq!(ext.len(), 1);
    }

    #[test]
    fn stage_of_triangle_is_singleton() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (1, 2), (2, 0)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ext = solve_se_stg(&af, &g, &mut sat);
        assert_eq!(ext.len(), 1);
    }
}
