//! Computation of the (unique) ideal extension via the preferred super-core.

use crate::encodings::{add_adm_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};

/// Computes the preferred super-core (PSC) as a per-argument membership
/// vector. The PSC starts as every argument not attacked by the grounded
/// extension, and repeatedly loses every argument attacked from within it by
/// some admissible set, until no such set exists. Returns `(psc, shortcut)`
/// where `shortcut` is `true` when the very first round already found no
/// attacking admissible set, meaning the ideal extension is exactly `G_in`.
pub fn compute_psc(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> (Vec<bool>, bool) {
    let n = af.len();
    let mut psc: Vec<bool> = (0..n).map(|i| !grounded.g_out.get(i)).collect();
    let mut first_round = true;
    let mut shortcut = false;

    loop {
        if !psc.iter().any(|&m| m) {
            break;
        }

        let mut vm = VarMap::new();
        let vars = Vars::alloc(&mut vm, n);
        sat.init(vm.total());
        add_adm_clauses(sat, af, &vars);
        add_grounded_facts(sat, af, &vars, grounded);

        // "some attack lands on a PSC member": at least one attack j->k with
        // k in PSC and in[j] true.
        let mut at_least_one: Vec<i32> = Vec::new();
        for &(j, k) in af.attacks() {
            if psc[k] {
                at_least_one.push(vars.in_[j]);
            }
        }
        if at_least_one.is_empty() {
            break;
        }
        sat.add_clause(&at_least_one);

        match sat.solve().expect("SAT backend failure during ideal computation") {
            Outcome::Unsat => {
                if first_round {
                    shortcut = true;
                }
                break;
            }
            Outcome::Sat => {
                first_round = false;
                let mut changed = false;
                for &(j, k) in af.attacks() {
                    if psc[k] && sat.value(vars.in_[j]) {
                        psc[k] = false;
                        changed = true;
                    }
                }
                if !changed {
                    break;
                }
            }
        }
    }

    (psc, shortcut)
}

/// Given a PSC membership vector, computes its greatest admissible subset
/// by pure graph reasoning (no SAT call needed once the PSC is known): take
/// `I0 = PSC \ {attacked from within PSC}`, then iteratively drop every
/// member not defended by the rest of `I`.
pub fn greatest_admissible_subset(af: &Af, psc: &[bool]) -> Vec<usize> {
    let n = af.len();
    let mut i_set: Vec<bool> = (0..n)
        .map(|k| psc[k] && !af.attackers_of(k).iter().any(|&j| psc[j]))
        .collect();

    loop {
        let mut changed = false;
        for k in 0..n {
            if !i_set[k] {
                continue;
            }
            let defended = af
                .attackers_of(k)
                .iter()
                .all(|&j| af.attackers_of(j).iter().any(|&d| i_set[d]));
            if !defended {
                i_set[k] = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    (0..n).filter(|&i| i_set[i]).collect()
}

/// Computes the ideal extension: the greatest admissible set contained in
/// the preferred super-core.
pub fn compute(af: &Af, grounded: &Grounded, sat: &mut dyn SatBackend) -> Vec<usize> {
    if af.len() == 0 {
        return Vec::new();
    }

    let (psc, shortcut) = compute_psc(af, grounded, sat);
    if shortcut {
        return grounded.g_in.iter().collect();
    }
    greatest_admissible_subset(af, &psc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    #[test]
    fn ideal_of_empty_grounded_two_cycle() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ideal = compute(&af, &g, &mut sat);
        assert!(ideal.is_empty());
    }

    #[test]
    fn ideal_contains_grounded() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (2, 1)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ideal = compute(&af, &g, &mut sat);
        let mut ideal = ideal;
        ideal.sort();
        assert_eq!(ideal, vec![0, 2]);
    }

    #[test]
    fn ideal_of_triangle_is_empty() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (1, 2), (2, 0)],
        );
        let g = Grounded::compute(&af);
        let mut sat = EmbeddedBackend::new();
        let ideal = compute(&af, &g, &mut sat);
        assert!(ideal.is_empty());
    }
}
