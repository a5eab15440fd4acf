//! DS-PR: skeptical acceptance under preferred semantics, via the "fudge"
//! two-session characterization: q is *not* skeptically accepted iff some
//! admissible set attacks every admissible set containing q.

use crate::encodings::{add_adm_clauses, add_cross_attack_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};
use crate::tasks::se_pr;

pub struct DsPrSessions<'a> {
    pub adm: &'a mut dyn SatBackend,
    pub att_adm: &'a mut dyn SatBackend,
    pub witness: &'a mut dyn SatBackend,
}

/// Returns `(accepted, witness)`. `witness` is a preferred extension: either
/// containing `query` (when `accepted`) or not (the counter-witness).
///
/// `forced_in` seeds every admissible-set search with a set of arguments
/// already known to be acceptable (e.g. the ideal extension built so far by
/// `EA-PR`), so the only admissible sets considered are ones extending it.
pub fn solve(
    af: &Af,
    grounded: &Grounded,
    sessions: DsPrSessions<'_>,
    query: usize,
    forced_in: &[usize],
) -> (bool, Vec<usize>) {
    let DsPrSessions { adm, att_adm, witness } = sessions;
    let n = af.len();

    let mut vm_adm = VarMap::new();
    let adm_vars = Vars::alloc(&mut vm_adm, n);
    adm.init(vm_adm.total());
    add_adm_clauses(adm, af, &adm_vars);
    add_grounded_facts(adm, af, &adm_vars, grounded);
    for &i in forced_in {
        adm.add_clause(&[adm_vars.in_[i]]);
    }

    // Step 1: is there any admissible set containing q at all?
    adm.assume(adm_vars.in_[query]);
    match adm.solve().expect("SAT backend failure in DS-PR (step 1)") {
        Outcome::Unsat => {
            return (false, se_pr::solve(af, grounded, witness, forced_in));
        }
        Outcome::Sat => {}
    }

    let mut vm_att = VarMap::new();
    let att_vars = Vars::alloc(&mut vm_att, n);
    let attacked_vars = Vars::alloc(&mut vm_att, n);
    let aux_base = vm_att.reserve(af.attacks().len().max(1));
    att_adm.init(vm_att.total());
    add_adm_clauses(att_adm, af, &att_vars);
    add_grounded_facts(att_adm, af, &att_vars, grounded);
    add_adm_clauses(att_adm, af, &attacked_vars);
    add_grounded_facts(att_adm, af, &attacked_vars, grounded);
    add_cross_attack_clauses(att_adm, af, aux_base, &att_vars, &attacked_vars);

    // Block the attacker copy from being exactly the admissible set just
    // found for q: require at least one argument outside it to be in.
    let block: Vec<i32> = (0..n)
        .filter(|&i| !adm.value(adm_vars.in_[i]))
        .map(|i| att_vars.in_[i])
        .collect();
    att_adm.add_clause(&block);

    // Step 2: is there an admissible set directly attacking (hence excluding) q?
    adm.assume(adm_vars.out[query]);
    if let Outcome::Sat = adm.solve().expect("SAT backend failure in DS-PR (step 2)") {
        let mut seed: Vec<usize> = (0..n).filter(|&i| adm.value(adm_vars.in_[i])).collect();
        seed.extend_from_slice(forced_in);
        return (false, se_pr::solve(af, grounded, witness, &seed));
    }

    // Main loop: the "attacked" copy always contains q.
    att_adm.add_clause(&[attacked_vars.in_[query]]);
    loop {
        match att_adm.solve().expect("SAT backend failure in DS-PR (main loop)") {
            Outcome::Unsat => {
                let mut seed: Vec<usize> = forced_in.to_vec();
                seed.push(query);
                return (true, se_pr::solve(af, grounded, witness, &seed));
            }
            Outcome::Sat => {}
        }

        adm.assume(adm_vars.in_[query]);
        for i in 0..n {
            if att_adm.value(att_vars.in_[i]) {
                adm.assume(adm_vars.in_[i]);
            }
        }
        match adm.solve().expect("SAT backend failure in DS-PR (main loop, extend)") {
            Outcome::Unsat => {
                let mut seed: Vec<usize> = (0..n).filter(|&i| att_adm.value(att_vars.in_[i])).collect();
                seed.extend_from_slice(forced_in);
                return (false, se_pr::solve(af, grounded, witness, &seed));
            }
            Outcome::Sat => {
                let block: Vec<i32> = (0..n)
                    .filter(|&i| !adm.value(adm_vars.in_[i]))
                    .map(|i| att_vars.in_[i])
                    .collect();
                att_adm.add_clause(&block);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    #[test]
    fn two_cycle_rejects_skeptical_preferred() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let mut adm = EmbeddedBackend::new();
        let mut att_adm = EmbeddedBackend::new();
        let mut witness = EmbeddedBackend::new();
        let (accepted, _) = solve(
            &af,
            &g,
            DsPrSessions {
                adm: &mut adm,
                att_adm: &mut att_adm,
                witness: &mut witness,
            },
            0,
            &[],
        );
        assert!(!accepted);
    }

    #[test]
    fn unattacked_argument_is_skeptically_accepted() {
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(1, 2), (2, 1)],
        );
        let g = Grounded::compute(&af);
        let mut adm = EmbeddedBackend::new();
        let mut att_adm = EmbeddedBackend::new();
        let mut witness = EmbeddedBackend::new();
        let (accepted, ext) = solve(
            &af,
            &g,
            DsPrSessions {
                adm: &mut adm,
                att_adm: &mut att_adm,
                witness: &mut witness,
            },
            0,
            &[],
        );
        assert!(accepted);
        assert!(ext.contains(&0));
    }
}
