//! `EA-PR`: enumerate every skeptically preferred-accepted argument.
//!
//! Builds the ideal extension as a starting accumulator (`ACC`), widens the
//! search to the "strong PSC" (every argument occurring `IN` in some
//! admissible set that is still a candidate, i.e. inside the PSC but not yet
//! accepted), then runs `DS-PR`, seeded with `ACC`, on each strong-PSC
//! argument not yet accepted, growing `ACC` whenever it answers YES.

use crate::encodings::{add_adm_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::ideal;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};
use crate::tasks::ds_pr::{self, DsPrSessions};

pub struct EaPrSessions<'a> {
    pub psc: &'a mut dyn SatBackend,
    pub strong: &'a mut dyn SatBackend,
    pub ds_adm: &'a mut dyn SatBackend,
    pub ds_att_adm: &'a mut dyn SatBackend,
    pub witness: &'a mut dyn SatBackend,
}

pub fn solve(af: &Af, grounded: &Grounded, sessions: EaPrSessions<'_>) -> Vec<usize> {
    let n = af.len();
    let EaPrSessions {
        psc,
        strong,
        ds_adm,
        ds_att_adm,
        witness,
    } = sessions;

    let (psc_members, shortcut) = ideal::compute_psc(af, grounded, psc);
    let acc: Vec<usize> = if shortcut {
        grounded.g_in.iter().collect()
    } else {
        ideal::greatest_admissible_subset(af, &psc_members)
    };
    let mut accepted: Vec<bool> = vec![false; n];
    for &i in &acc {
        accepted[i] = true;
    }

    // Strong PSC: repeatedly ask whether some admissible set still has a new
    // `IN` member inside `PSC \ accepted`.
    let mut strong_psc: Vec<bool> = accepted.clone();
    loop {
        let target: Vec<usize> = (0..n)
            .filter(|&i| psc_members[i] && !strong_psc[i])
            .collect();
        if target.is_empty() {
            break;
        }

        let mut vm = VarMap::new();
        let vars = Vars::alloc(&mut vm, n);
        strong.init(vm.total());
        add_adm_clauses(strong, af, &vars);
        add_grounded_facts(strong, af, &vars, grounded);
        let at_least_one: Vec<i32> = target.iter().map(|&i| vars.in_[i]).collect();
        strong.add_clause(&at_least_one);

        match strong.solve().expect("SAT backend failure in EA-PR (strong PSC)") {
            Outcome::Unsat => break,
            Outcome::Sat => {
                let mut changed = false;
                for &i in &target {
                    if strong.value(vars.in_[i]) {
                        strong_psc[i] = true;
                        changed = true;
                    }
                }
                if !changed {
                    break;
                }
            }
        }
    }

    for i in 0..n {
        if !strong_psc[i] || accepted[i] {
            continue;
        }
        let forced: Vec<usize> = (0..n).filter(|&j| accepted[j]).collect();
        let (yes, _) = ds_pr::solve(
            af,
            grounded,
            DsPrSessions {
                adm: ds_adm,
                att_adm: ds_att_adm,
                witness,
            },
            i,
            &forced,
        );
        if yes {
            accepted[i] = true;
        }
    }

    (0..n).filter(|&i| accepted[i]).collect()
}
