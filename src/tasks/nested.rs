//! Shared nested outer/inner SAT loop underlying `DC-SST`, `DS-SST`,
//! `DC-STG`, `DS-STG`: the outer loop finds a candidate (admissible for SST,
//! conflict-free for STG) containing or excluding the query argument; the
//! inner loop tries to grow that candidate's decided set while keeping the
//! query's membership fixed, to confirm it is actually semi-stable/stage.

use crate::encodings::{add_adm_clauses, add_cf_clauses, add_grounded_facts, Vars};
use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{Outcome, SatBackend, VarMap};

/// `assume_positive = true` models DC (keep the query argument `IN`);
/// `false` models DS (keep it `OUT`). Returns `(answer, witness)` where
/// `answer` is the generic YES/NO result and `witness` is the `IN`-set of
/// the extension that decided it, when one was found.
pub fn solve(
    af: &Af,
    grounded: &Grounded,
    outer: &mut dyn SatBackend,
    inner: &mut dyn SatBackend,
    use_adm: bool,
    query: usize,
    assume_positive: bool,
) -> (bool, Vec<usize>) {
    let n = af.len();

    let mut vm = VarMap::new();
    let vars = Vars::alloc(&mut vm, n);
    outer.init(vm.total());
    if use_adm {
        add_adm_clauses(outer, af, &vars);
    } else {
        add_cf_clauses(outer, af, &vars);
    }
    let all_grounded = add_grounded_facts(outer, af, &vars, grounded);

    if all_grounded {
        return (grounded.g_in.get(query), grounded.g_in.iter().collect());
    }

    loop {
        let outer_lit = if assume_positive {
            vars.in_[query]
        } else {
            -vars.in_[query]
        };
        outer.assume(outer_lit);
        match outer.solve().expect("SAT backend failure in nested loop (outer)") {
            Outcome::Unsat => return (!assume_positive, Vec::new()),
            Outcome::Sat => {}
        }

        let mut not_undec = vec![false; n];
        let mut in_arg = vec![false; n];
        for i in 0..n {
            let is_in = outer.value(vars.in_[i]);
            let is_out = outer.value(vars.out[i]);
            if is_in || is_out {
                not_undec[i] = true;
                if is_in {
                    in_arg[i] = true;
                }
            }
        }

        let mut vm2 = VarMap::new();
        let ivars = Vars::alloc(&mut vm2, n);
        inner.init(vm2.total());
        if use_adm {
            add_adm_clauses(inner, af, &ivars);
        } else {
            add_cf_clauses(inner, af, &ivars);
        }
        add_grounded_facts(inner, af, &ivars, grounded);
        for i in 0..n {
            if not_undec[i] {
                inner.add_clause(&[ivars.in_[i], ivars.out[i]]);
            }
        }
        let still_undec: Vec<i32> = (0..n)
            .filter(|&i| !not_undec[i])
            .flat_map(|i| vec![ivars.in_[i], ivars.out[i]])
            .collect();
        inner.add_clause(&still_undec);

        loop {
            let inner_lit = if assume_positive {
                ivars.in_[query]
            } else {
                -ivars.in_[query]
            };
            inner.assume(inner_lit);
            match inner
                .solve()
                .expect("SAT backend failure in nested loop (inner, with query fixed)")
            {
                Outcome::Unsat => {
                    match inner
                        .solve()
                        .expect("SAT backend failure in nested loop (inner, unconstrained)")
                    {
                        Outcome::Unsat => {
                            let witness: Vec<usize> =
                                (0..n).filter(|&i| in_arg[i]).collect();
                            return (assume_positive, witness);
                        }
                        Outcome::Sat => {
                            let clause: Vec<i32> = (0..n)
                                .filter(|&i| !not_undec[i])
                                .flat_map(|i| vec![vars.in_[i], vars.out[i]])
                                .collect();
                            outer.add_clause(&clause);
                            break;
                        }
                    }
                }
                Outcome::Sat => {
                    in_arg = vec![false; n];
                    let mut clause: Vec<i32> = Vec::new();
                    for i in 0..n {
                        let is_in = inner.value(ivars.in_[i]);
                        let is_out = inner.value(ivars.out[i]);
                        if is_in || is_out {
                            if !not_undec[i] && i != query {
                                inner.add_clause(&[ivars.in_[i], ivars.out[i]]);
                                not_undec[i] = true;
                            }
                            if is_in {
                                in_arg[i] = true;
                            }
                        } else {
                            clause.push(ivars.in_[i]);
                            clause.push(ivars.out[i]);
                        }
                    }
                    inner.add_clause(&clause);
                }
            }
        }
    }
}
