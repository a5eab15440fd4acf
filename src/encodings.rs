//! Clause generators for the conflict-free, admissible, complete and stable
//! propositional encodings, plus the cross-pair "set A attacks set B" encoding.

use crate::grounded::Grounded;
use crate::model::Af;
use crate::sat::{SatBackend, VarMap};

/// Propositional variables `in[i]`/`out[i]` for one candidate-set copy.
#[derive(Clone, Debug)]
pub struct Vars {
    pub in_: Vec<i32>,
    pub out: Vec<i32>,
}

impl Vars {
    pub fn alloc(vm: &mut VarMap, n: usize) -> Self {
        let in_base = vm.reserve(n);
        let out_base = vm.reserve(n);
        Vars {
            in_: (0..n as i32).map(|i| in_base + i).collect(),
            out: (0..n as i32).map(|i| out_base + i).collect(),
        }
    }

    /// Allocates only `in` variables, for the stable encoding which needs no
    /// separate `out` copy.
    pub fn alloc_in_only(vm: &mut VarMap, n: usize) -> Self {
        let in_base = vm.reserve(n);
        Vars {
            in_: (0..n as i32).map(|i| in_base + i).collect(),
            out: Vec::new(),
        }
    }
}

/// Fixes the grounded extension as hard facts in `vars`. Returns `true` if
/// every argument of the AF is decided by the grounded labeling alone.
pub fn add_grounded_facts(sat: &mut dyn SatBackend, af: &Af, vars: &Vars, grounded: &Grounded) -> bool {
    for i in 0..af.len() {
        if grounded.g_in.get(i) {
            sat.add_clause(&[vars.in_[i]]);
            if !vars.out.is_empty() {
                sat.add_clause(&[-vars.out[i]]);
            }
        } else if grounded.g_out.get(i) {
            sat.add_clause(&[-vars.in_[i]]);
            if !vars.out.is_empty() {
                sat.add_clause(&[vars.out[i]]);
            }
        }
    }
    (0..af.len()).all(|i| grounded.g_in.get(i) || grounded.g_out.get(i))
}

/// Conflict-free encoding: `in[i]`/`out[i]` not both true, `out[i]` implies
/// some attacker is `in`, and two attacking arguments are never both `in`.
pub fn add_cf_clauses(sat: &mut dyn SatBackend, af: &Af, vars: &Vars) {
    for i in 0..af.len() {
        sat.add_clause(&[-vars.in_[i], -vars.out[i]]);
        let attackers = af.attackers_of(i);
        if attackers.is_empty() {
            sat.add_clause(&[-vars.out[i]]);
        } else {
            let mut clause: Vec<i32> = vec![-vars.out[i]];
            clause.extend(attackers.iter().map(|&j| vars.in_[j]));
            sat.add_clause(&clause);
        }
    }
    for &(j, i) in af.attacks() {
        sat.add_clause(&[-vars.in_[j], -vars.in_[i]]);
    }
}

/// Admissible encoding: CF plus "every attacker of an `in` argument is `out`".
pub fn add_adm_clauses(sat: &mut dyn SatBackend, af: &Af, vars: &Vars) {
    add_cf_clauses(sat, af, vars);
    for &(j, i) in af.attacks() {
        sat.add_clause(&[-vars.in_[i], vars.out[j]]);
    }
}

/// Complete encoding: ADM plus "every defended argument must be `in`".
pub fn add_com_clauses(sat: &mut dyn SatBackend, af: &Af, vars: &Vars) {
    add_adm_clauses(sat, af, vars);
    for i in 0..af.len() {
        let attackers = af.attackers_of(i);
        if attackers.is_empty() {
            sat.add_clause(&[vars.in_[i]]);
        } else {
            let mut clause: Vec<i32> = attackers.iter().map(|&j| -vars.out[j]).collect();
            clause.push(vars.in_[i]);
            sat.add_clause(&clause);
        }
    }
}

/// Stable encoding over `in`-only variables: every argument is `in`, or
/// attacked by an `in` argument; no two attacking arguments are both `in`.
pub fn add_stb_clauses(sat: &mut dyn SatBackend, af: &Af, vars: &Vars) {
    for i in 0..af.len() {
        let attackers = af.attackers_of(i);
        let mut clause: Vec<i32> = vec![vars.in_[i]];
        clause.extend(attackers.iter().map(|&j| vars.in_[j]));
        sat.add_clause(&clause);
    }
    for &(j, i) in af.attacks() {
        sat.add_clause(&[-vars.in_[j], -vars.in_[i]]);
    }
}

/// Cross-attack encoding over two disjoint variable copies: asserts that at
/// least one attack links an `in` argument of `a` to an `in` argument of `b`.
/// `aux_base` must have been reserved by the caller for `af.attacks().len()`
/// fresh variables before the backend was `init`-ed.
pub fn add_cross_attack_clauses(sat: &mut dyn SatBackend, af: &Af, aux_base: i32, a: &Vars, b: &Vars) {
    let attacks = af.attacks();
    if attacks.is_empty() {
        sat.add_clause(&[]);
        return;
    }
    let mut at_least_one: Vec<i32> = Vec::with_capacity(attacks.len());
    for (idx, &(j, k)) in attacks.iter().enumerate() {
        let e = aux_base + idx as i32;
        sat.add_clause(&[-e, a.in_[j]]);
        sat.add_clause(&[-e, b.in_[k]]);
        sat.add_clause(&[-a.in_[j], -b.in_[k], e]);
        at_least_one.push(e);
    }
    sat.add_clause(&at_least_one);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::embedded::EmbeddedBackend;

    fn triangle() -> Af {
        Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (1, 2), (2, 0)],
        )
    }

    #[test]
    fn admissible_triangle_only_empty_set() {
        let af = triangle();
        let grounded = Grounded::compute(&af);
        let mut vm = VarMap::new();
        let vars = Vars::alloc(&mut vm, af.len());
        let mut sat = EmbeddedBackend::new();
        sat.init(vm.total());
        add_adm_clauses(&mut sat, &af, &vars);
        add_grounded_facts(&mut sat, &af, &vars, &grounded);
        // assuming any single argument in should be inadmissible in a 3-cycle
        sat.assume(vars.in_[0]);
        let outcome = sat.solve().unwrap();
        assert_eq!(outcome, crate::sat::Outcome::Unsat);
    }

    #[test]
    fn stable_two_cycle_has_two_extensions() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let mut vm = VarMap::new();
        let vars = Vars::alloc_in_only(&mut vm, af.len());
        let mut sat = EmbeddedBackend::new();
        sat.init(vm.total());
        add_stb_clauses(&mut sat, &af, &vars);
        sat.assume(vars.in_[0]);
        let outcome = sat.solve().unwrap();
        assert_eq!(outcome, crate::sat::Outcome::Sat);
        assert!(sat.value(vars.in_[0]));
        assert!(!sat.value(vars.in_[1]));
    }
}
