//! In-process SAT back-end wrapping the `splr` CDCL library.
//!
//! `splr::Solver` only exposes a one-shot "build from a complete clause set,
//! solve once" API, so this adapter keeps its own clause/assumption buffers
//! and constructs a fresh solver from them on every `solve()` call.

use std::convert::TryFrom;

use log::debug;
use splr::{Certificate, Config, SolverError as SplrError};

use crate::error::SatError;
use crate::sat::{Outcome, SatBackend};

#[derive(Default)]
pub struct EmbeddedBackend {
    n_vars: usize,
    clauses: Vec<Vec<i32>>,
    current: Vec<i32>,
    assumptions: Vec<i32>,
    model: Vec<bool>,
}

impl EmbeddedBackend {
    pub fn new() -> Self {
        EmbeddedBackend::default()
    }
}

impl SatBackend for EmbeddedBackend {
    fn init(&mut self, n_vars: usize) {
        self.n_vars = n_vars;
        self.clauses.clear();
        self.current.clear();
        self.assumptions.clear();
        self.model = vec![false; n_vars + 1];
    }

    fn add(&mut self, lit: i32) {
        if lit == 0 {
            let clause = std::mem::take(&mut self.current);
            self.clauses.push(clause);
        } else {
            self.current.push(lit);
        }
    }

    fn assume(&mut self, lit: i32) {
        self.assumptions.push(lit);
    }

    fn solve(&mut self) -> Result<Outcome, SatError> {
        let mut clauses: Vec<Vec<i32>> = self.clauses.clone();
        for &lit in &self.assumptions {
            clauses.push(vec![lit]);
        }
        self.assumptions.clear();
        debug!(
            "embedded sat solve: {} vars, {} clauses",
            self.n_vars,
            clauses.len()
        );

        if clauses.is_empty() {
            return Ok(Outcome::Sat);
        }

        let config = Config::default();
        let built = splr::Solver::try_from((config, clauses.as_slice()));
        let mut solver = match built {
            Ok(s) => s,
            Err(Ok(Certificate::UNSAT)) => return Ok(Outcome::Unsat),
            Err(Ok(Certificate::SAT(assignment))) => {
                self.apply_assignment(&assignment);
                return Ok(Outcome::Sat);
            }
            Err(Err(_)) => return Err(SatError::Inconsistent),
        };

        match solver.solve() {
            Ok(Certificate::SAT(assignment)) => {
                self.apply_assignment(&assignment);
                Ok(Outcome::Sat)
            }
            Ok(Certificate::UNSAT) => Ok(Outcome::Unsat),
            Err(SplrError::Inconsistent) => Ok(Outcome::Unsat),
            Err(_) => Err(SatError::Inconsistent),
        }
    }

    fn value(&self, var: i32) -> bool {
        self.model[var as usize]
    }
}

impl EmbeddedBackend {
    fn apply_assignment(&mut self, assignment: &[i32]) {
        for &lit in assignment {
            let v = lit.unsigned_abs() as usize;
            if v < self.model.len() {
                self.model[v] = lit > 0;
            }
        }
    }
}
