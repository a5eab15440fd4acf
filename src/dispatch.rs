//! Short-circuits SAT calls whenever the grounded extension alone forces an
//! answer.

use crate::grounded::Grounded;
use crate::model::Af;
use crate::task::{Problem, Semantics, Track};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EasyAnswer {
    Yes,
    No,
}

/// Tries to answer `track` for argument `query` using only the grounded
/// extension. Returns `None` when the full solver must run.
pub fn easy_case(af: &Af, grounded: &Grounded, track: Track, query: Option<usize>) -> Option<EasyAnswer> {
    use Problem::*;
    use Semantics::*;

    if grounded.g_in.iter().next().is_none() && af.initial().iter().next().is_none() {
        // empty grounded extension: GR/CO tracks collapse immediately.
        match (track.problem, track.semantics) {
            (Dc, Grounded) | (Ds, Grounded) | (Ds, Complete) => return Some(EasyAnswer::No),
            _ => {}
        }
    }

    let q = query?;

    if af.is_self_attacked(q) {
        match (track.problem, track.semantics) {
            (Dc, Complete)
            | (Dc, Preferred)
            | (Dc, Stable)
            | (Dc, SemiStable)
            | (Dc, Stage)
            | (Dc, Ideal) => return Some(EasyAnswer::No),
            (Ds, Stable) => {
                // vacuously skeptically accepted only if no stable extension exists;
                // that check needs the solver, so fall through.
            }
            _ => {}
        }
    }

    if grounded.g_in.get(q) {
        match (track.problem, track.semantics) {
            (Dc, Complete) | (Dc, Preferred) | (Dc, SemiStable) | (Dc, Ideal) | (Dc, Stable) => {
                return Some(EasyAnswer::Yes)
            }
            (Ds, Preferred) | (Ds, Stable) | (Ds, SemiStable) | (Ds, Ideal) => {
                return Some(EasyAnswer::Yes)
            }
            _ => {}
        }
    }

    if grounded.g_out.get(q) {
        match (track.problem, track.semantics) {
            (Dc, Complete)
            | (Dc, Preferred)
            | (Dc, Stable)
            | (Dc, SemiStable)
            | (Dc, Stage)
            | (Dc, Ideal) => return Some(EasyAnswer::No),
            (Ds, Preferred) | (Ds, SemiStable) | (Ds, Ideal) => return Some(EasyAnswer::No),
            _ => {}
        }
    }

    match (track.problem, track.semantics) {
        (Se, Grounded) | (Ee, Grounded) => None,
        (Dc, Grounded) => Some(if grounded.g_in.get(q) {
            EasyAnswer::Yes
        } else {
            EasyAnswer::No
        }),
        (Ds, Grounded) => Some(if grounded.g_in.get(q) {
            EasyAnswer::Yes
        } else {
            EasyAnswer::No
        }),
        (Ds, Complete) => Some(if grounded.g_in.get(q) {
            EasyAnswer::Yes
        } else {
            EasyAnswer::No
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Track;

    #[test]
    fn grounded_in_forces_dc_co_yes() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1)]);
        let g = Grounded::compute(&af);
        let t = Track::new(Problem::Dc, Semantics::Complete);
        assert_eq!(easy_case(&af, &g, t, Some(0)), Some(EasyAnswer::Yes));
    }

    #[test]
    fn grounded_out_forces_dc_co_no() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1)]);
        let g = Grounded::compute(&af);
        let t = Track::new(Problem::Dc, Semantics::Complete);
        assert_eq!(easy_case(&af, &g, t, Some(1)), Some(EasyAnswer::No));
    }

    #[test]
    fn undec_argument_needs_full_solver() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        let t = Track::new(Problem::Dc, Semantics::Preferred);
        assert_eq!(easy_case(&af, &g, t, Some(0)), None);
    }

    #[test]
    fn self_loop_blocks_dc_pr() {
        let af = Af::new(vec!["a".into()], vec![(0, 0)]);
        let g = Grounded::compute(&af);
        let t = Track::new(Problem::Dc, Semantics::Preferred);
        assert_eq!(easy_case(&af, &g, t, Some(0)), Some(EasyAnswer::No));
    }
}
