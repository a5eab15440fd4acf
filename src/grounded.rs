//! Fixpoint computation of the grounded extension.

use crate::bitset::Bitset;
use crate::model::Af;

/// The grounded extension, as the pair `(in, out)`. Every argument not in
/// either set is `UNDEC` under the grounded labeling.
#[derive(Clone, Debug)]
pub struct Grounded {
    pub g_in: Bitset,
    pub g_out: Bitset,
}

impl Grounded {
    pub fn compute(af: &Af) -> Self {
        let n = af.len().max(1);
        let mut g_in = Bitset::new(n);
        let mut g_out = Bitset::new(n);
        let mut remaining: Vec<usize> = (0..af.len()).map(|i| af.in_degree(i)).collect();
        let mut worklist: Vec<usize> = af.initial().iter().collect();
        for &a in &worklist {
            g_in.set(a);
        }
        while let Some(a) = worklist.pop() {
            for &child in af.attacked_by(a) {
                if g_out.get(child) {
                    continue;
                }
                g_out.set(child);
                for &grandchild in af.attacked_by(child) {
                    if g_in.get(grandchild) || g_out.get(grandchild) {
                        continue;
                    }
                    remaining[grandchild] -= 1;
                    if remaining[grandchild] == 0 {
                        g_in.set(grandchild);
                        worklist.push(grandchild);
                    }
                }
            }
        }
        Grounded { g_in, g_out }
    }

    pub fn is_undec(&self, id: usize) -> bool {
        !self.g_in.get(id) && !self.g_out.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_af_has_empty_grounded() {
        let af = Af::new(vec![], vec![]);
        let g = Grounded::compute(&af);
        assert!(g.g_in.is_empty_set());
    }

    #[test]
    fn mutual_attack_is_all_undec() {
        let af = Af::new(vec!["1".into(), "2".into()], vec![(0, 1), (1, 0)]);
        let g = Grounded::compute(&af);
        assert!(g.is_undec(0));
        assert!(g.is_undec(1));
    }

    #[test]
    fn defended_argument_joins_grounded() {
        // 1 attacks 2, 3 attacks 2: both 1 and 3 are unattacked, so both are
        // grounded-in; 2 is grounded-out.
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into()],
            vec![(0, 1), (2, 1)],
        );
        let g = Grounded::compute(&af);
        assert!(g.g_in.get(0));
        assert!(g.g_in.get(2));
        assert!(g.g_out.get(1));
    }

    #[test]
    fn chain_of_defense_propagates() {
        // 1 -> 2 -> 3 -> 4: 1 is grounded in, defeats 2, frees 3, which is
        // defeated in turn, freeing 4.
        let af = Af::new(
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            vec![(0, 1), (1, 2), (2, 3)],
        );
        let g = Grounded::compute(&af);
        assert!(g.g_in.get(0));
        assert!(g.g_out.get(1));
        assert!(g.g_in.get(2));
        assert!(g.g_out.get(3));
    }

    #[test]
    fn self_loop_never_enters_grounded() {
        // `a` self-attacks and also attacks `b`; but `a` never reaches
        // in-degree zero (its own loop keeps it attacked), so it never
        // joins `G_in` and can never defeat `b`. `b`'s only attacker is the
        // undecided `a`, so `b` is UNDEC too, not OUT.
        let af = Af::new(vec!["a".into(), "b".into()], vec![(0, 0), (0, 1)]);
        let g = Grounded::compute(&af);
        assert!(!g.g_in.get(0));
        assert!(g.is_undec(0));
        assert!(g.is_undec(1));
    }

    #[test]
    fn self_loop_attacker_defeats_its_other_target() {
        // `a` self-attacks; `c` is unattacked and attacks `b`, so `c` joins
        // `G_in` and defeats `b` regardless of `a`'s self-loop.
        let af = Af::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![(0, 0), (0, 1), (2, 1)],
        );
        let g = Grounded::compute(&af);
        assert!(g.is_undec(0));
        assert!(g.g_in.get(2));
        assert!(g.g_out.get(1));
    }
}
