//! A partial 3-valued labeling of an AF's arguments.

use crate::bitset::Bitset;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Label {
    In,
    Out,
    Undec,
}

/// A labeling over `0..n`. In two-valued mode `out` is unused and every
/// argument not in `in` is implicitly `Out`.
#[derive(Clone, Debug)]
pub struct Labeling {
    r#in: Bitset,
    out: Bitset,
    two_valued: bool,
}

impl Labeling {
    pub fn new(n: usize, two_valued: bool) -> Self {
        Labeling {
            r#in: Bitset::new(n.max(1)),
            out: Bitset::new(n.max(1)),
            two_valued,
        }
    }

    pub fn set_in(&mut self, id: usize) {
        self.r#in.set(id);
        if !self.two_valued {
            self.out.unset(id);
        }
    }

    pub fn set_out(&mut self, id: usize) {
        self.r#in.unset(id);
        if !self.two_valued {
            self.out.set(id);
        }
    }

    pub fn label_of(&self, id: usize) -> Label {
        if self.r#in.get(id) {
            Label::In
        } else if self.two_valued || self.out.get(id) {
            Label::Out
        } else {
            Label::Undec
        }
    }

    pub fn in_set(&self) -> &Bitset {
        &self.r#in
    }

    pub fn out_set(&self) -> &Bitset {
        &self.out
    }

    pub fn in_ids(&self) -> Vec<usize> {
        self.r#in.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undec_is_default_in_three_valued_mode() {
        let l = Labeling::new(3, false);
        assert_eq!(l.label_of(0), Label::Undec);
    }

    #[test]
    fn two_valued_mode_has_no_undec() {
        let mut l = Labeling::new(3, true);
        l.set_in(0);
        assert_eq!(l.label_of(0), Label::In);
        assert_eq!(l.label_of(1), Label::Out);
    }

    #[test]
    fn set_in_then_out_flips_label() {
        let mut l = Labeling::new(3, false);
        l.set_in(0);
        assert_eq!(l.label_of(0), Label::In);
        l.set_out(0);
        assert_eq!(l.label_of(0), Label::Out);
    }
}
