use median_split_tree::bisect::upper_mid_search;
use median_split_tree::{MedianTree, SortedSeq};
use proptest::prelude::*;
use std::collections::BTreeSet as StdSet;

mod common;
use common::*;

#[derive(Clone, Debug)]
struct Sets {
    tree: MedianTree<u16>,
    seq: SortedSeq<u16>,
    std_set: StdSet<u16>,
}

impl Sets {
    fn new(v: U16Seq) -> Sets {
        Sets {
            tree: MedianTree::from_iter(v.clone()),
            seq: SortedSeq::from_iter(v.clone()),
            std_set: StdSet::from_iter(v),
        }
    }

    fn apply(&mut self, op: Op) {
        match op {
            Op::Insert(k) => {
                let expected = self.std_set.insert(k);
                assert_eq!(self.seq.insert(k), expected);
                assert_eq!(self.tree.insert(k), expected);
            }
            Op::Remove(k) => {
                let expected = self.std_set.remove(&k);
                assert_eq!(self.seq.remove(&k), expected);
                assert_eq!(self.tree.remove(&k), expected);
            }
        }
    }

    fn chk(&self) {
        assert_eq!(self.tree.len(), self.std_set.len());
        assert_eq!(self.seq.len(), self.std_set.len());
        assert_eq_iters(self.tree.iter(), self.std_set.iter());
        assert_eq_iters(self.seq.iter(), self.std_set.iter());
        assert_eq!(self.tree.sorted_keys(), &self.seq);
        assert_eq!(self.tree.height(), min_height(self.tree.len()));
        assert_eq!(self.tree.first(), self.std_set.first());
        assert_eq!(self.tree.last(), self.std_set.last());
    }
}

fn check_ops(init: U16Seq, ops: Vec<Op>) {
    let mut sets = Sets::new(init);
    sets.chk();
    for op in ops {
        sets.apply(op);
        sets.chk();
    }
}

fn check_paths(v: U16Seq, probes: U16Seq) {
    let tree = MedianTree::from_iter(v);
    let keys = tree.as_slice();

    for k in keys.iter().copied().chain(probes) {
        let path = tree.search_path(&k);
        let probe = upper_mid_search(keys, &k);

        assert_eq!(path.positions(), probe.visited);
        assert_eq_iters(path.keys(), probe.visited.iter().map(|&i| &keys[i]));
        assert_eq!(path.found(), tree.contains(&k));
        assert_eq!(path.found(), probe.found.is_some());

        match path.last() {
            Some(n) if path.found() => assert_eq!(*n.key(), k),
            Some(n) => assert_ne!(*n.key(), k),
            None => assert!(tree.is_empty()),
        }

        // heights strictly decrease going down the path
        let hts: Vec<_> = path.entries().map(|(_, h)| h).collect();
        assert!(hts.windows(2).all(|w| w[0] > w[1]));
    }
}

fn check_round_trip(v: U16Seq, k: u16) {
    let mut tree = MedianTree::from_iter(v.into_iter().filter(|&x| x != k));
    let before_keys = tree.as_slice().to_vec();
    let before_dbg = format!("{:?}", tree);

    assert!(tree.insert(k));
    assert!(tree.contains(&k));
    assert!(tree.remove(&k));

    assert_eq!(tree.as_slice(), &before_keys[..]);
    assert_eq!(format!("{:?}", tree), before_dbg);
}

fn check_try_ops(init: U16Seq, ops: Vec<Op>) {
    let mut fallible = MedianTree::from_iter(init.clone());
    let mut infallible = MedianTree::from_iter(init);

    for op in ops {
        match op {
            Op::Insert(k) => {
                assert_eq!(fallible.try_insert(k), Ok(infallible.insert(k)))
            }
            Op::Remove(k) => {
                assert_eq!(fallible.try_remove(&k), Ok(infallible.remove(&k)))
            }
        }
        assert_eq!(fallible, infallible);
        assert_eq!(format!("{:?}", fallible), format!("{:?}", infallible));
    }
}

#[test]
fn ops_regr1() {
    check_ops(vec![], vec![Op::Insert(1), Op::Remove(1), Op::Remove(1)]);
}

#[test]
fn paths_regr1() {
    check_paths(vec![0, 1], vec![2]);
}

proptest! {
    #[test]
    fn test_ops(init in u16_seq(), ops in ops()) {
        check_ops(init, ops);
    }

    #[test]
    fn test_paths(v in u16_seq(), probes in u16_seq()) {
        check_paths(v, probes);
    }

    #[test]
    fn test_round_trip(v in u16_seq(), k in 0u16..1024) {
        check_round_trip(v, k);
    }

    #[test]
    fn test_try_ops(init in u16_seq(), ops in ops()) {
        check_try_ops(init, ops);
    }

    #[test]
    fn test_increasing_inserts(n in 0usize..600) {
        let mut tree = MedianTree::new();
        for k in 0..n {
            tree.insert(k);
            prop_assert_eq!(tree.height(), min_height(tree.len()));
        }
    }
}
