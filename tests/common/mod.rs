use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

pub(super) type U16Seq = Vec<u16>;

pub(super) fn u16_seq() -> impl Strategy<Value = U16Seq> {
    prop::collection::vec(0u16..1024u16, 0..512)
}

/// A mutation applied to a set under test.
#[derive(Clone, Copy, Debug)]
pub(super) enum Op {
    Insert(u16),
    Remove(u16),
}

// Keys are drawn from a narrow range so removes frequently hit.
pub(super) fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0u16..128).prop_map(Op::Insert),
            (0u16..128).prop_map(Op::Remove),
        ],
        0..256,
    )
}

/// ceil(log2(n + 1)), the height of a median-split tree with n keys.
#[allow(dead_code)]
pub(super) fn min_height(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}
