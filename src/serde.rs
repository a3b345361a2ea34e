//! Optional serde support.  Both collections travel as a plain sequence of
//! keys in ascending order.  Any sequence is accepted on the way in: keys are
//! sorted and duplicates dropped.

use crate::{MedianTree, SortedSeq};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::Formatter;
use std::marker::PhantomData;

// Upper bound on the capacity preallocated from an untrusted size hint.
const MAX_PREALLOC: usize = 4096;

struct SeqVisitor<C, T> {
    desc: &'static str,
    marker: PhantomData<fn() -> (C, T)>,
}

impl<'de, C, T> Visitor<'de> for SeqVisitor<C, T>
where
    C: FromIterator<T>,
    T: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(self.desc)
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let hint = access.size_hint().unwrap_or(0).min(MAX_PREALLOC);
        let mut keys = Vec::with_capacity(hint);
        while let Some(k) = access.next_element()? {
            keys.push(k);
        }

        // sorting once beats inserting one at a time
        Ok(keys.into_iter().collect())
    }
}

fn serialize_keys<'a, S, T, I>(
    serializer: S,
    len: usize,
    keys: I,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seq = serializer.serialize_seq(Some(len))?;
    for k in keys {
        seq.serialize_element(k)?;
    }
    seq.end()
}

impl<T: Serialize> Serialize for SortedSeq<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_keys(serializer, self.len(), self.as_slice())
    }
}

impl<'de, T> Deserialize<'de> for SortedSeq<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqVisitor {
            desc: "a sequence of keys for median_split_tree::SortedSeq",
            marker: PhantomData::<fn() -> (Self, T)>,
        })
    }
}

impl<T: Serialize> Serialize for MedianTree<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_keys(serializer, self.len(), self.as_slice())
    }
}

impl<'de, T> Deserialize<'de> for MedianTree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqVisitor {
            desc: "a sequence of keys for median_split_tree::MedianTree",
            marker: PhantomData::<fn() -> (Self, T)>,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::de::value::{Error as ValueError, SeqDeserializer};

    fn from_keys<C>(keys: Vec<i32>) -> C
    where
        C: for<'de> Deserialize<'de>,
    {
        let de = SeqDeserializer::<_, ValueError>::new(keys.into_iter());
        C::deserialize(de).unwrap()
    }

    #[test]
    fn tree_from_unsorted_seq() {
        let tree: MedianTree<i32> = from_keys(vec![9, 2, 5, 2, 7]);
        assert_eq!(tree.as_slice(), &[2, 5, 7, 9]);
        assert_eq!(tree.root().map(|n| *n.key()), Some(7));
        assert_eq!(tree.rebuilds(), 1);
    }

    #[test]
    fn seq_from_unsorted_seq() {
        let seq: SortedSeq<i32> = from_keys(vec![3, 3, 1]);
        assert_eq!(seq.as_slice(), &[1, 3]);
    }

    #[test]
    fn empty_seq() {
        let tree: MedianTree<i32> = from_keys(vec![]);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }
}
