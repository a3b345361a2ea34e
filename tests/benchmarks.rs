//! Microbenchmarks of MedianTree against BTreeSet.
//!
//! Invoke with
//! ```
//!     cargo +nightly bench [partial_test_name] --test benchmarks \
//!         --features bench
//! ```
//!
//! `#[bench]` needs nightly, so the whole file is gated behind the "bench"
//! feature declared in Cargo.toml.
#![cfg(feature = "bench")]
#![feature(test)]

extern crate test;

// Invokes the named macro once per set type under a module of the same name,
// so each instantiation gets its own namespace.
macro_rules! for_each_set_type {
    ( $macro_name:ident ) => {
        mod $macro_name {
            mod btreeset {
                use std::collections::BTreeSet;
                use test::Bencher;

                $macro_name!(BTreeSet);
            }

            mod median_tree {
                use median_split_tree::MedianTree;
                use test::Bencher;

                $macro_name!(MedianTree);
            }
        }
    };
}

macro_rules! build_500_elems {
    ( $set_t:ident ) => {
        #[bench]
        fn f(b: &mut Bencher) {
            b.iter(|| {
                let mut s = $set_t::new();
                for i in 0..500 {
                    s.insert(i);
                }
                s
            });
        }
    };
}

for_each_set_type!(build_500_elems);

macro_rules! collect_5000_elems {
    ( $set_t:ident ) => {
        #[bench]
        fn f(b: &mut Bencher) {
            b.iter(|| (0..5000).rev().collect::<$set_t<_>>());
        }
    };
}

for_each_set_type!(collect_5000_elems);

macro_rules! contains_500_elems {
    ( $set_t:ident ) => {
        const SET_LEN: usize = 500;

        #[bench]
        fn f(b: &mut Bencher) {
            let s: $set_t<_> = (0..SET_LEN).collect();
            b.iter(|| (0..2 * SET_LEN).filter(|i| s.contains(i)).count());
        }
    };
}

for_each_set_type!(contains_500_elems);

macro_rules! iter_500_elems {
    ( $set_t:ident ) => {
        const SET_LEN: usize = 500;

        #[bench]
        fn f(b: &mut Bencher) {
            let s: $set_t<_> = (0..SET_LEN).collect();
            b.iter(|| s.iter().sum::<usize>());
        }
    };
}

for_each_set_type!(iter_500_elems);

macro_rules! remove_1000_elems {
    ( $set_t: ident ) => {
        const SET_LEN: usize = 1000;

        #[bench]
        fn f(b: &mut Bencher) {
            let s: $set_t<_> = (0..SET_LEN).collect();
            b.iter(|| {
                let mut s = s.clone();
                let cnt = (0..SET_LEN).filter(|i| s.remove(i)).count();
                (cnt, s)
            });
        }
    };
}

for_each_set_type!(remove_1000_elems);

#[bench]
fn median_tree_search_paths(b: &mut test::Bencher) {
    let s: median_split_tree::MedianTree<_> = (0..1000).collect();
    b.iter(|| (0..1000).map(|k| s.search_path(&k).len()).sum::<usize>());
}
