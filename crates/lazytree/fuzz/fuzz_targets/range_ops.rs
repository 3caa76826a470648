#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lazytree::{SegmentTree, SumAggregator};

#[derive(Debug, Arbitrary)]
enum Op {
    Add(u8, u8, i16),
    Assign(u8, u8, i16),
    Point(u8, i16),
    Query(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i16>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut model: Vec<i64> = input.values.iter().map(|v| *v as i64).collect();
    let mut tree: SegmentTree<SumAggregator> = match SegmentTree::new(&model) {
        Ok(tree) => tree,
        Err(err) => {
            assert!(model.is_empty() && err.is_invalid_input());
            return;
        }
    };
    let len = model.len();

    for op in input.ops {
        match op {
            Op::Add(l, r, v) => {
                let (l, r) = (l as usize, r as usize);
                if l <= r && r < len {
                    tree.add(l, r, v as i64).unwrap();
                    model[l..=r].iter_mut().for_each(|slot| *slot += v as i64);
                } else {
                    assert!(tree.add(l, r, v as i64).unwrap_err().is_range());
                }
            }
            Op::Assign(l, r, v) => {
                let (l, r) = (l as usize, r as usize);
                if l <= r && r < len {
                    tree.assign(l, r, v as i64).unwrap();
                    model[l..=r].iter_mut().for_each(|slot| *slot = v as i64);
                } else {
                    assert!(tree.assign(l, r, v as i64).unwrap_err().is_range());
                }
            }
            Op::Point(i, v) => {
                let i = i as usize;
                if i < len {
                    tree.point_update(i, v as i64).unwrap();
                    model[i] = v as i64;
                } else {
                    assert!(tree.point_update(i, v as i64).unwrap_err().is_range());
                }
            }
            Op::Query(l, r) => {
                let (l, r) = (l as usize, r as usize);
                if l <= r && r < len {
                    let expected: i64 = model[l..=r].iter().sum();
                    assert_eq!(tree.query(l, r), Ok(expected));
                } else {
                    assert!(tree.query(l, r).unwrap_err().is_range());
                }
            }
        }
    }
    assert_eq!(tree.values(), Ok(model));
});
