#![cfg(test)]

// Property tests for LinkedList kept inside the crate so they can sit next
// to the unit tests without exposing internals.

use crate::alloc::Quota;
use crate::error::Error;
use crate::linked_list::LinkedList;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Insert(usize, i32),
    Remove(usize),
    Set(usize, i32),
    Get(usize),
    CopyOut,
    Clear,
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        any::<i32>().prop_map(Op::Push),
        (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (0usize..12).prop_map(Op::Remove),
        (0usize..12, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
        (0usize..12).prop_map(Op::Get),
        Just(Op::CopyOut),
        Just(Op::Clear),
        Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: state-machine equivalence against Vec<i32>. Every positional
// operation agrees with the model, including its error cases, and len always
// matches the number of reachable elements.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: LinkedList<i32> = LinkedList::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    sut.push(v).unwrap();
                    model.push(v);
                }
                Op::Insert(i, v) => {
                    let r = sut.insert(i, v);
                    if i <= model.len() {
                        prop_assert_eq!(r, Ok(()));
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(r, Err(Error::InvalidArgument));
                    }
                }
                Op::Remove(i) => {
                    let r = sut.remove(i);
                    if i < model.len() {
                        prop_assert_eq!(r, Ok(model.remove(i)));
                    } else {
                        prop_assert_eq!(r, Err(Error::InvalidArgument));
                    }
                }
                Op::Set(i, v) => {
                    let r = sut.set(i, v);
                    if i < model.len() {
                        prop_assert_eq!(r, Ok(()));
                        model[i] = v;
                    } else {
                        prop_assert_eq!(r, Err(Error::InvalidArgument));
                    }
                }
                Op::Get(i) => {
                    prop_assert_eq!(sut.get(i), model.get(i));
                }
                Op::CopyOut => {
                    let mut out = vec![0; model.len()];
                    sut.copy_to(&mut out, 0).unwrap();
                    prop_assert_eq!(&out, &model);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let got: Vec<i32> = sut.iter().copied().collect();
                    prop_assert_eq!(&got, &model);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: under a fixed budget, a refused reservation never corrupts the
// list, and charged plus remaining slots always equal the budget.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_quota_conservation(ops in arb_ops(), budget in 0usize..8) {
        let quota = Quota::new(budget);
        let mut sut = LinkedList::new_in(quota.clone());
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => match sut.push(v) {
                    Ok(()) => model.push(v),
                    Err(e) => {
                        prop_assert_eq!(e, Error::OutOfMemory);
                        prop_assert_eq!(quota.remaining(), 0);
                    }
                },
                Op::Insert(i, v) => {
                    let r = sut.insert(i, v);
                    if i > model.len() {
                        prop_assert_eq!(r, Err(Error::InvalidArgument));
                    } else {
                        match r {
                            Ok(()) => model.insert(i, v),
                            Err(e) => {
                                prop_assert_eq!(e, Error::OutOfMemory);
                                prop_assert_eq!(quota.remaining(), 0);
                            }
                        }
                    }
                }
                Op::Remove(i) => {
                    let r = sut.remove(i);
                    if i < model.len() {
                        prop_assert_eq!(r, Ok(model.remove(i)));
                    } else {
                        prop_assert_eq!(r, Err(Error::InvalidArgument));
                    }
                }
                Op::Set(i, v) => {
                    if sut.set(i, v).is_ok() {
                        model[i] = v;
                    }
                }
                Op::Get(_) | Op::CopyOut | Op::Iterate => {
                    let got: Vec<i32> = sut.iter().copied().collect();
                    prop_assert_eq!(&got, &model);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            let got: Vec<i32> = sut.iter().copied().collect();
            prop_assert_eq!(&got, &model);
            prop_assert_eq!(quota.remaining() + sut.len(), budget);
        }
    }
}
