//! Integration test: replace_range checked against a Vec splice model.
//!
//! Drives a `DynArray` and a plain `Vec` through the same randomised
//! operation sequences and asserts they agree after every step. The Vec
//! is the executable model of the range-replacement contract.

use proptest::prelude::*;

use resplice::DynArray;

/// One structural operation, with raw indices resolved against the
/// current length at apply time so sequences stay valid as the array
/// grows and shrinks.
#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Insert(usize, i32),
    Remove(usize),
    Replace {
        start: usize,
        end: usize,
        values: Vec<i32>,
    },
}

fn apply(op: &Op, array: &mut DynArray<i32>, model: &mut Vec<i32>) {
    let len = model.len();
    match op {
        Op::Push(v) => {
            array.push(*v);
            model.push(*v);
        }
        Op::Insert(at, v) => {
            let at = at % (len + 1);
            array.insert(at, *v);
            model.insert(at, *v);
        }
        Op::Remove(at) => {
            if len == 0 {
                return;
            }
            let at = at % len;
            let got = array.remove(at);
            let expected = model.remove(at);
            assert_eq!(got, expected);
        }
        Op::Replace { start, end, values } => {
            let start = start % (len + 1);
            let end = start + (end % (len - start + 1));
            array.replace_range(start..end, values.iter().copied());
            model.splice(start..end, values.iter().copied());
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        (any::<usize>(), any::<i32>()).prop_map(|(at, v)| Op::Insert(at, v)),
        any::<usize>().prop_map(Op::Remove),
        (
            any::<usize>(),
            any::<usize>(),
            proptest::collection::vec(any::<i32>(), 0..8),
        )
            .prop_map(|(start, end, values)| Op::Replace { start, end, values }),
    ]
}

proptest! {
    #[test]
    fn array_agrees_with_vec_model(
        initial in proptest::collection::vec(any::<i32>(), 0..16),
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let mut array = DynArray::from_elements(initial.clone());
        let mut model = initial;

        for op in &ops {
            apply(op, &mut array, &mut model);
            prop_assert_eq!(array.as_slice(), model.as_slice());
            prop_assert_eq!(array.len(), model.len());
        }
    }

    #[test]
    fn rendering_matches_model(
        values in proptest::collection::vec(any::<i16>(), 0..12),
    ) {
        let array = DynArray::from_elements(values.clone());
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let expected = format!("[{}]", rendered.join(", "));
        prop_assert_eq!(array.to_string(), expected);
    }
}
