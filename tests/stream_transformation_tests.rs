use pullstream::stream::{count_from, element, of, Streamable};
use pullstream::Stream;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_map() {
    assert_eq!(of(vec![1, 2, 3]).map(|x| x * x).collect(), Ok(vec![1, 4, 9]));
}

#[test]
fn test_map_changes_type() {
    let strings = of(vec![1, 2]).map(|x| x.to_string()).collect();
    assert_eq!(strings, Ok(vec!["1".to_string(), "2".to_string()]));
}

#[test]
fn test_filter() {
    assert_eq!(of(1..10).filter(|x| x % 3 == 0).collect(), Ok(vec![3, 6, 9]));
}

#[test]
fn test_flat_map_nested_sequences() {
    let flattened: Vec<i32> = of(vec![1, 2, 3])
        .flat_map(|x| vec![x; x as usize])
        .collect()
        .expect("active stream");
    assert_eq!(flattened, vec![1, 2, 2, 3, 3, 3]);
}

#[test]
fn test_flat_map_bare_values_pass_through() {
    let mixed: Vec<i32> = of(vec![1, 2, 3, 4])
        .flat_map(|x| {
            if x % 2 == 0 {
                Streamable::from(vec![x, x * 10])
            } else {
                Streamable::value(x)
            }
        })
        .collect()
        .expect("active stream");
    assert_eq!(mixed, vec![1, 2, 20, 3, 4, 40]);
}

#[test]
fn test_flat_map_nested_streams_and_empties() {
    let result: Vec<i32> = of(vec![0, 1, 2])
        .flat_map(|x| Stream::of(0..x).map(move |y| x * 10 + y))
        .collect()
        .expect("active stream");
    assert_eq!(result, vec![10, 20, 21]);
}

#[test]
fn test_drop_and_take() {
    assert_eq!(of(0..10).drop(7).collect(), Ok(vec![7, 8, 9]));
    assert_eq!(of(0..10).take(2).collect(), Ok(vec![0, 1]));
    assert_eq!(of(0..3).drop(5).collect(), Ok(vec![]));
    assert_eq!(of(0..3).take(5).collect(), Ok(vec![0, 1, 2]));
    assert_eq!(of(0..10).drop(2).take(3).collect(), Ok(vec![2, 3, 4]));
}

#[test]
fn test_drop_while_keeps_failing_element() {
    let rest = of(vec![1, 2, 5, 1, 2]).drop_while(|x| *x < 3).collect();
    assert_eq!(rest, Ok(vec![5, 1, 2]));
}

#[test]
fn test_take_while_excludes_failing_element() {
    let head = of(vec![1, 2, 5, 1, 2]).take_while(|x| *x < 3).collect();
    assert_eq!(head, Ok(vec![1, 2]));
}

#[test]
fn test_take_while_on_infinite_source() {
    let squares = count_from(1).map(|x| x * x).take_while(|x| *x < 50).collect();
    assert_eq!(squares, Ok(vec![1, 4, 9, 16, 25, 36, 49]));
}

#[test]
fn test_unique_first_occurrence_wins() {
    let distinct = of(vec![3, 1, 3, 2, 1, 4]).unique().collect();
    assert_eq!(distinct, Ok(vec![3, 1, 2, 4]));
}

#[test]
fn test_unique_strings() {
    let words = of(vec!["a", "b", "a", "c", "b"]).map(String::from).unique().collect();
    assert_eq!(
        words,
        Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_peek_sees_each_pulled_element() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let result = of(vec![1, 2, 3, 4])
        .peek(move |x| sink.borrow_mut().push(*x))
        .take(2)
        .collect();
    assert_eq!(result, Ok(vec![1, 2]));
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn test_enumerate() {
    let indexed = of(vec!['a', 'b', 'c']).enumerate().collect();
    assert_eq!(indexed, Ok(vec![(0, 'a'), (1, 'b'), (2, 'c')]));

    let from_ten = of(vec!['a', 'b']).enumerate_from(10).collect();
    assert_eq!(from_ten, Ok(vec![(10, 'a'), (11, 'b')]));
}

#[test]
fn test_accumulate_running_total() {
    let totals = of(vec![1, 2, 3, 4]).accumulate(0, |acc, x| acc + x).collect();
    assert_eq!(totals, Ok(vec![0, 1, 3, 6, 10]));
}

#[test]
fn test_accumulate_empty_yields_seed() {
    let totals = of(Vec::<i32>::new()).accumulate(100, |acc, x| acc + x).collect();
    assert_eq!(totals, Ok(vec![100]));
}

#[test]
fn test_accumulate_changes_type() {
    let words = of(vec!['a', 'b'])
        .accumulate(String::new(), |mut acc, c| {
            acc.push(c);
            acc
        })
        .collect();
    assert_eq!(
        words,
        Ok(vec![String::new(), "a".to_string(), "ab".to_string()])
    );
}

#[test]
fn test_accumulate_yields_seed_before_pulling() {
    let mut totals = count_from(1).accumulate(0, |acc, x| acc + x);
    assert_eq!(totals.pull(), Ok(Some(0)));
    assert_eq!(totals.pull(), Ok(Some(1)));
    assert_eq!(totals.pull(), Ok(Some(3)));
}

#[test]
fn test_element_chain() {
    let result = element(2).map(|x| x + 1).filter(|x| *x > 2).collect();
    assert_eq!(result, Ok(vec![3]));
}
