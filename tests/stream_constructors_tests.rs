use pullstream::stream::{
    concat, count, count_from, element, empty, of, of_elements, range, range_from, range_step,
    zip, zip_all, Streamable,
};
use pullstream::{Stream, StreamError};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_element_and_of_elements() {
    assert_eq!(element(42).collect(), Ok(vec![42]));
    assert_eq!(of_elements(["x", "y", "z"]).collect(), Ok(vec!["x", "y", "z"]));
    assert_eq!(of_elements(Vec::<i32>::new()).collect(), Ok(vec![]));
    assert_eq!(empty::<u8>().collect(), Ok(vec![]));
}

#[test]
fn test_range_exclusive() {
    assert_eq!(range(5).collect(), Ok(vec![0, 1, 2, 3, 4]));
    assert_eq!(range_from(2, 5).collect(), Ok(vec![2, 3, 4]));
    assert_eq!(range(0).collect(), Ok(vec![]));
}

#[test]
fn test_range_descending() {
    assert_eq!(range_step(5, 0, -1).collect(), Ok(vec![5, 4, 3, 2, 1]));
    assert_eq!(range_step(10, 0, -3).collect(), Ok(vec![10, 7, 4, 1]));
}

#[test]
fn test_range_step_and_floats() {
    assert_eq!(range_step(0, 10, 4).collect(), Ok(vec![0, 4, 8]));
    assert_eq!(range_step(0.0, 1.0, 0.25).collect(), Ok(vec![0.0, 0.25, 0.5, 0.75]));
}

#[test]
fn test_range_wrong_direction_is_empty() {
    assert_eq!(range_step(0, 5, -1).collect(), Ok(vec![]));
    assert_eq!(range_step(5, 0, 1).collect(), Ok(vec![]));
}

#[test]
fn test_range_zero_step_is_empty() {
    assert_eq!(range_step(0, 5, 0).collect(), Ok(vec![]));
}

#[test]
fn test_range_to_type_max_does_not_overflow() {
    let values = range_from(250u8, 255u8).collect().expect("active stream");
    assert_eq!(values, vec![250, 251, 252, 253, 254]);
}

#[test]
fn test_range_step_past_type_max_ends_cleanly() {
    let evens = range_step(0u8, 255, 2).collect().expect("active stream");
    let expected: Vec<u8> = (0..=254).step_by(2).collect();
    assert_eq!(evens.len(), 128);
    assert_eq!(evens, expected);

    assert_eq!(range_step(120i8, 127, 5).collect(), Ok(vec![120, 125]));
    assert_eq!(range_step(-120i8, -128, -5).collect(), Ok(vec![-120, -125]));
}

#[test]
fn test_count_ends_at_type_max() {
    assert_eq!(count_from(254u8).collect(), Ok(vec![254, 255]));
    assert_eq!(count(-126i8, -1).collect(), Ok(vec![-126, -127, -128]));
}

#[test]
fn test_count_bounded_by_take() {
    assert_eq!(count_from(0).take(3).collect(), Ok(vec![0, 1, 2]));
    assert_eq!(count(10, -5).take(3).collect(), Ok(vec![10, 5, 0]));
}

#[test]
fn test_count_pulled_exactly_as_many_times_as_taken() {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let taken = count_from(0u64)
        .peek(move |_| counter.set(counter.get() + 1))
        .take(3)
        .collect();
    assert_eq!(taken, Ok(vec![0, 1, 2]));
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_concat_in_argument_order() {
    let joined = concat([
        Streamable::from(vec![1, 2]),
        Streamable::value(3),
        Streamable::from(Stream::of([4, 5])),
        Streamable::from(Vec::new()),
        Streamable::iter(6..7),
    ]);
    assert_eq!(joined.collect(), Ok(vec![1, 2, 3, 4, 5, 6]));
}

#[test]
fn test_concat_consumes_borrowed_streams_at_call() {
    let mut first = of(vec![1]);
    let joined = concat([Streamable::from(&mut first), Streamable::from(vec![2])]);
    assert!(first.is_consumed());
    assert_eq!(joined.collect(), Ok(vec![1, 2]));
}

#[test]
fn test_append_and_prepend() {
    assert_eq!(of(vec![1, 2]).append(vec![3, 4]).collect(), Ok(vec![1, 2, 3, 4]));
    assert_eq!(of(vec![3, 4]).prepend(vec![1, 2]).collect(), Ok(vec![1, 2, 3, 4]));
    assert_eq!(
        of(vec![2]).prepend(Streamable::value(1)).append(Streamable::value(3)).collect(),
        Ok(vec![1, 2, 3])
    );
}

#[test]
fn test_append_all_and_prepend_all() {
    let appended = of(vec![1]).append_all([vec![2, 3], vec![], vec![4]]).collect();
    assert_eq!(appended, Ok(vec![1, 2, 3, 4]));

    let prepended = of(vec![4]).prepend_all([vec![1], vec![2, 3]]).collect();
    assert_eq!(prepended, Ok(vec![1, 2, 3, 4]));

    assert_eq!(of(vec![1, 2]).append_all(Vec::<Vec<i32>>::new()).collect(), Ok(vec![1, 2]));
}

#[test]
fn test_append_all_consumes_borrowed_streams_at_call() {
    let mut first = of(vec![2]);
    let mut second = of(vec![3]);
    let joined = of(vec![1]).append_all([&mut first, &mut second]);
    assert!(first.is_consumed());
    assert!(second.is_consumed());
    assert_eq!(joined.collect(), Ok(vec![1, 2, 3]));
}

#[test]
fn test_zip_shortest_wins() {
    let rows = zip_all([vec![1, 2, 3], vec![1, 2]]).collect();
    assert_eq!(rows, Ok(vec![vec![1, 1], vec![2, 2]]));
}

#[test]
fn test_zip_pairs_heterogeneous() {
    let pairs = zip(vec!["a", "b", "c"], count_from(1)).collect();
    assert_eq!(pairs, Ok(vec![("a", 1), ("b", 2), ("c", 3)]));
}

#[test]
fn test_zip_pulls_every_source_each_round() {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let right = count_from(0).peek(move |_| counter.set(counter.get() + 1));
    let pairs = zip(vec![1, 2], right).collect();
    assert_eq!(pairs, Ok(vec![(1, 0), (2, 1)]));
    assert_eq!(pulls.get(), 3);
}

#[test]
fn test_zip_all_pulls_every_source_in_final_round() {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let last = count_from(10).peek(move |_| counter.set(counter.get() + 1));
    let rows = zip_all([of(vec![1]), of(vec![5, 6]), last]).collect();
    assert_eq!(rows, Ok(vec![vec![1, 5, 10]]));
    assert_eq!(pulls.get(), 2);
}

#[test]
fn test_zip_all_with_no_sources_is_empty() {
    let rows = zip_all(Vec::<Vec<i32>>::new()).collect();
    assert_eq!(rows, Ok(Vec::<Vec<i32>>::new()));
}

#[test]
fn test_zip_of_consumed_stream_fails() {
    let mut original = of(vec![1, 2]);
    let _moved = Stream::of(&mut original);
    let pairs = zip(original, vec![1, 2]).collect();
    assert_eq!(pairs, Err(StreamError::Consumed));
}
