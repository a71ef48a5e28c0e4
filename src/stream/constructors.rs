//! Stream constructors: of, element, of_elements, empty, concat, zip, range, count
use std::collections::VecDeque;

use num_traits::{CheckedAdd, Num};

use super::core::{BoxSource, Source, Stream};
use super::streamable::Streamable;
use crate::error::StreamResult;

// ================================
// Sources
// ================================

/// Drains each source fully, in order
pub struct Concat<T> {
    sources: VecDeque<BoxSource<T>>,
}

impl<T> Concat<T> {
    pub(crate) fn new(sources: impl IntoIterator<Item = BoxSource<T>>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }
}

impl<T> Source for Concat<T> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        while let Some(current) = self.sources.front_mut() {
            if let Some(item) = current.pull()? {
                return Ok(Some(item));
            }
            self.sources.pop_front();
        }
        Ok(None)
    }
}

/// Pairs two sources positionally; ends with the shorter one.
/// Both sides are pulled every round, including the last.
pub struct Zip<A, B> {
    left: BoxSource<A>,
    right: BoxSource<B>,
    done: bool,
}

impl<A, B> Source for Zip<A, B> {
    type Item = (A, B);

    fn pull(&mut self) -> StreamResult<Option<(A, B)>> {
        if self.done {
            return Ok(None);
        }
        let left = self.left.pull()?;
        let right = self.right.pull()?;
        match (left, right) {
            (Some(a), Some(b)) => Ok(Some((a, b))),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

/// One row per round across any number of sources; ends with the shortest.
/// Every source is pulled each round, including the last.
pub struct ZipAll<T> {
    sources: Vec<BoxSource<T>>,
    done: bool,
}

impl<T> Source for ZipAll<T> {
    type Item = Vec<T>;

    fn pull(&mut self) -> StreamResult<Option<Vec<T>>> {
        if self.done || self.sources.is_empty() {
            return Ok(None);
        }
        let mut row = Vec::with_capacity(self.sources.len());
        let mut ended = false;
        for source in &mut self.sources {
            match source.pull()? {
                Some(item) => row.push(item),
                None => ended = true,
            }
        }
        if ended {
            self.done = true;
            return Ok(None);
        }
        Ok(Some(row))
    }
}

/// Numbers a [`Count`] can step through. Advancing past the end of the
/// type yields `None` instead of overflowing.
pub trait Progression: Num + PartialOrd + Copy {
    fn checked_advance(self, step: Self) -> Option<Self>;
}

macro_rules! impl_progression_int {
    ($($t:ty),*) => {
        $(
            impl Progression for $t {
                fn checked_advance(self, step: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &step)
                }
            }
        )*
    };
}

impl_progression_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_progression_float {
    ($($t:ty),*) => {
        $(
            impl Progression for $t {
                // saturates to infinity, which every finite bound rejects
                fn checked_advance(self, step: Self) -> Option<Self> {
                    Some(self + step)
                }
            }
        )*
    };
}

impl_progression_float!(f32, f64);

/// Arithmetic progression without a bound. The step is applied lazily, and
/// the sequence ends if the next value would not fit the type.
pub struct Count<N> {
    current: Option<N>,
    step: N,
    started: bool,
}

impl<N: Progression> Source for Count<N> {
    type Item = N;

    fn pull(&mut self) -> StreamResult<Option<N>> {
        if self.started {
            self.current = self
                .current
                .and_then(|current| current.checked_advance(self.step));
        } else {
            self.started = true;
        }
        Ok(self.current)
    }
}

// ================================
// Constructor Functions
// ================================

/// Create a stream from anything streamable
pub fn of<T: 'static>(source: impl Into<Streamable<T>>) -> Stream<T> {
    Stream::of(source)
}

/// Create a stream that emits a single value
pub fn element<T: 'static>(item: T) -> Stream<T> {
    Stream::of(Streamable::value(item))
}

/// Create a stream over a literal list of items
pub fn of_elements<T, I>(items: I) -> Stream<T>
where
    T: 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
{
    Stream::of(Streamable::iter(items))
}

/// Create an empty stream
pub fn empty<T: 'static>() -> Stream<T> {
    of_elements(std::iter::empty())
}

/// Yield every element of each source in argument order.
///
/// All arguments are normalized immediately, so any stream handed in by
/// `&mut` is consumed at this call, not at first pull.
pub fn concat<T, I>(sources: I) -> Stream<T>
where
    T: 'static,
    I: IntoIterator,
    I::Item: Into<Streamable<T>>,
{
    let sources: Vec<BoxSource<T>> = sources
        .into_iter()
        .map(|source| source.into().into_source())
        .collect();
    Stream::of(Streamable::pull(Concat::new(sources)))
}

/// Pair two sources element by element, stopping when either ends.
/// Each round pulls both sources before deciding.
pub fn zip<A, B>(left: impl Into<Streamable<A>>, right: impl Into<Streamable<B>>) -> Stream<(A, B)>
where
    A: 'static,
    B: 'static,
{
    Stream::of(Streamable::pull(Zip {
        left: left.into().into_source(),
        right: right.into().into_source(),
        done: false,
    }))
}

/// Zip any number of same-typed sources into rows, stopping when any ends.
/// Zero sources yield an empty stream.
pub fn zip_all<T, I>(sources: I) -> Stream<Vec<T>>
where
    T: 'static,
    I: IntoIterator,
    I::Item: Into<Streamable<T>>,
{
    let sources = sources
        .into_iter()
        .map(|source| source.into().into_source())
        .collect();
    Stream::of(Streamable::pull(ZipAll { sources, done: false }))
}

/// `start, start + step, start + 2 * step, ...` until the type runs out.
///
/// Bound it with `take` or `take_while` before any terminal call.
pub fn count<N>(start: N, step: N) -> Stream<N>
where
    N: Progression + 'static,
{
    Stream::of(Streamable::pull(Count {
        current: Some(start),
        step,
        started: false,
    }))
}

/// `start, start + 1, ...` without end
pub fn count_from<N>(start: N) -> Stream<N>
where
    N: Progression + 'static,
{
    count(start, N::one())
}

/// `0, 1, ..., stop - 1`
pub fn range<N>(stop: N) -> Stream<N>
where
    N: Progression + 'static,
{
    range_step(N::zero(), stop, N::one())
}

/// `start, start + 1, ...` up to, not including, `stop`
pub fn range_from<N>(start: N, stop: N) -> Stream<N>
where
    N: Progression + 'static,
{
    range_step(start, stop, N::one())
}

/// Arithmetic progression from `start` toward the exclusive bound `stop`.
///
/// A positive step ascends while `value < stop`, a negative step descends
/// while `value > stop`, and a zero step yields nothing.
pub fn range_step<N>(start: N, stop: N, step: N) -> Stream<N>
where
    N: Progression + 'static,
{
    let zero = N::zero();
    let ascending = step > zero;
    let descending = step < zero;
    count(start, step).take_while(move |value| {
        if ascending {
            *value < stop
        } else if descending {
            *value > stop
        } else {
            false
        }
    })
}

impl<T: 'static> Stream<T> {
    /// This stream's elements followed by `other`'s
    pub fn append(self, other: impl Into<Streamable<T>>) -> Stream<T> {
        self.append_all(std::iter::once(other))
    }

    /// This stream's elements followed by each of `others` in order.
    /// Like [`concat`], every argument is normalized at this call.
    pub fn append_all<I>(self, others: I) -> Stream<T>
    where
        I: IntoIterator,
        I::Item: Into<Streamable<T>>,
    {
        let tails: Vec<BoxSource<T>> = others
            .into_iter()
            .map(|other| other.into().into_source())
            .collect();
        self.move_stream(move |head| Concat::new(std::iter::once(head).chain(tails)))
    }

    /// `other`'s elements followed by this stream's
    pub fn prepend(self, other: impl Into<Streamable<T>>) -> Stream<T> {
        self.prepend_all(std::iter::once(other))
    }

    /// Each of `others` in order, then this stream's elements
    pub fn prepend_all<I>(self, others: I) -> Stream<T>
    where
        I: IntoIterator,
        I::Item: Into<Streamable<T>>,
    {
        let heads: Vec<BoxSource<T>> = others
            .into_iter()
            .map(|other| other.into().into_source())
            .collect();
        self.move_stream(move |tail| Concat::new(heads.into_iter().chain(std::iter::once(tail))))
    }
}
