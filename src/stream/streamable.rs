//! Normalization of every accepted producer shape into one pull source

use std::collections::VecDeque;
use std::ops::Range;
use std::rc::Rc;

use super::core::{BoxSource, Source, Stream};
use crate::error::StreamResult;
use crate::stream_configuration::StreamConfig;

/// Anything a stream can be built from.
///
/// Resolved once, at the call boundary, into a [`BoxSource`]. No variant
/// buffers or evaluates ahead of demand.
pub enum Streamable<T> {
    /// A pull source, used as-is
    Pull(BoxSource<T>),
    /// A std iterator, one pull per `next`
    Iterable(Box<dyn Iterator<Item = T>>),
    /// Invoked once, at normalization, to obtain the iterator
    Factory(Box<dyn FnOnce() -> BoxSource<T>>),
    /// Another stream; its source is taken
    Stream(Stream<T>),
    /// A bare value, yielded once
    Value(T),
}

impl<T: 'static> Streamable<T> {
    pub fn pull<S>(source: S) -> Self
    where
        S: Source<Item = T> + 'static,
    {
        Streamable::Pull(Box::new(source))
    }

    pub fn iter<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Streamable::Iterable(Box::new(iterable.into_iter()))
    }

    pub fn factory<F, I>(factory: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Streamable::Factory(Box::new(move || -> BoxSource<T> {
            Box::new(IterSource::new(factory()))
        }))
    }

    pub fn value(value: T) -> Self {
        Streamable::Value(value)
    }

    pub(crate) fn into_source(self) -> BoxSource<T> {
        match self {
            Streamable::Pull(source) => source,
            Streamable::Iterable(iter) => Box::new(IterSource { iter }),
            Streamable::Factory(factory) => factory(),
            Streamable::Stream(mut stream) => stream.pop(),
            Streamable::Value(value) => Box::new(Once { value: Some(value) }),
        }
    }

    pub(crate) fn into_stream(self) -> Stream<T> {
        match self {
            Streamable::Stream(stream) => stream,
            other => Stream::from_source(other.into_source(), Rc::new(StreamConfig::default())),
        }
    }
}

impl<T: 'static> From<Stream<T>> for Streamable<T> {
    fn from(stream: Stream<T>) -> Self {
        Streamable::Stream(stream)
    }
}

/// Takes the stream's source now; the borrowed handle is left consumed.
impl<T: 'static> From<&mut Stream<T>> for Streamable<T> {
    fn from(stream: &mut Stream<T>) -> Self {
        Streamable::Stream(stream.detach())
    }
}

impl<T: 'static> From<Vec<T>> for Streamable<T> {
    fn from(items: Vec<T>) -> Self {
        Streamable::iter(items)
    }
}

impl<T: 'static> From<VecDeque<T>> for Streamable<T> {
    fn from(items: VecDeque<T>) -> Self {
        Streamable::iter(items)
    }
}

impl<T: 'static, const N: usize> From<[T; N]> for Streamable<T> {
    fn from(items: [T; N]) -> Self {
        Streamable::iter(items)
    }
}

impl<T> From<Range<T>> for Streamable<T>
where
    T: 'static,
    Range<T>: Iterator<Item = T>,
{
    fn from(range: Range<T>) -> Self {
        Streamable::iter(range)
    }
}

/// Adapts a std iterator into a pull source
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator> IterSource<I> {
    pub fn new<T>(iterable: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: iterable.into_iter(),
        }
    }
}

impl<I: Iterator> Source for IterSource<I> {
    type Item = I::Item;

    fn pull(&mut self) -> StreamResult<Option<I::Item>> {
        Ok(self.iter.next())
    }
}

/// Yields a single value
pub struct Once<T> {
    value: Option<T>,
}

impl<T> Source for Once<T> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        Ok(self.value.take())
    }
}
