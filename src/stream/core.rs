//! Core pull trait, the single-owner `Stream` handle, and the slicing
//! combinators (map, filter, take, drop and their predicate forms).

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use log::{debug, trace};

use super::streamable::Streamable;
use crate::error::{StreamError, StreamResult};
use crate::stream_configuration::StreamConfig;

/// A pull-iterator: yields the next value, `None` at the end, or an error
/// when the handle it came from has been consumed.
pub trait Source {
    type Item;
    fn pull(&mut self) -> StreamResult<Option<Self::Item>>;
}

/// Boxed source owned by a [`Stream`]
pub type BoxSource<T> = Box<dyn Source<Item = T>>;

impl<S: Source + ?Sized> Source for Box<S> {
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<Self::Item>> {
        (**self).pull()
    }
}

/// Stand-in source left behind in a consumed handle. Every pull fails.
pub(crate) struct Poisoned<T> {
    _phantom: PhantomData<T>,
}

impl<T> Poisoned<T> {
    pub(crate) fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

impl<T> Source for Poisoned<T> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        debug!("pull on a consumed stream");
        Err(StreamError::Consumed)
    }
}

/// Lifecycle of a stream handle. `Consumed` is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Active,
    Consumed,
}

/// A lazy, single-consumption handle over one pull source.
///
/// Chaining methods take `self` by value and hand the source to the new
/// stream. Taking the source through a `&mut Stream` (see
/// [`Streamable::from`]) leaves the handle poisoned: every later pull returns
/// [`StreamError::Consumed`].
pub struct Stream<T> {
    source: BoxSource<T>,
    state: StreamState,
    config: Rc<StreamConfig>,
}

impl<T: 'static> Stream<T> {
    /// Wrap anything streamable: a source, an iterable, a factory, a value,
    /// or another stream.
    pub fn of(source: impl Into<Streamable<T>>) -> Self {
        source.into().into_stream()
    }

    pub(crate) fn from_source(source: BoxSource<T>, config: Rc<StreamConfig>) -> Self {
        Self {
            source,
            state: StreamState::Active,
            config,
        }
    }

    /// Replace the configuration carried by this stream and everything derived from it
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Rc<StreamConfig> {
        Rc::clone(&self.config)
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_consumed(&self) -> bool {
        self.state == StreamState::Consumed
    }

    /// Pull one value from whatever source the handle currently holds
    pub fn pull(&mut self) -> StreamResult<Option<T>> {
        self.source.pull()
    }

    /// Take the current source and poison the handle
    pub(crate) fn pop(&mut self) -> BoxSource<T> {
        if self.state == StreamState::Active {
            trace!("stream source detached");
        }
        self.state = StreamState::Consumed;
        std::mem::replace(&mut self.source, Box::new(Poisoned::new()))
    }

    /// Move the source into a fresh handle with the same configuration
    pub(crate) fn detach(&mut self) -> Stream<T> {
        let config = self.shared_config();
        Stream::from_source(self.pop(), config)
    }

    /// Pop the source, wrap it, and return a stream owning the wrapper
    pub(crate) fn move_stream<S, F>(mut self, wrap: F) -> Stream<S::Item>
    where
        S: Source + 'static,
        S::Item: 'static,
        F: FnOnce(BoxSource<T>) -> S,
    {
        let config = self.shared_config();
        Stream::from_source(Box::new(wrap(self.pop())), config)
    }

    /// Transform each element
    pub fn map<U, F>(self, f: F) -> Stream<U>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        self.move_stream(|upstream| Map { upstream, f })
    }

    /// Keep the elements matching `predicate`
    pub fn filter<F>(self, predicate: F) -> Stream<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.move_stream(|upstream| Filter { upstream, predicate })
    }

    /// Yield at most `n` elements. Upstream is never pulled after the `n`th.
    pub fn take(self, n: usize) -> Stream<T> {
        self.move_stream(|upstream| Take { upstream, remaining: n })
    }

    /// Skip the first `n` elements
    pub fn drop(self, n: usize) -> Stream<T> {
        self.move_stream(|upstream| Skip { upstream, remaining: n })
    }

    /// Yield elements until `predicate` first fails; the failing element is discarded
    pub fn take_while<F>(self, predicate: F) -> Stream<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.move_stream(|upstream| TakeWhile {
            upstream,
            predicate,
            done: false,
        })
    }

    /// Skip elements until `predicate` first fails, then yield that element and the rest
    pub fn drop_while<F>(self, predicate: F) -> Stream<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.move_stream(|upstream| SkipWhile {
            upstream,
            predicate,
            skipping: true,
        })
    }
}

impl<T: 'static> Iterator for Stream<T> {
    type Item = StreamResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().transpose()
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ================================
// Slicing combinators
// ================================

pub struct Map<S, F> {
    upstream: S,
    f: F,
}

impl<S, U, F> Source for Map<S, F>
where
    S: Source,
    F: FnMut(S::Item) -> U,
{
    type Item = U;

    fn pull(&mut self) -> StreamResult<Option<U>> {
        Ok(self.upstream.pull()?.map(&mut self.f))
    }
}

pub struct Filter<S, F> {
    upstream: S,
    predicate: F,
}

impl<S, F> Source for Filter<S, F>
where
    S: Source,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<S::Item>> {
        while let Some(item) = self.upstream.pull()? {
            if (self.predicate)(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

pub struct Take<S> {
    upstream: S,
    remaining: usize,
}

impl<S: Source> Source for Take<S> {
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<S::Item>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match self.upstream.pull()? {
            Some(item) => {
                self.remaining -= 1;
                Ok(Some(item))
            }
            None => {
                self.remaining = 0;
                Ok(None)
            }
        }
    }
}

pub struct Skip<S> {
    upstream: S,
    remaining: usize,
}

impl<S: Source> Source for Skip<S> {
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<S::Item>> {
        while self.remaining > 0 {
            self.remaining -= 1;
            if self.upstream.pull()?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
        }
        self.upstream.pull()
    }
}

pub struct TakeWhile<S, F> {
    upstream: S,
    predicate: F,
    done: bool,
}

impl<S, F> Source for TakeWhile<S, F>
where
    S: Source,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<S::Item>> {
        if self.done {
            return Ok(None);
        }
        match self.upstream.pull()? {
            Some(item) if (self.predicate)(&item) => Ok(Some(item)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

pub struct SkipWhile<S, F> {
    upstream: S,
    predicate: F,
    skipping: bool,
}

impl<S, F> Source for SkipWhile<S, F>
where
    S: Source,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn pull(&mut self) -> StreamResult<Option<S::Item>> {
        if self.skipping {
            while let Some(item) = self.upstream.pull()? {
                if !(self.predicate)(&item) {
                    self.skipping = false;
                    return Ok(Some(item));
                }
            }
            return Ok(None);
        }
        self.upstream.pull()
    }
}
