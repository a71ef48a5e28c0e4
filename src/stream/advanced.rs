//! Advanced stream combinators: flat_map, accumulate, unique, repeat, compress, tee
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;

use log::{debug, trace, warn};

use super::core::{BoxSource, Source, Stream};
use super::streamable::Streamable;
use crate::error::{StreamError, StreamResult};
use crate::stream_configuration::StreamConfig;

// ================================
// FlatMap
// ================================

pub struct FlatMap<T, U, F> {
    upstream: BoxSource<T>,
    f: F,
    inner: Option<BoxSource<U>>,
}

impl<T, U, R, F> Source for FlatMap<T, U, F>
where
    T: 'static,
    U: 'static,
    R: Into<Streamable<U>>,
    F: FnMut(T) -> R,
{
    type Item = U;

    fn pull(&mut self) -> StreamResult<Option<U>> {
        loop {
            if let Some(inner) = &mut self.inner {
                match inner.pull()? {
                    Some(item) => return Ok(Some(item)),
                    None => self.inner = None,
                }
            }

            match self.upstream.pull()? {
                Some(item) => self.inner = Some((self.f)(item).into().into_source()),
                None => return Ok(None),
            }
        }
    }
}

// ================================
// Accumulate
// ================================

pub struct Accumulate<T, U, F> {
    upstream: BoxSource<T>,
    acc: Option<U>,
    f: F,
    seeded: bool,
}

impl<T, U, F> Source for Accumulate<T, U, F>
where
    U: Clone,
    F: FnMut(U, T) -> U,
{
    type Item = U;

    fn pull(&mut self) -> StreamResult<Option<U>> {
        if !self.seeded {
            self.seeded = true;
            return Ok(self.acc.clone());
        }
        let Some(item) = self.upstream.pull()? else {
            return Ok(None);
        };
        let Some(acc) = self.acc.take() else {
            return Ok(None);
        };
        let next = (self.f)(acc, item);
        self.acc = Some(next.clone());
        Ok(Some(next))
    }
}

// ================================
// Unique
// ================================

pub struct Unique<T> {
    upstream: BoxSource<T>,
    seen: HashSet<T>,
}

impl<T> Source for Unique<T>
where
    T: Eq + Hash + Clone,
{
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        while let Some(item) = self.upstream.pull()? {
            if self.seen.insert(item.clone()) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

// ================================
// Repeat
// ================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replays {
    Finite(usize),
    Forever,
}

/// Records the first pass, then replays the record.
pub struct Repeat<T> {
    upstream: Option<BoxSource<T>>,
    buffer: Vec<T>,
    position: usize,
    replays: Replays,
}

impl<T: Clone> Source for Repeat<T> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        if let Some(upstream) = &mut self.upstream {
            if let Some(item) = upstream.pull()? {
                self.buffer.push(item.clone());
                return Ok(Some(item));
            }
            self.upstream = None;
            if self.buffer.is_empty() && self.replays == Replays::Forever {
                warn!("repeat_forever over an empty stream; ending instead of spinning");
            }
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        if self.position == 0 {
            match &mut self.replays {
                Replays::Finite(0) => return Ok(None),
                Replays::Finite(remaining) => *remaining -= 1,
                Replays::Forever => {}
            }
            trace!("replaying {} buffered elements", self.buffer.len());
        }

        let item = self.buffer[self.position].clone();
        self.position = (self.position + 1) % self.buffer.len();
        Ok(Some(item))
    }
}

// ================================
// Compress
// ================================

/// Mask values accepted by [`Stream::compress`]: `true` and nonzero numbers select.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_truthy_float {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                // NaN does not select
                fn is_truthy(&self) -> bool {
                    *self != 0.0 && !self.is_nan()
                }
            }
        )*
    };
}

impl_truthy_float!(f32, f64);

impl<M: Truthy + ?Sized> Truthy for &M {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

pub struct Compress<T, M> {
    upstream: BoxSource<T>,
    mask: BoxSource<M>,
    done: bool,
}

impl<T, M: Truthy> Source for Compress<T, M> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        while !self.done {
            let Some(item) = self.upstream.pull()? else {
                break;
            };
            let Some(selector) = self.mask.pull()? else {
                break;
            };
            if selector.is_truthy() {
                return Ok(Some(item));
            }
        }
        self.done = true;
        Ok(None)
    }
}

// ================================
// Tee
// ================================

struct TeeShared<T> {
    upstream: RefCell<BoxSource<T>>,
    // `None` once the branch has been dropped
    buffers: RefCell<Vec<Option<VecDeque<T>>>>,
    exhausted: Cell<bool>,
}

/// One branch of a tee. Drains its own queue first, then pulls upstream
/// once and fans the element out to every live branch.
///
/// The upstream stays borrowed only while it is being pulled, so code
/// running inside that pull may still drain a sibling's queued elements.
/// A sibling that needs the upstream at that point gets
/// [`StreamError::Reentrant`].
pub struct TeeBranch<T> {
    shared: Rc<TeeShared<T>>,
    index: usize,
}

impl<T: Clone> Source for TeeBranch<T> {
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        let queued = self.shared.buffers.borrow_mut()[self.index]
            .as_mut()
            .and_then(VecDeque::pop_front);
        if let Some(item) = queued {
            return Ok(Some(item));
        }
        if self.shared.exhausted.get() {
            return Ok(None);
        }

        let pulled = {
            let Ok(mut upstream) = self.shared.upstream.try_borrow_mut() else {
                debug!("tee branch {} pulled while upstream is busy", self.index);
                return Err(StreamError::Reentrant);
            };
            upstream.pull()?
        };

        match pulled {
            Some(item) => {
                let mut buffers = self.shared.buffers.borrow_mut();
                trace!("tee fan-out to {} branches", buffers.len());
                for (index, buffer) in buffers.iter_mut().enumerate() {
                    if index == self.index {
                        continue;
                    }
                    if let Some(buffer) = buffer {
                        buffer.push_back(item.clone());
                    }
                }
                Ok(Some(item))
            }
            None => {
                self.shared.exhausted.set(true);
                Ok(None)
            }
        }
    }
}

impl<T> Drop for TeeBranch<T> {
    fn drop(&mut self) {
        if let Ok(mut buffers) = self.shared.buffers.try_borrow_mut() {
            buffers[self.index] = None;
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Map each element to a nested streamable (or a bare
    /// [`Streamable::Value`]) and flatten the results in order
    pub fn flat_map<U, R, F>(self, f: F) -> Stream<U>
    where
        U: 'static,
        R: Into<Streamable<U>>,
        F: FnMut(T) -> R + 'static,
    {
        self.move_stream(|upstream| FlatMap {
            upstream,
            f,
            inner: None,
        })
    }

    /// Running fold: yields `seed`, then the accumulator after each element
    pub fn accumulate<U, F>(self, seed: U, f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: FnMut(U, T) -> U + 'static,
    {
        self.move_stream(|upstream| Accumulate {
            upstream,
            acc: Some(seed),
            f,
            seeded: false,
        })
    }

    /// Keep each element whose positionally paired mask value is truthy.
    /// Ends when either side ends.
    pub fn compress<M>(self, mask: impl Into<Streamable<M>>) -> Stream<T>
    where
        M: Truthy + 'static,
    {
        let mask = mask.into().into_source();
        self.move_stream(|upstream| Compress {
            upstream,
            mask,
            done: false,
        })
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Drop elements equal to one already yielded
    pub fn unique(self) -> Stream<T>
    where
        T: Eq + Hash,
    {
        let capacity = self.config().unique_buffer.initial_capacity;
        self.move_stream(|upstream| Unique {
            upstream,
            seen: HashSet::with_capacity(capacity),
        })
    }

    /// Yield the whole sequence `times` times. Zero yields nothing and never
    /// pulls upstream.
    pub fn repeat(self, times: usize) -> Stream<T> {
        match times {
            0 => self.repeat_with(Replays::Finite(0), false),
            n => self.repeat_with(Replays::Finite(n - 1), true),
        }
    }

    /// Replay the sequence indefinitely. Only safe when bounded downstream.
    pub fn repeat_forever(self) -> Stream<T> {
        self.repeat_with(Replays::Forever, true)
    }

    fn repeat_with(self, replays: Replays, keep_upstream: bool) -> Stream<T> {
        let capacity = self.config().repeat_buffer.initial_capacity;
        self.move_stream(|upstream| Repeat {
            upstream: keep_upstream.then_some(upstream),
            buffer: Vec::with_capacity(capacity),
            position: 0,
            replays,
        })
    }

    /// Split into `n` independent streams over one upstream pull
    pub fn tee(self, n: usize) -> Vec<Stream<T>> {
        let (shared, config) = self.share(n);
        (0..n).map(|index| branch(&shared, index, &config)).collect()
    }

    /// `tee(2)` as a pair
    pub fn tee_pair(self) -> (Stream<T>, Stream<T>) {
        let (shared, config) = self.share(2);
        (branch(&shared, 0, &config), branch(&shared, 1, &config))
    }

    fn share(mut self, n: usize) -> (Rc<TeeShared<T>>, Rc<StreamConfig>) {
        let config = self.shared_config();
        let capacity = config.tee_buffer.initial_capacity;
        let shared = TeeShared {
            upstream: RefCell::new(self.pop()),
            buffers: RefCell::new(
                (0..n)
                    .map(|_| Some(VecDeque::with_capacity(capacity)))
                    .collect(),
            ),
            exhausted: Cell::new(false),
        };
        (Rc::new(shared), config)
    }
}

fn branch<T: Clone + 'static>(
    shared: &Rc<TeeShared<T>>,
    index: usize,
    config: &Rc<StreamConfig>,
) -> Stream<T> {
    let source = TeeBranch {
        shared: Rc::clone(shared),
        index,
    };
    Stream::from_source(Box::new(source), Rc::clone(config))
}
