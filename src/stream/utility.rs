//! Utility combinators (peek, enumerate) and the eager terminals:
//! collect, reduce, for_each, count, all/every, any/some
use super::core::{BoxSource, Source, Stream};
use crate::error::StreamResult;

// Peek
pub struct Peek<T, F> {
    upstream: BoxSource<T>,
    f: F,
}

impl<T, F> Source for Peek<T, F>
where
    F: FnMut(&T),
{
    type Item = T;

    fn pull(&mut self) -> StreamResult<Option<T>> {
        let item = self.upstream.pull()?;
        if let Some(item) = &item {
            (self.f)(item);
        }
        Ok(item)
    }
}

// Enumerate
pub struct Enumerate<T> {
    upstream: BoxSource<T>,
    index: usize,
}

impl<T> Source for Enumerate<T> {
    type Item = (usize, T);

    fn pull(&mut self) -> StreamResult<Option<(usize, T)>> {
        let Some(item) = self.upstream.pull()? else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        Ok(Some((index, item)))
    }
}

impl<T: 'static> Stream<T> {
    /// Call `f` on each element as it passes through
    pub fn peek<F>(self, f: F) -> Stream<T>
    where
        F: FnMut(&T) + 'static,
    {
        self.move_stream(|upstream| Peek { upstream, f })
    }

    /// Pair each element with its index, starting at zero
    pub fn enumerate(self) -> Stream<(usize, T)> {
        self.enumerate_from(0)
    }

    pub fn enumerate_from(self, start: usize) -> Stream<(usize, T)> {
        self.move_stream(|upstream| Enumerate {
            upstream,
            index: start,
        })
    }

    /// Drain every element into a `Vec`
    pub fn collect(self) -> StreamResult<Vec<T>> {
        self.collect_into()
    }

    /// Drain every element into any extendable collection
    pub fn collect_into<B>(mut self) -> StreamResult<B>
    where
        B: Default + Extend<T>,
    {
        let mut source = self.pop();
        let mut collection = B::default();
        while let Some(item) = source.pull()? {
            collection.extend(std::iter::once(item));
        }
        Ok(collection)
    }

    /// Left fold from `seed`. The seed itself is not yielded anywhere.
    pub fn reduce<U, F>(mut self, seed: U, mut f: F) -> StreamResult<U>
    where
        F: FnMut(U, T) -> U,
    {
        let mut source = self.pop();
        let mut acc = seed;
        while let Some(item) = source.pull()? {
            acc = f(acc, item);
        }
        Ok(acc)
    }

    pub fn for_each<F>(mut self, mut f: F) -> StreamResult<()>
    where
        F: FnMut(T),
    {
        let mut source = self.pop();
        while let Some(item) = source.pull()? {
            f(item);
        }
        Ok(())
    }

    /// Number of elements
    pub fn count(self) -> StreamResult<usize> {
        self.map(|_| 1usize).reduce(0, |acc, one| acc + one)
    }

    /// `false` at the first element failing `predicate`; `true` when empty
    pub fn all<F>(mut self, mut predicate: F) -> StreamResult<bool>
    where
        F: FnMut(T) -> bool,
    {
        let mut source = self.pop();
        while let Some(item) = source.pull()? {
            if !predicate(item) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn every<F>(self, predicate: F) -> StreamResult<bool>
    where
        F: FnMut(T) -> bool,
    {
        self.all(predicate)
    }

    /// `true` at the first element passing `predicate`; `false` when empty
    pub fn any<F>(mut self, mut predicate: F) -> StreamResult<bool>
    where
        F: FnMut(T) -> bool,
    {
        let mut source = self.pop();
        while let Some(item) = source.pull()? {
            if predicate(item) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn some<F>(self, predicate: F) -> StreamResult<bool>
    where
        F: FnMut(T) -> bool,
    {
        self.any(predicate)
    }
}
