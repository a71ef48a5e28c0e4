use std::rc::Rc;

use crate::stream::Stream;

/// A Pipe is a reusable stream transformation from one element type to another.
/// It's a function from `Stream<I>` to `Stream<O>`.
pub struct Pipe<I, O> {
    f: Rc<dyn Fn(Stream<I>) -> Stream<O>>,
}

impl<I, O> Clone for Pipe<I, O> {
    fn clone(&self) -> Self {
        Pipe {
            f: Rc::clone(&self.f),
        }
    }
}

impl<I, O> Pipe<I, O> {
    /// Create a new pipe from a function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Stream<I>) -> Stream<O> + 'static,
    {
        Pipe { f: Rc::new(f) }
    }

    /// Apply this pipe to a stream
    pub fn apply(&self, input: Stream<I>) -> Stream<O> {
        (self.f)(input)
    }
}

/// Create a pipe that applies the given function to each element
pub fn map<I, O, F>(f: F) -> Pipe<I, O>
where
    F: Fn(I) -> O + Clone + 'static,
    I: 'static,
    O: 'static,
{
    Pipe::new(move |input: Stream<I>| input.map(f.clone()))
}

/// Create a pipe that filters elements based on the predicate
pub fn filter<I, F>(predicate: F) -> Pipe<I, I>
where
    F: Fn(&I) -> bool + Clone + 'static,
    I: 'static,
{
    Pipe::new(move |input: Stream<I>| input.filter(predicate.clone()))
}

/// Compose two pipes together
pub fn compose<I, M, O>(p1: Pipe<I, M>, p2: Pipe<M, O>) -> Pipe<I, O>
where
    I: 'static,
    M: 'static,
    O: 'static,
{
    Pipe::new(move |input| p2.apply(p1.apply(input)))
}

/// Identity pipe that doesn't transform the stream
pub fn identity<I: 'static>() -> Pipe<I, I> {
    Pipe::new(|input| input)
}

/// Extension trait for pipes
pub trait PipeExt<I, O> {
    /// Compose this pipe with another pipe
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: 'static;
}

impl<I, O> PipeExt<I, O> for Pipe<I, O>
where
    I: 'static,
    O: 'static,
{
    fn compose<P>(self, other: Pipe<O, P>) -> Pipe<I, P>
    where
        P: 'static,
    {
        compose(self, other)
    }
}

impl<T: 'static> Stream<T> {
    /// Run this stream through a pipe
    pub fn through<U>(self, pipe: &Pipe<T, U>) -> Stream<U> {
        pipe.apply(self)
    }
}
