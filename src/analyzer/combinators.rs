//! # Lazy Enumeration Combinators
//!
//! The building blocks the grammar model uses to enumerate derivations
//! without a native generator:
//!
//! * [`Interleave`]: fair round-robin merge of sibling streams
//! * [`sequential`]: depth-first concatenation of sibling streams
//! * [`Odometer`]: dependent nested enumeration, where every wheel is rebuilt
//!   from the value currently chosen on the wheel to its left
//!
//! All of them are plain [`Iterator`] state machines: nothing is computed until
//! `next` is called, and dropping them mid-way needs no cleanup.

/// Fair merge of several streams.
///
/// Takes one item from each live stream in turn, wrapping around, and skips
/// streams that have run dry. A stream with an unbounded number of items
/// therefore never starves its siblings.
pub struct Interleave<I> {
    sources: Vec<Option<I>>,
    cursor: usize,
    live: usize,
}

impl<I: Iterator> Interleave<I> {
    pub fn new(sources: Vec<I>) -> Self {
        let live = sources.len();
        Self {
            sources: sources.into_iter().map(Some).collect(),
            cursor: 0,
            live,
        }
    }
}

impl<I: Iterator> Iterator for Interleave<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.live > 0 {
            let index = self.cursor;
            self.cursor = (self.cursor + 1) % self.sources.len();

            let pulled = match &mut self.sources[index] {
                Some(source) => source.next(),
                None => continue,
            };
            match pulled {
                Some(item) => return Some(item),
                None => {
                    self.sources[index] = None;
                    self.live -= 1;
                }
            }
        }
        None
    }
}

/// Every item of the first stream, then every item of the second, and so on.
pub fn sequential<I: Iterator>(sources: Vec<I>) -> std::iter::Flatten<std::vec::IntoIter<I>> {
    sources.into_iter().flatten()
}

pub type Wheel<'a, T, E> = Box<dyn Iterator<Item = Result<T, E>> + 'a>;
pub type WheelBuilder<'a, T, E> = Box<dyn Fn(&T) -> Wheel<'a, T, E> + 'a>;

/// Dependent nested enumeration ("odometer with dependent wheels").
///
/// The first wheel comes from `first`; wheel `i + 1` is built by
/// `builders[i]` from the item currently chosen on wheel `i`. The rightmost
/// wheel turns fastest: when it runs dry the wheel to its left advances and the
/// right one is rebuilt from the new choice. Each complete choice is yielded as
/// a vector with one item per wheel. The enumeration ends when the first wheel
/// runs dry, or right after an `Err` item, which is passed through.
pub struct Odometer<'a, T, E> {
    first: Option<Box<dyn FnOnce() -> Wheel<'a, T, E> + 'a>>,
    builders: Vec<WheelBuilder<'a, T, E>>,
    wheels: Vec<Wheel<'a, T, E>>,
    chosen: Vec<T>,
    done: bool,
}

impl<'a, T, E> Odometer<'a, T, E> {
    pub fn new(
        first: impl FnOnce() -> Wheel<'a, T, E> + 'a,
        builders: Vec<WheelBuilder<'a, T, E>>,
    ) -> Self {
        Self {
            first: Some(Box::new(first)),
            wheels: Vec::with_capacity(builders.len() + 1),
            chosen: Vec::with_capacity(builders.len()),
            builders,
            done: false,
        }
    }

    fn width(&self) -> usize {
        self.builders.len() + 1
    }
}

impl<T: Clone, E> Iterator for Odometer<'_, T, E> {
    type Item = Result<Vec<T>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(first) = self.first.take() {
            self.wheels.push(first());
        }

        // `chosen` holds one item for every wheel below the top one.
        while let Some(top) = self.wheels.last_mut() {
            match top.next() {
                Some(Ok(item)) => {
                    let depth = self.wheels.len();
                    if depth == self.width() {
                        let mut tuple = self.chosen.clone();
                        tuple.push(item);
                        return Some(Ok(tuple));
                    }
                    let wheel = (self.builders[depth - 1])(&item);
                    self.chosen.push(item);
                    self.wheels.push(wheel);
                }
                Some(Err(e)) => {
                    self.done = true;
                    self.wheels.clear();
                    self.chosen.clear();
                    return Some(Err(e));
                }
                None => {
                    self.wheels.pop();
                    self.chosen.pop();
                }
            }
        }

        self.done = true;
        None
    }
}
