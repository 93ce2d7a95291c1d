use std::iter::FusedIterator;

use super::Fail;

/// The most recent error in the stack. A plain error is returned as is.
pub fn first(err: &Fail) -> &Fail {
    match err {
        Fail::Chain(node) => node.current(),
        Fail::Leaf(_) => err,
    }
}

/// The error one level below the top, which may itself be a chain.
/// A plain error is returned as is.
pub fn second(err: &Fail) -> &Fail {
    match err {
        Fail::Chain(node) => node.inner(),
        Fail::Leaf(_) => err,
    }
}

/// The original cause: the first plain error reached through `inner` links.
pub fn last(mut err: &Fail) -> &Fail {
    while let Fail::Chain(node) = err {
        err = node.inner();
    }
    err
}

impl Fail {
    pub fn first(&self) -> &Fail {
        first(self)
    }

    pub fn second(&self) -> &Fail {
        second(self)
    }

    pub fn last(&self) -> &Fail {
        last(self)
    }

    /// Every level from this one down to the cause, following `second`.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of wrap points between this value and its cause.
    pub fn depth(&self) -> usize {
        self.chain().filter(|err| err.is_chain()).count()
    }
}

/// Iterator returned by [`Fail::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Fail>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Fail;

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.next?;
        self.next = match err {
            Fail::Chain(node) => Some(node.inner()),
            Fail::Leaf(_) => None,
        };
        Some(err)
    }
}

impl FusedIterator for Chain<'_> {}
