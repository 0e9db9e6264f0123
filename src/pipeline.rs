//! Sequence adapter: one record in, one record out, in order.

use crate::error::Result;
use crate::infer::infer_with;
use crate::limits::Limits;
use crate::model::DocComment;

/// Lazily infers names for each comment of an iterator.
#[derive(Debug, Clone)]
pub struct InferNames<I> {
    inner: I,
    limits: Limits,
}

impl<I> Iterator for InferNames<I>
where
    I: Iterator<Item = DocComment>,
{
    type Item = Result<DocComment>;

    fn next(&mut self) -> Option<Self::Item> {
        let comment = self.inner.next()?;
        Some(infer_with(comment, &self.limits))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> ExactSizeIterator for InferNames<I> where I: ExactSizeIterator<Item = DocComment> {}

pub trait InferNamesExt: Iterator<Item = DocComment> + Sized {
    fn infer_names(self, limits: Limits) -> InferNames<Self> {
        InferNames {
            inner: self,
            limits,
        }
    }
}

impl<I> InferNamesExt for I where I: Iterator<Item = DocComment> {}
