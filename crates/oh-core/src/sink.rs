//! Destination for tag annotations.

/// Applies a tag to a batch of items.
///
/// The classifier calls this once per flushed batch and may call it several
/// times for the same tag with disjoint batches; the combined effect must be
/// the union. Errors are returned to the caller of
/// [`Classifier::classify`](crate::Classifier::classify) unchanged and stop
/// the run.
pub trait TagSink<R: ?Sized> {
    /// The error raised when applying a tag fails.
    type Error;

    /// Tags every item in `items` with `tag`.
    fn apply_tag(&mut self, tag: &str, items: &[&R]) -> Result<(), Self::Error>;
}

impl<R: ?Sized, S: TagSink<R> + ?Sized> TagSink<R> for &mut S {
    type Error = S::Error;

    fn apply_tag(&mut self, tag: &str, items: &[&R]) -> Result<(), Self::Error> {
        (**self).apply_tag(tag, items)
    }
}
