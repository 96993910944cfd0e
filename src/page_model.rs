//! Opaque per-variant page model carrier.

/// A model carried by an endpoint variant that never appears in the URL.
///
/// Declare the field with [`FieldShape::page_model`](crate::FieldShape::page_model).
/// Parsing constructs it with `T::default()`; a router built with
/// [`Router::infer_with_model`](crate::Router::infer_with_model) may seed it
/// afterwards.
///
/// # Examples
///
/// ```
/// use endpoint_router::PageModel;
///
/// let mut model: PageModel<u32> = PageModel::default();
/// model.set(7);
/// assert_eq!(*model.get(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageModel<T> {
    model: T,
}

impl<T> PageModel<T> {
    /// Wraps a model.
    #[must_use]
    pub const fn new(model: T) -> Self {
        Self { model }
    }

    /// Returns the model.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.model
    }

    /// Replaces the model.
    pub fn set(&mut self, model: T) {
        self.model = model;
    }

    /// Consumes the carrier, returning the model.
    pub fn into_inner(self) -> T {
        self.model
    }
}
