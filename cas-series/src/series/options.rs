/// Options that control the fast series expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesOptions {
    /// The number of extra degrees to compute for every factor of a product before multiplying
    /// the factors together. The product is truncated back down to the requested order
    /// afterwards.
    ///
    /// The default is `2`.
    pub product_guard: usize,

    /// The largest truncation order accepted. Requests for a larger order are declined as
    /// [`Infeasible::OrderTooLarge`].
    ///
    /// The default is `1024`.
    ///
    /// [`Infeasible::OrderTooLarge`]: super::error::Infeasible::OrderTooLarge
    pub max_order: usize,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            product_guard: 2,
            max_order: 1024,
        }
    }
}

impl SeriesOptions {
    /// Wraps the given [`SeriesOptions`] into a builder for further customization.
    pub fn into_builder(self) -> SeriesOptionsBuilder {
        SeriesOptionsBuilder(self)
    }
}

/// A builder for [`SeriesOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOptionsBuilder(SeriesOptions);

impl SeriesOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of extra degrees computed for each product factor. See
    /// [`SeriesOptions::product_guard`] for more information.
    pub fn product_guard(mut self, product_guard: usize) -> Self {
        self.0.product_guard = product_guard;
        self
    }

    /// Sets the largest accepted truncation order. See [`SeriesOptions::max_order`] for more
    /// information.
    pub fn max_order(mut self, max_order: usize) -> Self {
        self.0.max_order = max_order;
        self
    }

    /// Builds the [`SeriesOptions`].
    pub fn build(self) -> SeriesOptions {
        self.0
    }
}
