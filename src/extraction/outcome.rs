/// A value produced by a section extractor together with the non-fatal issues met on the way.
///
/// Extraction never stops at a gap: the field falls back to its null/zero default and a
/// human-readable warning is recorded instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extracted<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> Extracted<T> {
    pub fn new(value: T, warnings: Vec<String>) -> Self {
        Extracted { value, warnings }
    }

    /// A value read without any warning.
    pub fn clean(value: T) -> Self {
        Extracted::new(value, Vec::new())
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transforms the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        Extracted::new(f(self.value), self.warnings)
    }

    /// Chains another extraction step; warnings of both steps are kept in order.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Extracted<U>) -> Extracted<U> {
        let Extracted { value, mut warnings } = self;
        let next = f(value);
        warnings.extend(next.warnings);
        Extracted::new(next.value, warnings)
    }

    /// Moves the warnings into `sink` and returns the value.
    pub fn drain_into(self, sink: &mut Vec<String>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

impl<T: Default> Extracted<T> {
    /// Default sub-record for a section whose worksheet is absent.
    pub fn missing_sheet(sheet_name: &str) -> Self {
        Extracted::new(T::default(), vec![format!("Sheet '{sheet_name}' not found")])
    }
}
