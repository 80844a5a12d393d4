/// Observer for per-pixel work.  Purely informational: nothing reported here
/// feeds back into quantization.
pub trait Progress {
    /// Called once before the first pixel of `name` is processed
    fn begin(&mut self, _name: &str, _total: usize) {}

    /// `processed` never decreases between calls for the same image
    fn advance(&mut self, processed: usize, total: usize);

    fn finish(&mut self) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn advance(&mut self, processed: usize, total: usize) {
        self(processed, total)
    }
}

/// Discards all progress reports
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Progress for Silent {
    fn advance(&mut self, _processed: usize, _total: usize) {}
}
