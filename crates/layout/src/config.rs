/// What to do with a line wider than `width - 2 * padding`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail the card with a configuration error before anything is drawn.
    #[default]
    Reject,
    /// Log a warning and draw past the margin.
    Allow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    pub overflow: OverflowPolicy,
}
