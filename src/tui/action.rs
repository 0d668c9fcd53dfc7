// Actions the key handler asks the main loop to perform.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave immediately (Esc).
    Quit,
}
