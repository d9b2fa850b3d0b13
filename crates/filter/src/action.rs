/// What the host should do with the data a callback just saw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Forward downstream.
    Continue,
    /// Hold the data and keep buffering until a later callback continues.
    Pause,
}
