/// A scheduler tick. Each timer kind feeds its own channel, so the message
/// carries no discriminant; receiving one means "that timer fired".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;
