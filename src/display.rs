use crate::error::Error;
use crate::photos::ReconcileOutcome;

/// Visible mode of the kiosk, derived from the photo list length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No photos; the instructional screen is up.
    Empty,
    /// Exactly one photo, shown without rotation.
    Static,
    /// Two or more photos cycling on the rotation timer.
    Rotating,
}

/// Which full-screen surface the kiosk presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Instructions,
    Carousel,
}

/// Side effects the controller must perform after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAction {
    ShowCarousel,
    ShowInstructions,
    RenderIndex(usize),
    StartRotation,
    StopRotation,
}

/// The carousel's state machine. Holds mode plus current position; all
/// transitions run through [`DisplayStateMachine::apply`] so the valid
/// transition table lives in one place.
#[derive(Debug)]
pub struct DisplayStateMachine {
    mode: Mode,
    current_index: usize,
}

impl Default for DisplayStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayStateMachine {
    pub fn new() -> Self {
        Self {
            mode: Mode::Empty,
            current_index: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn surface(&self) -> Surface {
        match self.mode {
            Mode::Empty => Surface::Instructions,
            Mode::Static | Mode::Rotating => Surface::Carousel,
        }
    }

    /// Transition on a reconciliation outcome, given the post-merge list
    /// length. Returns the actions the caller must carry out, in order.
    ///
    /// `current_index` is reset only when leaving `Empty`; arrivals while
    /// already displaying keep the current position, so new photos queue up
    /// behind the running sequence and surface on the next full loop.
    pub fn apply(&mut self, outcome: ReconcileOutcome, len: usize) -> Vec<DisplayAction> {
        match outcome {
            ReconcileOutcome::NoChange => Vec::new(),
            ReconcileOutcome::WipedToEmpty => {
                self.mode = Mode::Empty;
                self.current_index = 0;
                vec![DisplayAction::StopRotation, DisplayAction::ShowInstructions]
            }
            ReconcileOutcome::Arrived(_) => match self.mode {
                Mode::Empty => {
                    self.current_index = 0;
                    let mut actions =
                        vec![DisplayAction::ShowCarousel, DisplayAction::RenderIndex(0)];
                    if len >= 2 {
                        self.mode = Mode::Rotating;
                        actions.push(DisplayAction::StartRotation);
                    } else {
                        self.mode = Mode::Static;
                    }
                    actions
                }
                Mode::Static if len >= 2 => {
                    self.mode = Mode::Rotating;
                    vec![DisplayAction::StartRotation]
                }
                Mode::Static => Vec::new(),
                // Already rotating: re-affirm the scheduler (idempotent start).
                Mode::Rotating => vec![DisplayAction::StartRotation],
            },
        }
    }

    /// Record the position produced by a rotation advance.
    ///
    /// An index outside `[0, len)` indicates the photo list and the display
    /// state have drifted apart; it is reported and the state left unchanged.
    pub fn set_index(&mut self, index: usize, len: usize) -> Result<(), Error> {
        if index >= len {
            return Err(Error::Invariant(format!(
                "index {index} out of range for list of {len}"
            )));
        }
        self.current_index = index;
        Ok(())
    }
}
