/// A discrete input event from the interactive collaborator.
///
/// Events arrive as bare tags; the control surface decides what each tag
/// adjusts and by how much (see [`ControlSteps`](crate::ControlSteps)).
/// `Quit` is addressed to the frame loop's driver, not the control
/// surface, which ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    IncrementAngle,
    DecrementAngle,
    IncrementSpeed,
    DecrementSpeed,
    IncrementScale,
    DecrementScale,
    IncrementDamping,
    DecrementDamping,
    Reset,
}

/// A source of queued input events.
///
/// `poll` drains every event that arrived since the previous call. The
/// frame loop calls it exactly once per frame, before integration, so no
/// event can land in the middle of a step.
pub trait EventSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}
