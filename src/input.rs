use winit::event::VirtualKeyCode;

/// Process exit status chosen by the run loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    /// Window closed by the user.
    UserQuit,
    /// Fatal error, or the Escape/Q keys.
    Failure,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::UserQuit => 0,
            ExitStatus::Failure => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputAction {
    Continue,
    Exit(ExitStatus),
}

/// Escape and Q quit on both press and release.
pub fn key_action(key: Option<VirtualKeyCode>) -> InputAction {
    match key {
        Some(VirtualKeyCode::Escape) | Some(VirtualKeyCode::Q) => {
            InputAction::Exit(ExitStatus::Failure)
        }
        _ => InputAction::Continue,
    }
}

pub fn close_action() -> InputAction {
    InputAction::Exit(ExitStatus::UserQuit)
}
