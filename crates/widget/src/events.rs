/// Key that submits the current input when pressed inside the input control.
pub const ENTER_KEY: &str = "Enter";

/// UI event that starts a submit.
///
/// Both triggers run the identical submit procedure; the variant only shows up
/// in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitTrigger {
    /// Click or other activation of the send control.
    Activate,
    /// Enter pressed in the input control.
    EnterKey,
}

impl SubmitTrigger {
    /// Maps a key-press to a trigger; only Enter submits.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == ENTER_KEY).then_some(Self::EnterKey)
    }
}
