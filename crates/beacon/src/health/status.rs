//! Status — serving status reported per service name.

/// Health of a single named service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServingStatus {
    /// Never reported; also the answer for names nobody tracks.
    #[default]
    Unknown,
    Serving,
    NotServing,
}
