//! Session status.

crate::state_enum! {
    /// Where a session is in its lifecycle.
    ///
    /// `Active <-> Paused` toggles on user request; `Active -> Completed`
    /// happens automatically when the grid matches the solution and is
    /// terminal.
    #[derive(Copy, Eq, Hash)]
    pub enum SessionStatus {
        Active,
        Paused,
        Completed,
    }
    final: [Completed]
    running: [Active]
}
