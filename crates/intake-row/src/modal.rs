#![forbid(unsafe_code)]

//! The confirmation modal seam.

/// An imperative show/hide surface owned by the embedding context.
///
/// The row knows nothing about the modal's internals: it shows the modal
/// when deletion is requested, hides it when the user answers, and wires
/// [`RowMsg::DeleteConfirmed`](crate::RowMsg::DeleteConfirmed) as the
/// accept action. Rendering, focus, and button wiring belong to the
/// embedding context.
pub trait ConfirmModal: Send + Sync + 'static {
    /// Open the confirmation dialog.
    fn show(&self);

    /// Close the confirmation dialog.
    fn hide(&self);
}
