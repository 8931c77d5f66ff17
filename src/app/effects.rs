use crate::app::{App, Model};

impl App {
    /// Run the I/O requested by the last update.
    pub(super) fn handle_side_effects(model: &mut Model) {
        if model.take_save_request() {
            model.save();
        }
    }
}
