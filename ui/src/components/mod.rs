//! Shared components for the app. `pico` holds the generic Pico.css
//! building blocks; the rest are specific to the reverse-record workflow.
pub mod name_select;
pub mod pending_tx;
pub mod pico;
pub mod reverse_record;
pub mod save_cancel;
