pub mod use_editable;
