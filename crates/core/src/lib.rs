//! Pure domain logic for the inventory batch-edit surface.
//!
//! Contains the editable row model, the pre-submission validator, the
//! local bulk price editor, and money formatting helpers. No I/O: the
//! `core` crate has no knowledge of the remote mutation or search
//! backends.

pub mod bulk_edit;
pub mod error;
pub mod money;
pub mod row;
pub mod types;
pub mod validate;
