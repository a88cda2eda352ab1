//! Grid interaction: pointer selection and classification

mod apply;
mod selection;

pub use apply::apply_class;
pub use selection::{EventFlow, SelectionController, TextSelection};
