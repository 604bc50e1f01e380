pub mod card;
pub mod form;
