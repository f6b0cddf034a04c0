pub(crate) mod constants;
pub(crate) mod input;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod terminal;
