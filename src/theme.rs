pub(crate) mod assign;
pub(crate) mod contrast;
pub(crate) mod registry;
