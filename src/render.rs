pub(crate) mod batch;
pub(crate) mod decorations;
pub(crate) mod progress;
pub(crate) mod qr;
