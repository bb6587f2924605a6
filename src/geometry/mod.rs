pub(crate) mod classify;
pub(crate) mod engine;
pub(crate) mod paint;
pub(crate) mod primitive;
pub(crate) mod width;
