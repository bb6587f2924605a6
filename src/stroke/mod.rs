pub(crate) mod model;
pub(crate) mod record;
pub(crate) mod sample;
