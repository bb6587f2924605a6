pub(crate) mod controller;
pub(crate) mod repaint;
pub(crate) mod snap;
