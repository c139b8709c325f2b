pub(crate) mod compiler;
pub(crate) mod directive;
pub(crate) mod transform;
