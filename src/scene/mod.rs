pub(crate) mod backend;
pub(crate) mod builder;
pub(crate) mod delegate;
pub(crate) mod element;
pub(crate) mod layer;
