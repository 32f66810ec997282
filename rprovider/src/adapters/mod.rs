#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-replicate")]
pub mod replicate;

#[cfg(any(feature = "provider-openai", feature = "provider-replicate"))]
mod status;

#[cfg(any(feature = "provider-openai", feature = "provider-replicate"))]
pub(crate) use status::status_error;
