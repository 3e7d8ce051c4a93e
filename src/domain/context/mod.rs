//! Context module - assembling the payload sent to the inference endpoint.

mod assembler;

pub use assembler::{ContextAssembler, ContextMessage, ContextPayload, ProfileFields};
