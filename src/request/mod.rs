//! Request construction module
//!
//! Validates call parameters against an operation descriptor and resolves
//! them into a request the transport can send.
//!
//! # Overview
//!
//! - [`OperationDescriptor`] / [`ParamSpec`] - static description of an operation
//! - [`CallParams`] - values supplied for one call
//! - [`RequestFactory`] - builds a [`RequestDescriptor`] (path, query, headers, body)

mod builder;
mod descriptor;

pub use builder::{FormPart, FormValue, RequestBody, RequestDescriptor, RequestFactory};
pub use descriptor::{CallParams, FileData, OperationDescriptor, ParamSpec};
