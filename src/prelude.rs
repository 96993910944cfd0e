//! Convenient re-exports for glob imports.
//!
//! Everything needed to describe an endpoint type and build a router:
//!
//! ```rust
//! use endpoint_router::prelude::*;
//!
//! let codec = EndpointCodec::<Option<u32>>::shared().unwrap();
//! assert_eq!(codec.parse("/5"), Some(Some(5)));
//! ```

pub use crate::{
    // Describing types
    FieldReader, FieldShape, PageModel, Routable, Schema, Shape, Value, VariantShape,
    // Routing
    EndpointCodec, NavigationRouter, Router, RouterCache, RouterConfig,
    // Templates
    Modifier, PathTemplate, TemplateFragment,
    // Errors
    InvalidRouter, InvalidRouterKind, TemplateError,
};
