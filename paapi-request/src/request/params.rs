//! Fixed request parameters.
//!
//! Every request carries the parameters in [`FIXED_PARAMS`]. Each one is a
//! provider rather than a value: constants are copied as-is, accessors run
//! against the request when the parameter set is evaluated. This keeps the
//! associate tag lazy, so a tag set after construction (or replaced later) is
//! the one the signer sees.

use std::fmt;

use crate::{error::Result, request::RequestConfig};

/// Service identifier sent with every request.
pub const SERVICE: &str = "AWSECommerceService";

/// API version sent with every request.
pub const API_VERSION: &str = "2011-08-01";

/// Source of a fixed parameter value.
#[derive(Clone, Copy)]
pub enum ParamValue {
    /// Value known at compile time.
    Constant(&'static str),
    /// Value read from the request at evaluation time.
    Accessor(fn(&RequestConfig) -> Result<String>),
}

impl ParamValue {
    /// Produces the parameter value for `request`.
    ///
    /// # Errors
    ///
    /// Propagates the accessor's error, e.g.
    /// [`RequestError::MissingTag`](crate::RequestError::MissingTag).
    pub fn evaluate(&self, request: &RequestConfig) -> Result<String> {
        match self {
            Self::Constant(value) => Ok((*value).to_owned()),
            Self::Accessor(read) => read(request),
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

fn associate_tag(request: &RequestConfig) -> Result<String> {
    request.tag().map(str::to_owned)
}

/// Parameters present on every request, in declaration order.
pub static FIXED_PARAMS: &[(&str, ParamValue)] = &[
    ("AssociateTag", ParamValue::Accessor(associate_tag)),
    ("Service", ParamValue::Constant(SERVICE)),
    ("Version", ParamValue::Constant(API_VERSION)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;

    #[test]
    fn test_fixed_param_names() {
        let names: Vec<_> = FIXED_PARAMS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["AssociateTag", "Service", "Version"]);
    }

    #[test]
    fn test_constant_evaluates_without_tag() {
        let request = RequestConfig::new(None).unwrap();
        assert_eq!(ParamValue::Constant(SERVICE).evaluate(&request).unwrap(), SERVICE);
    }

    #[test]
    fn test_accessor_reads_current_tag() {
        let mut request = RequestConfig::new(None).unwrap();
        let accessor = ParamValue::Accessor(associate_tag);

        assert_eq!(accessor.evaluate(&request), Err(RequestError::MissingTag));

        request.set_tag("first-20");
        assert_eq!(accessor.evaluate(&request).unwrap(), "first-20");

        request.set_tag("second-20");
        assert_eq!(accessor.evaluate(&request).unwrap(), "second-20");
    }

    #[test]
    fn test_debug_hides_accessor() {
        assert_eq!(format!("{:?}", ParamValue::Accessor(associate_tag)), "Accessor(..)");
        assert_eq!(format!("{:?}", ParamValue::Constant("x")), "Constant(\"x\")");
    }
}
