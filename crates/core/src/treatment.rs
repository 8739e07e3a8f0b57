use serde::Serialize;

/// Facets of a treatment that are determinable from its id.
///
/// A facet the naming scheme cannot see is `None`, which is ordinary;
/// the prefix-numeric scheme resolves a site and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub nitrogen: Option<String>,
    pub irrigation: Option<String>,
    pub crop: Option<String>,
    pub replicate: Option<String>,
}

/// Outcome of resolving a treatment id against a naming scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub site: String,
    pub facets: Facets,
}
