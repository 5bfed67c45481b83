//! Node and edge attribute values.

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

/// A single named edge attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// A numeric measurement such as a length or a travel time.
    Number(f64),
    /// A boolean marker such as "crosses a border".
    Flag(bool),
    /// Free text.
    Text(Arc<str>),
}

impl AttributeValue {
    /// Returns the value as a number when it is [`AttributeValue::Number`].
    ///
    /// # Examples
    /// ```
    /// use percolate_core::AttributeValue;
    ///
    /// assert_eq!(AttributeValue::Number(2.5).as_number(), Some(2.5));
    /// assert_eq!(AttributeValue::Flag(true).as_number(), None);
    /// ```
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Flag(_) | Self::Text(_) => None,
        }
    }

    /// Returns a short label for the kind of value held.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "a number",
            Self::Flag(_) => "a flag",
            Self::Text(_) => "text",
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Role of a node in the road network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeKind {
    /// A populated place.
    City,
    /// A junction or transport hub without population data.
    Transport,
}

impl NodeKind {
    /// Returns the lowercase label used in tabular inputs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Transport => "transport",
        }
    }
}

/// Error returned when a string names no [`NodeKind`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown node kind `{0}`; expected `city` or `transport`")]
pub struct ParseNodeKindError(pub String);

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "city" => Ok(Self::City),
            "transport" => Ok(Self::Transport),
            other => Err(ParseNodeKindError(other.to_owned())),
        }
    }
}

/// Optional descriptive attributes of a node.
///
/// # Examples
/// ```
/// use percolate_core::{NodeAttributes, NodeKind};
///
/// let attributes = NodeAttributes::default()
///     .with_kind(NodeKind::City)
///     .with_region("South")
///     .with_population(120_000.0);
/// assert_eq!(attributes.region(), Some("South"));
/// assert_eq!(attributes.kind(), Some(NodeKind::City));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttributes {
    population: Option<f64>,
    region: Option<Arc<str>>,
    country: Option<Arc<str>>,
    kind: Option<NodeKind>,
    coordinates: Option<(f64, f64)>,
}

impl NodeAttributes {
    /// Sets the population.
    #[must_use]
    pub fn with_population(mut self, population: f64) -> Self {
        self.population = Some(population);
        self
    }

    /// Sets the region label.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<Arc<str>>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<Arc<str>>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the node kind.
    #[must_use]
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the `(x, y)` coordinates (longitude, latitude).
    #[must_use]
    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some((x, y));
        self
    }

    /// Returns the population, if known.
    #[must_use]
    #[rustfmt::skip]
    pub fn population(&self) -> Option<f64> { self.population }

    /// Returns the region label, if known.
    #[must_use]
    #[rustfmt::skip]
    pub fn region(&self) -> Option<&str> { self.region.as_deref() }

    /// Returns the country code, if known.
    #[must_use]
    #[rustfmt::skip]
    pub fn country(&self) -> Option<&str> { self.country.as_deref() }

    /// Returns the node kind, if known.
    #[must_use]
    #[rustfmt::skip]
    pub fn kind(&self) -> Option<NodeKind> { self.kind }

    /// Returns the `(x, y)` coordinates, if known.
    #[must_use]
    #[rustfmt::skip]
    pub fn coordinates(&self) -> Option<(f64, f64)> { self.coordinates }
}
